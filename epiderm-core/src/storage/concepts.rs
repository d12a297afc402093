pub use crate::errors::StorageError;

use serde::{Deserialize, Serialize};

/// All elements which were saved at one iteration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BatchSaveFormat<Element> {
    /// Iteration at which the batch was saved
    pub iteration: u64,
    /// Simulation time at this iteration
    pub time: f64,
    /// The saved elements in population order
    pub data: Vec<Element>,
}

/// Define how to store results of the simulation.
pub trait StorageInterface<Element> {
    /// Initializes the storage at the given location.
    /// Missing folders are created.
    fn open_or_create(location: &std::path::Path) -> Result<Self, StorageError>
    where
        Self: Sized;

    /// Saves a batch of elements at the specified iteration.
    ///
    /// An already existing batch at this iteration is overwritten.
    fn store_batch_elements<'a, I>(
        &self,
        iteration: u64,
        time: f64,
        elements: I,
    ) -> Result<(), StorageError>
    where
        Element: 'a + Serialize,
        I: IntoIterator<Item = &'a Element>;

    /// Loads the batch stored at the given iteration.
    ///
    /// Returns `None` if nothing was saved at this iteration.
    fn load_all_elements_at_iteration(
        &self,
        iteration: u64,
    ) -> Result<Option<BatchSaveFormat<Element>>, StorageError>
    where
        Element: for<'a> Deserialize<'a>;

    /// All iterations at which results were stored, sorted in ascending order.
    fn get_all_iterations(&self) -> Result<Vec<u64>, StorageError>;
}

/// Configures the folder in which results are stored.
///
/// Before results can be written, the builder has to be turned into its initialized form
/// with [StorageBuilder::init].
/// At this point the current date is fixed (see [StorageBuilder::add_date]) so that all
/// snapshots of one simulation end up in the same folder.
///
/// ```
/// use epiderm_core::storage::StorageBuilder;
///
/// let storage_builder = StorageBuilder::new()
///     .location("./results")
///     .suffix("epidermis");
/// # #[cfg(feature = "timestamp")]
/// # let storage_builder = storage_builder.add_date(false);
/// assert_eq!(
///     storage_builder.init().get_full_path(),
///     std::path::PathBuf::from("./results/epidermis"),
/// );
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StorageBuilder<const INIT: bool = false> {
    location: std::path::PathBuf,
    suffix: std::path::PathBuf,
    #[cfg(feature = "timestamp")]
    add_date: bool,
    #[cfg(feature = "timestamp")]
    date: std::path::PathBuf,
}

impl<const INIT: bool> StorageBuilder<INIT> {
    /// Subfolder which is appended to the path after the date.
    pub fn suffix(mut self, suffix: impl Into<std::path::PathBuf>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// See [StorageBuilder::suffix]
    pub fn get_suffix(&self) -> std::path::PathBuf {
        self.suffix.clone()
    }

    /// Put results into a subfolder named by the date at which [StorageBuilder::init] was
    /// called. Enabled by default.
    #[cfg(feature = "timestamp")]
    pub fn add_date(mut self, add_date: bool) -> Self {
        self.add_date = add_date;
        self
    }

    /// See [StorageBuilder::add_date]
    #[cfg(feature = "timestamp")]
    pub fn get_add_date(&self) -> bool {
        self.add_date
    }
}

impl Default for StorageBuilder<false> {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBuilder<false> {
    /// Results are stored in `./out` by default.
    ///
    /// ```
    /// use epiderm_core::storage::StorageBuilder;
    /// let storage_builder = StorageBuilder::new();
    /// assert_eq!(storage_builder.get_location(), std::path::PathBuf::from("./out"));
    /// ```
    pub fn new() -> Self {
        Self {
            location: "./out".into(),
            suffix: std::path::PathBuf::new(),
            #[cfg(feature = "timestamp")]
            add_date: true,
            #[cfg(feature = "timestamp")]
            date: std::path::PathBuf::new(),
        }
    }

    /// Fixes the date and thus the full path of the storage.
    pub fn init(self) -> StorageBuilder<true> {
        #[cfg(feature = "timestamp")]
        let date = match self.add_date {
            true => chrono::Local::now()
                .format("%Y-%m-%d-T%H-%M-%S")
                .to_string()
                .into(),
            false => std::path::PathBuf::new(),
        };
        #[cfg(not(feature = "timestamp"))]
        let date = std::path::PathBuf::new();
        self.init_with_date(&date)
    }

    /// Same as [StorageBuilder::init] with a given date.
    ///
    /// The date is ignored if the `timestamp` feature is disabled or
    /// [StorageBuilder::add_date] was set to `false`.
    #[cfg_attr(not(feature = "timestamp"), allow(unused_variables))]
    pub fn init_with_date(self, date: &std::path::Path) -> StorageBuilder<true> {
        StorageBuilder::<true> {
            location: self.location,
            suffix: self.suffix,
            #[cfg(feature = "timestamp")]
            add_date: self.add_date,
            #[cfg(feature = "timestamp")]
            date: date.to_path_buf(),
        }
    }

    /// Base folder of all results.
    pub fn location<P>(mut self, location: P) -> Self
    where
        std::path::PathBuf: From<P>,
    {
        self.location = location.into();
        self
    }

    /// See [StorageBuilder::location]
    pub fn get_location(&self) -> std::path::PathBuf {
        self.location.clone()
    }
}

impl StorageBuilder<true> {
    /// Location, date and suffix combined.
    pub fn get_full_path(&self) -> std::path::PathBuf {
        let mut parts = vec![self.location.as_path()];
        #[cfg(feature = "timestamp")]
        if self.add_date {
            parts.push(self.date.as_path());
        }
        parts.push(self.suffix.as_path());
        parts
            .into_iter()
            .filter(|part| !part.as_os_str().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_path_contains_all_parts() {
        let builder = StorageBuilder::new()
            .location("/tmp/results")
            .suffix("run-1")
            .init_with_date(std::path::Path::new("today"));
        #[cfg(feature = "timestamp")]
        assert_eq!(
            builder.get_full_path(),
            std::path::PathBuf::from("/tmp/results/today/run-1")
        );
        #[cfg(not(feature = "timestamp"))]
        assert_eq!(
            builder.get_full_path(),
            std::path::PathBuf::from("/tmp/results/run-1")
        );
    }

    #[cfg(feature = "timestamp")]
    #[test]
    fn date_can_be_omitted() {
        let builder = StorageBuilder::new()
            .location("/tmp/results")
            .add_date(false)
            .init_with_date(std::path::Path::new("today"));
        assert!(!builder.get_add_date());
        assert_eq!(
            builder.get_full_path(),
            std::path::PathBuf::from("/tmp/results")
        );
    }

    #[test]
    fn builder_roundtrips_through_json() {
        let builder = StorageBuilder::new().location("somewhere").suffix("x");
        let json = serde_json::to_string(&builder).unwrap();
        let loaded: StorageBuilder = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.get_location(), builder.get_location());
        assert_eq!(loaded.get_suffix(), builder.get_suffix());
    }
}
