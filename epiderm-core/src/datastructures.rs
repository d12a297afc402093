use epiderm_concepts::{
    CellBox, CellIdentifier, CellType, Differentiation, InconsistentState, InvalidArgument,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

/// Container which owns every cell of the simulation.
///
/// New cells are not inserted directly.
/// They are first staged with [Population::append] (or [Population::append_daughter]) and only
/// become visible after [Population::commit].
/// The commit assigns identifiers in staging order which makes the order of the population
/// reproducible.
///
/// ```
/// # use epiderm_core::datastructures::Population;
/// let mut population = Population::new();
/// population.append("first");
/// population.append("second");
/// assert_eq!(population.len(), 0);
/// assert_eq!(population.commit(), 2);
/// assert_eq!(population.len(), 2);
/// assert_eq!(population.iter().last().unwrap().cell, "second");
/// ```
///
/// Deserialized populations are checked to have strictly increasing identifiers which all lie
/// below the counter for the next commit.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(
    try_from = "PopulationRecord<C>",
    bound(deserialize = "C: Deserialize<'de>")
)]
pub struct Population<C> {
    pub(crate) cells: Vec<CellBox<C>>,
    pub(crate) staged: Vec<(C, Option<CellIdentifier>)>,
    next_counter: u64,
}

/// Unchecked serialized form of a [Population].
#[derive(Deserialize)]
struct PopulationRecord<C> {
    /// See [Population::iter]
    cells: Vec<CellBox<C>>,
    /// See [Population::n_staged]
    staged: Vec<(C, Option<CellIdentifier>)>,
    /// Counter of the next committed cell
    next_counter: u64,
}

impl<C> TryFrom<PopulationRecord<C>> for Population<C> {
    type Error = InconsistentState;

    fn try_from(record: PopulationRecord<C>) -> Result<Self, Self::Error> {
        let counters = record.cells.iter().map(|cbox| cbox.identifier.counter());
        if !counters.tuple_windows().all(|(c1, c2)| c1 < c2) {
            return Err(InconsistentState(
                "identifiers of a population must be strictly increasing".to_owned(),
            ));
        }
        if let Some(last) = record.cells.last() {
            if last.identifier.counter() >= record.next_counter {
                return Err(InconsistentState(format!(
                    "next identifier {} would reuse the identifier {:?}",
                    record.next_counter, last.identifier
                )));
            }
        }
        Ok(Self {
            cells: record.cells,
            staged: record.staged,
            next_counter: record.next_counter,
        })
    }
}

impl<C> Default for Population<C> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            staged: Vec::new(),
            next_counter: 0,
        }
    }
}

impl<C> Population<C> {
    /// Constructs an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves capacity for at least `additional` staged cells.
    ///
    /// Fails without changing the population if the memory cannot be provided.
    pub fn reserve(&mut self, additional: usize) -> Result<(), InvalidArgument> {
        let to_error = |e: std::collections::TryReserveError| {
            InvalidArgument(format!("cannot reserve space for {additional} cells: {e}"))
        };
        self.staged.try_reserve(additional).map_err(to_error)?;
        self.cells.try_reserve(additional).map_err(to_error)
    }

    /// Stages a cell which was initially placed in the simulation.
    pub fn append(&mut self, cell: C) {
        self.staged.push((cell, None));
    }

    /// Stages a cell which emerged from a division of `parent`.
    pub fn append_daughter(&mut self, cell: C, parent: CellIdentifier) {
        self.staged.push((cell, Some(parent)));
    }

    /// Makes all staged cells visible in the order in which they were staged.
    ///
    /// Returns the number of committed cells.
    pub fn commit(&mut self) -> usize {
        let n_staged = self.staged.len();
        let counter = &mut self.next_counter;
        self.cells
            .extend(self.staged.drain(..).map(|(cell, parent)| {
                let cbox = match parent {
                    Some(parent) => CellBox::new_daughter(*counter, cell, parent),
                    None => CellBox::new_initial(*counter, cell),
                };
                *counter += 1;
                cbox
            }));
        n_staged
    }

    /// Drops staged cells until at most `n` remain.
    pub(crate) fn truncate_staged(&mut self, n: usize) {
        self.staged.truncate(n);
    }

    /// Drops all staged cells without committing them.
    pub fn discard_staged(&mut self) {
        self.staged.clear();
    }

    /// Number of cells which are staged but not committed yet.
    pub fn n_staged(&self) -> usize {
        self.staged.len()
    }

    /// Number of committed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Checks if no cell has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over all committed cells in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, CellBox<C>> {
        self.cells.iter()
    }

    /// Mutable access to all committed cells.
    ///
    /// This is how an external mechanics engine moves and grows cells between steps.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CellBox<C>> {
        self.cells.iter_mut()
    }

    /// Obtains the cell with the given identifier.
    pub fn get(&self, identifier: &CellIdentifier) -> Option<&CellBox<C>> {
        // Counters are strictly increasing along the population
        self.cells
            .binary_search_by_key(&identifier.counter(), |cbox| cbox.identifier.counter())
            .ok()
            .map(|index| &self.cells[index])
            .filter(|cbox| &cbox.identifier == identifier)
    }

    /// Mutable variant of [Population::get].
    pub fn get_mut(&mut self, identifier: &CellIdentifier) -> Option<&mut CellBox<C>> {
        let index = self
            .cells
            .binary_search_by_key(&identifier.counter(), |cbox| cbox.identifier.counter())
            .ok()?;
        Some(&mut self.cells[index]).filter(|cbox| &cbox.identifier == identifier)
    }

    /// All committed cells of the given type.
    pub fn get_by_type(&self, cell_type: CellType) -> impl Iterator<Item = &CellBox<C>>
    where
        C: Differentiation,
    {
        self.cells
            .iter()
            .filter(move |cbox| cbox.cell_type() == cell_type)
    }

    /// Number of committed cells per type.
    ///
    /// Types without any cell are listed with a count of zero.
    pub fn counts_by_type(&self) -> BTreeMap<CellType, usize>
    where
        C: Differentiation,
    {
        let mut counts: BTreeMap<_, _> = CellType::ALL.into_iter().map(|t| (t, 0)).collect();
        counts.extend(self.cells.iter().map(|cbox| cbox.cell_type()).counts());
        counts
    }
}

impl<'a, C> IntoIterator for &'a Population<C> {
    type Item = &'a CellBox<C>;
    type IntoIter = std::slice::Iter<'a, CellBox<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
