use super::concepts::{BatchSaveFormat, StorageError, StorageInterface};
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Save elements as json files with [serde_json].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JsonStorageInterface<Element> {
    /// Storage path.
    pub path: std::path::PathBuf,
    phantom_element: PhantomData<Element>,
}

impl<Element> JsonStorageInterface<Element> {
    const FILE_NAME: &'static str = "cells.json";

    fn get_iteration_path(&self, iteration: u64) -> std::path::PathBuf {
        self.path.join(format!("{:020.0}", iteration))
    }

    fn folder_name_to_iteration(
        &self,
        folder: &std::path::Path,
    ) -> Result<Option<u64>, StorageError> {
        if !folder.is_dir() {
            return Ok(None);
        }
        match folder.file_name().and_then(|name| name.to_str()) {
            Some(name) => Ok(Some(name.parse::<u64>()?)),
            None => Ok(None),
        }
    }
}

impl<Element> StorageInterface<Element> for JsonStorageInterface<Element> {
    fn open_or_create(location: &std::path::Path) -> Result<Self, StorageError> {
        if !location.is_dir() {
            std::fs::create_dir_all(location)?;
        }
        Ok(JsonStorageInterface {
            path: location.into(),
            phantom_element: PhantomData,
        })
    }

    fn store_batch_elements<'a, I>(
        &self,
        iteration: u64,
        time: f64,
        elements: I,
    ) -> Result<(), StorageError>
    where
        Element: 'a + Serialize,
        I: IntoIterator<Item = &'a Element>,
    {
        let iteration_path = self.get_iteration_path(iteration);
        std::fs::create_dir_all(&iteration_path)?;
        let file = std::fs::File::create(iteration_path.join(Self::FILE_NAME))?;
        let batch = BatchSaveFormat {
            iteration,
            time,
            data: elements.into_iter().collect::<Vec<_>>(),
        };
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &batch)?;
        Ok(())
    }

    fn load_all_elements_at_iteration(
        &self,
        iteration: u64,
    ) -> Result<Option<BatchSaveFormat<Element>>, StorageError>
    where
        Element: for<'a> Deserialize<'a>,
    {
        let file_path = self.get_iteration_path(iteration).join(Self::FILE_NAME);
        if !file_path.is_file() {
            return Ok(None);
        }
        let file = std::fs::File::open(&file_path)?;
        let batch = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(Some(batch))
    }

    fn get_all_iterations(&self) -> Result<Vec<u64>, StorageError> {
        let paths = std::fs::read_dir(&self.path)?;
        let mut iterations = paths
            .into_iter()
            .filter_map(|path| match path {
                Ok(p) => match self.folder_name_to_iteration(&p.path()) {
                    Ok(Some(entry)) => Some(Ok(entry)),
                    Ok(None) => None,
                    Err(e) => Some(Err(e)),
                },
                Err(_) => None,
            })
            .collect::<Result<Vec<_>, _>>()?;
        iterations.sort_unstable();
        Ok(iterations)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
    struct Element {
        id: u32,
        diameter: f64,
    }

    #[test]
    fn store_and_load_batches() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let storage = JsonStorageInterface::<Element>::open_or_create(&dir.path().join("out"))?;
        let elements = vec![
            Element { id: 0, diameter: 2.0 },
            Element { id: 1, diameter: 4.5 },
        ];
        storage.store_batch_elements(10, 1.0, &elements)?;
        storage.store_batch_elements(0, 0.0, &elements[..1])?;

        assert_eq!(storage.get_all_iterations()?, vec![0, 10]);
        let batch = storage.load_all_elements_at_iteration(10)?.unwrap();
        assert_eq!(batch.iteration, 10);
        assert_eq!(batch.time, 1.0);
        assert_eq!(batch.data, elements);
        assert!(storage.load_all_elements_at_iteration(5)?.is_none());
        Ok(())
    }

    #[test]
    fn storing_twice_overwrites() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let storage = JsonStorageInterface::<Element>::open_or_create(dir.path())?;
        let first = vec![Element { id: 0, diameter: 1.0 }; 3];
        let second = vec![Element { id: 7, diameter: 3.0 }];
        storage.store_batch_elements(1, 0.1, &first)?;
        storage.store_batch_elements(1, 0.1, &second)?;
        let batch = storage.load_all_elements_at_iteration(1)?.unwrap();
        assert_eq!(batch.data, second);
        Ok(())
    }

    #[test]
    fn foreign_folders_are_rejected() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let storage = JsonStorageInterface::<Element>::open_or_create(dir.path())?;
        std::fs::create_dir(dir.path().join("not-an-iteration"))?;
        std::fs::write(dir.path().join("notes.txt"), "files are ignored")?;
        assert!(matches!(
            storage.get_all_iterations(),
            Err(StorageError::ParseIntError(_))
        ));
        Ok(())
    }
}
