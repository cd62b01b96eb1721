use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{DecodeError, PlantRecordCodec};
use crate::db::{self, StoreError};
use crate::models::Plant;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} out of range for collection of {len} plants")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A row that was skipped during [`PlantCollection::load_from_file`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the file.
    pub line_number: usize,
    pub error: DecodeError,
}

/// Outcome of a best-effort bulk load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Ordered list of plants. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantCollection {
    plants: Vec<Plant>,
}

impl PlantCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plants(plants: Vec<Plant>) -> Self {
        Self { plants }
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter()
    }

    pub fn add(&mut self, plant: Plant) {
        self.plants.push(plant);
    }

    /// Remove the first plant equal (field by field) to `plant`.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, plant: &Plant) -> bool {
        match self.plants.iter().position(|p| p == plant) {
            Some(index) => {
                self.plants.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Plant, CollectionError> {
        self.check_index(index)?;
        Ok(self.plants.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Plant, CollectionError> {
        self.plants.get(index).ok_or(CollectionError::IndexOutOfRange {
            index,
            len: self.plants.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Plant, CollectionError> {
        let len = self.plants.len();
        self.plants
            .get_mut(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })
    }

    /// Independent copy of the current sequence.
    pub fn get_all(&self) -> Vec<Plant> {
        self.plants.clone()
    }

    pub fn filter<F>(&self, mut predicate: F) -> Vec<Plant>
    where
        F: FnMut(&Plant) -> bool,
    {
        self.plants.iter().filter(|p| predicate(*p)).cloned().collect()
    }

    /// Plants whose watering is overdue as of `today`.
    pub fn unwatered(&self, today: NaiveDate) -> Vec<Plant> {
        self.filter(|p| p.is_watering_needed(today))
    }

    pub fn sort_by_name(&mut self) {
        self.plants.sort_by(Plant::cmp_by_name);
    }

    pub fn sort_by_last_watering_date(&mut self) {
        self.plants.sort_by_key(Plant::last_watering_date);
    }

    pub fn sort_by_watering_interval(&mut self) {
        self.plants.sort_by_key(Plant::watering_interval);
    }

    /// Append every decodable row of `path` to this collection.
    ///
    /// Rows that fail to decode are logged and listed in the returned
    /// report; they never abort the load, including rows that are not valid
    /// UTF-8. Blank lines are ignored. Only a failure to read the file
    /// itself is returned as an error.
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadReport, StoreError> {
        let lines = db::read_lines(path)?;
        let mut report = LoadReport::default();

        for (idx, line) in lines.iter().enumerate() {
            if line.trim_ascii().is_empty() {
                continue;
            }
            match PlantRecordCodec::deserialize_bytes(line) {
                Ok(plant) => {
                    self.plants.push(plant);
                    report.loaded += 1;
                }
                Err(error) => {
                    warn!(path = %path.display(), line = idx + 1, %error, "skipping plant row");
                    report.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        error,
                    });
                }
            }
        }

        debug!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "plants loaded"
        );
        Ok(report)
    }

    /// Write every plant to `path` in the current order, replacing the file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), StoreError> {
        db::write_lines(path, self.plants.iter().map(PlantRecordCodec::serialize))?;
        debug!(path = %path.display(), count = self.plants.len(), "plants saved");
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        if index >= self.plants.len() {
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.plants.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PlantCollection {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}
