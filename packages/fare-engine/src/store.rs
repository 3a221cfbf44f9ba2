//! The listing table.
//!
//! One CSV file holding the most recent scrape. The table is wholly
//! replaced on every save - there is no append path and no history. The
//! store object owns the path so the scrape step and the fare step share
//! an explicit handle instead of a module-level file name.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::records::ListingRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access listing table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed listing table: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV-backed table of the most recently scraped listings.
#[derive(Debug, Clone)]
pub struct ListingStore {
    path: PathBuf,
}

impl ListingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the table with `records`. The previous contents are
    /// discarded, headers included.
    pub fn save(&self, records: &[ListingRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!(path = %self.path.display(), count = records.len(), "Listing table saved");
        Ok(())
    }

    /// Load the table. A store that has never been written reads as empty
    /// rather than an error, since a fresh deployment has no listings yet.
    pub fn load(&self) -> Result<Vec<ListingRecord>, StoreError> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "Listing table missing; treating as empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }

        debug!(path = %self.path.display(), count = records.len(), "Listing table loaded");
        Ok(records)
    }

    /// Reload the table and derive the base fare from it.
    pub fn base_fare(&self) -> Result<f64, StoreError> {
        Ok(mean_fare(&self.load()?))
    }
}

/// Arithmetic mean of the fare column.
///
/// An empty table degrades to 0 instead of dividing by zero; the warning
/// is the caller's cue that the resulting grid is not a real quote.
pub fn mean_fare(records: &[ListingRecord]) -> f64 {
    if records.is_empty() {
        warn!("No listings available; base fare degrades to 0");
        return 0.0;
    }

    let total: i64 = records.iter().map(|r| r.fare).sum();
    total as f64 / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(travel_name: &str, fare: i64) -> ListingRecord {
        ListingRecord {
            travel_name: travel_name.to_string(),
            bus_type: "Volvo Multi-axle A/C Sleeper".to_string(),
            seat_type_label: "Sleeper".to_string(),
            departure_time: "09:30 PM".to_string(),
            duration: "08h 15m".to_string(),
            date: "2025-11-03".to_string(),
            fare,
            amenities: "WiFi, Water Bottle".to_string(),
            seats_remaining: "14".to_string(),
        }
    }

    #[test]
    fn test_mean_fare() {
        let records = vec![listing("A", 900), listing("B", 1100), listing("C", 1150)];
        assert_eq!(mean_fare(&records), 1050.0);
    }

    #[test]
    fn test_mean_fare_empty_is_zero() {
        assert_eq!(mean_fare(&[]), 0.0);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("bus_data.csv"));

        let records = vec![listing("IntrCity SmartBus", 949), listing("VRL Travels", 1200)];
        store.save(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
        assert_eq!(store.base_fare().unwrap(), 1074.5);
    }

    #[test]
    fn test_save_overwrites_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("bus_data.csv"));

        store.save(&[listing("A", 500), listing("B", 700)]).unwrap();
        store.save(&[listing("C", 1000)]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].travel_name, "C");
        assert_eq!(store.base_fare().unwrap(), 1000.0);
    }

    #[test]
    fn test_missing_table_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("never_written.csv"));

        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.base_fare().unwrap(), 0.0);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListingStore::new(dir.path().join("data").join("bus_data.csv"));

        store.save(&[listing("A", 800)]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
