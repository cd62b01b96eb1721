//! Houseplant watering tracker.
//!
//! [`models::Plant`] holds one plant and its schedule,
//! [`codec::PlantRecordCodec`] maps plants to tab-separated rows and
//! [`collection::PlantCollection`] keeps an ordered list that can be loaded
//! from and saved to a record file.

pub mod cli;
pub mod clock;
pub mod codec;
pub mod collection;
pub mod commands;
pub mod config;
pub mod db;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{DecodeError, PlantRecordCodec};
pub use collection::{CollectionError, LoadReport, PlantCollection, SkippedLine};
pub use db::StoreError;
pub use models::{Plant, PlantError};
