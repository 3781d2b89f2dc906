//! `obralog` - local records for construction sites and their inspections
//!
//! This library provides durable, restart-surviving storage of two record
//! collections — sites ("obras") and inspections ("fiscalizações") — as
//! whole-document JSON arrays in named slots, plus the permission-gated
//! device captures (location, photo) that enrich them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod model;
pub mod registry;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{GeoPoint, Inspection, InspectionStatus, Site};
pub use registry::{Registry, SitePatch};
pub use store::{KvSlots, MemorySlots, RecordStore, SqliteSlots};
