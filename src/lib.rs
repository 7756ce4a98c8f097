//! ZBGIS - query interpretation for the Slovak cadastral map
//!
//! This library provides the reference index and query resolver shared by the
//! query and check binaries.

pub mod config;
pub mod error;
pub mod models;
pub mod reference;
pub mod resolver;

pub use models::{CadastreRecord, Destination, ResultItem};
pub use reference::ReferenceIndex;
pub use resolver::QueryResolver;
