//! Core data models for the cadastral search helper.

pub mod cadastre;
pub mod result;

pub use cadastre::{CadastreRecord, CoordinateRow};
pub use result::{Destination, ResultItem};
