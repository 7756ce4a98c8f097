//! Cadastral district reference data.
//!
//! Joins the district code table with the district coordinate table into an
//! immutable name index.

mod index;
mod loader;

pub use index::ReferenceIndex;
pub use loader::{load_codes, load_coordinates, TableRows};
