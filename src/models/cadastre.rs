//! Cadastral district records held by the reference index.

use serde::{Deserialize, Serialize};

/// One cadastral district (katastrálne územie).
///
/// Coordinates stay as the text published in the source table and are
/// copied into URLs verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadastreRecord {
    /// District name as published
    pub name: String,
    /// Administrative code; empty when the code table has no matching name
    pub code: String,
    pub x: String,
    pub y: String,
}

impl CadastreRecord {
    /// Index key for a district name: trimmed and lower-cased.
    pub fn key_for(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn key(&self) -> String {
        Self::key_for(&self.name)
    }

    /// Whether the map service can address this district directly.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

/// One row of the coordinate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateRow {
    pub name: String,
    pub x: String,
    pub y: String,
}
