//! Name index over cadastral districts.

use hashbrown::HashMap;
use tracing::{info, warn};

use super::loader::{load_codes, load_coordinates, TableRows};
use crate::error::ReferenceError;
use crate::config::ReferenceConfig;
use crate::models::{CadastreRecord, CoordinateRow};

/// Immutable lookup from district name to [`CadastreRecord`].
///
/// Entries keep coordinate-table order so partial matches are reproducible.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<CadastreRecord>,
    /// Normalized key of each entry, parallel to `entries`
    keys: Vec<String>,
    by_key: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// Join `(name, code)` pairs with coordinate rows on exact name.
    ///
    /// A name repeated in either input keeps its last occurrence. Coordinate
    /// rows without a code get an empty `code`.
    pub fn build<C, R>(codes: C, coordinates: R) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        R: IntoIterator<Item = CoordinateRow>,
    {
        let codes: HashMap<String, String> = codes.into_iter().collect();

        let mut index = Self::default();
        for row in coordinates {
            let code = codes.get(&row.name).cloned().unwrap_or_default();
            index.insert(CadastreRecord {
                name: row.name,
                code,
                x: row.x,
                y: row.y,
            });
        }

        info!("Reference index built with {} districts", index.len());
        index
    }

    /// Load both tables from disk.
    ///
    /// Never fails: a table that cannot be opened is logged and treated as
    /// empty, and a table with a bad record keeps the rows before it. The
    /// index may end up partially or fully unpopulated.
    pub fn load(config: &ReferenceConfig) -> Self {
        let codes = rows_or_warn(
            "District codes",
            load_codes(&config.codes, &config.code_name_column, &config.code_column),
        );

        let coordinates = rows_or_warn(
            "District coordinates",
            load_coordinates(
                &config.coordinates,
                &config.coord_name_column,
                &config.x_column,
                &config.y_column,
            ),
        );

        let index = Self::build(codes, coordinates);
        let missing = index.missing_codes().count();
        if missing > 0 {
            warn!("{} districts have no administrative code", missing);
        }
        index
    }

    fn insert(&mut self, record: CadastreRecord) {
        let key = record.key();
        match self.by_key.get(&key) {
            Some(&pos) => self.entries[pos] = record,
            None => {
                self.by_key.insert(key.clone(), self.entries.len());
                self.keys.push(key);
                self.entries.push(record);
            }
        }
    }

    /// Look up a district by name, case and surrounding whitespace ignored.
    ///
    /// An exact key match wins. Otherwise the best partial match is
    /// returned: keys starting with the query beat keys merely containing
    /// it, then shorter keys win, then earlier entries.
    pub fn find(&self, query: &str) -> Option<&CadastreRecord> {
        let query = CadastreRecord::key_for(query);
        if query.is_empty() {
            return None;
        }

        if let Some(&pos) = self.by_key.get(&query) {
            return Some(&self.entries[pos]);
        }

        self.keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.contains(query.as_str()))
            .min_by_key(|(pos, key)| (!key.starts_with(query.as_str()), key.chars().count(), *pos))
            .map(|(pos, _)| &self.entries[pos])
    }

    /// All records in coordinate-table order
    pub fn records(&self) -> impl Iterator<Item = &CadastreRecord> {
        self.entries.iter()
    }

    /// Records the map service cannot address because no code was found.
    pub fn missing_codes(&self) -> impl Iterator<Item = &CadastreRecord> {
        self.entries.iter().filter(|r| !r.has_code())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn rows_or_warn<T>(table: &str, loaded: Result<TableRows<T>, ReferenceError>) -> Vec<T> {
    match loaded {
        Ok(TableRows { rows, error: None }) => rows,
        Ok(TableRows {
            rows,
            error: Some(e),
        }) => {
            warn!("{} truncated after {} rows: {}", table, rows.len(), e);
            rows
        }
        Err(e) => {
            warn!("{} unavailable, continuing without them: {}", table, e);
            Vec::new()
        }
    }
}
