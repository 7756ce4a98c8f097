//! Query resolution: classify, look up, build the result list.

use tracing::debug;

use super::classify::{classify, QueryKind};
use super::urls::UrlBuilder;
use crate::config::Config;
use crate::error::UrlError;
use crate::models::ResultItem;
use crate::reference::ReferenceIndex;

/// Turns raw launcher input into an ordered list of results.
pub struct QueryResolver {
    index: ReferenceIndex,
    urls: UrlBuilder,
}

impl QueryResolver {
    pub fn new(index: ReferenceIndex, urls: UrlBuilder) -> Self {
        Self { index, urls }
    }

    /// Build a resolver from configuration, loading the reference tables.
    ///
    /// Unreadable tables only degrade lookups; a bad base URL is an error.
    pub fn from_config(config: &Config) -> Result<Self, UrlError> {
        let urls = UrlBuilder::new(&config.service.base_url, config.service.zoom)?;
        let index = ReferenceIndex::load(&config.reference);
        Ok(Self::new(index, urls))
    }

    /// Resolve one query.
    ///
    /// The result is never empty. For any non-blank query the last item is
    /// the general search.
    pub fn resolve(&self, query: &str) -> Vec<ResultItem> {
        let kind = classify(query);
        debug!("Query {:?} classified as {:?}", query, kind);

        let mut items = Vec::new();
        match kind {
            QueryKind::Empty => {
                return vec![ResultItem::info(
                    "ZBGIS Search",
                    "Enter search text for ZBGIS cadastral map",
                )];
            }
            QueryKind::LocatedNumber { location, number } => {
                self.push_direct_links(&mut items, location, number);
            }
            QueryKind::BareNumber(number) => {
                items.push(ResultItem::info(
                    format!("Parcel or house number {}", number),
                    format!(
                        "Add a cadastral district for a direct link, e.g. \"Nitra {}\"",
                        number
                    ),
                ));
                items.push(ResultItem::info(
                    "Direct links need a location",
                    "With a district given, both the parcel and the house number are offered",
                ));
            }
            QueryKind::FreeText => {}
        }

        let url = self.urls.search(query);
        items.push(ResultItem::link(
            format!("Search ZBGIS: {}", query),
            format!("Open {}", url),
            url,
        ));
        items
    }

    fn push_direct_links(&self, items: &mut Vec<ResultItem>, location: &str, number: &str) {
        let Some(record) = self.index.find(location) else {
            debug!("No cadastral district matches {:?}", location);
            return;
        };

        if !record.has_code() {
            debug!("District {} has no administrative code", record.name);
            return;
        }

        items.push(ResultItem::link(
            format!("Parcel C {} in {}", number, record.name),
            format!("Parcel detail, cadastral district {} ({})", record.name, record.code),
            self.urls.parcel(record, number),
        ));
        items.push(ResultItem::link(
            format!("House number {} in {}", number, record.name),
            format!("Building detail, cadastral district {} ({})", record.name, record.code),
            self.urls.building(record, number),
        ));
    }

    /// Get the reference index (for stats/health)
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }
}
