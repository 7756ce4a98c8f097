//! Map service URL construction.

use url::{form_urlencoded, Url};

use crate::error::UrlError;
use crate::models::CadastreRecord;

/// Builds ZBGIS map URLs under a fixed service root.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
    zoom: u8,
}

impl UrlBuilder {
    pub fn new(base_url: &str, zoom: u8) -> Result<Self, UrlError> {
        let base = Url::parse(base_url).map_err(|source| UrlError::Parse {
            url: base_url.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(UrlError::NotABase(base_url.to_string()));
        }
        Ok(Self { base, zoom })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Free-text search: `<base>/search?q=<query>`.
    ///
    /// The query is percent-encoded with spaces as `%20` and `/` left as is,
    /// so a plain percent-decode of the value gives back the raw query.
    pub fn search(&self, query: &str) -> String {
        let mut url = self.with_path(&["search"]);
        url.set_query(Some(&format!("q={}", encode_query_value(query))));
        url.to_string()
    }

    /// Parcel detail in the C register.
    pub fn parcel(&self, record: &CadastreRecord, number: &str) -> String {
        self.detail("parcela-c", record, number)
    }

    /// Building detail addressed by house number.
    pub fn building(&self, record: &CadastreRecord, number: &str) -> String {
        self.detail("budova-sc", record, number)
    }

    /// `<base>/detail/kataster/<kind>/<code>/<number>?pos=<Y>,<X>,<zoom>`
    ///
    /// `number` becomes a single path segment, so a slash in it is escaped.
    fn detail(&self, kind: &str, record: &CadastreRecord, number: &str) -> String {
        let mut url = self.with_path(&["detail", "kataster", kind, record.code.as_str(), number]);
        url.set_query(Some(&format!("pos={},{},{}", record.y, record.x, self.zoom)));
        url.to_string()
    }

    fn with_path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in new(): the base can always take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Percent-encode a query-string value.
///
/// Form encoding emits `+` only for spaces (a literal `+` is `%2B`) and
/// `%2F` only for `/`, so both can be rewritten safely.
fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace("%2F", "/")
}
