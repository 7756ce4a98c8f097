//! Query classification and ZBGIS URL synthesis.

mod classify;
mod service;
mod urls;

pub use classify::{classify, is_number_shaped, QueryKind};
pub use service::QueryResolver;
pub use urls::UrlBuilder;
