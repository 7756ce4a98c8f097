//! Result items handed back to the host for display.

use serde::{Deserialize, Serialize};

/// What selecting a result does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum Destination {
    /// Open the URL in a browser
    Url(String),
    /// Informational item, selecting it does nothing
    NoOp,
}

impl Destination {
    pub fn url(&self) -> Option<&str> {
        match self {
            Destination::Url(url) => Some(url),
            Destination::NoOp => None,
        }
    }
}

/// One suggestion produced for a query. Order in the returned list is the
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub label: String,
    pub description: String,
    pub destination: Destination,
}

impl ResultItem {
    pub fn link(label: impl Into<String>, description: impl Into<String>, url: String) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            destination: Destination::Url(url),
        }
    }

    pub fn info(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            destination: Destination::NoOp,
        }
    }

    pub fn is_informational(&self) -> bool {
        self.destination == Destination::NoOp
    }
}
