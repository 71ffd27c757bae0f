/// Coarse classification of a failed search, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent a missing or empty query. Never retried.
    InvalidInput,
    /// The catalog provider could not be reached or answered with garbage.
    UpstreamUnavailable,
}

/// Errors that abort a catalog search.
///
/// Field-level anomalies (missing year, unparsable rank, ...) are not errors:
/// they degrade to `None` or a default during normalization.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Search query is required")]
    EmptyQuery,

    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog {endpoint} endpoint returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Malformed catalog XML: {0}")]
    Xml(#[from] quick_xml::DeError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::EmptyQuery => ErrorKind::InvalidInput,
            CatalogError::Transport(_) | CatalogError::Status { .. } | CatalogError::Xml(_) => {
                ErrorKind::UpstreamUnavailable
            }
        }
    }
}
