//! Error types for catalog lookups

use thiserror::Error;

/// Errors that can occur while talking to the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Unknown entity, type or lineage
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or remote failure; retrying may help
    #[error("Transient failure: {0}")]
    Transient(String),

    /// The response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The client could not be set up
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether the failure may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Transient(_))
    }

    /// Whether the looked-up resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CatalogError::Malformed(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status == reqwest::StatusCode::NOT_FOUND => {
                    CatalogError::NotFound(e.to_string())
                }
                Some(status) if status.is_client_error() => {
                    CatalogError::Malformed(format!("HTTP {}: {}", status, e))
                }
                _ => CatalogError::Transient(e.to_string()),
            }
        } else {
            CatalogError::Transient(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(CatalogError::Transient("timeout".into()).is_transient());
        assert!(!CatalogError::NotFound("missingno".into()).is_transient());
        assert!(CatalogError::NotFound("missingno".into()).is_not_found());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(CatalogError::from(err), CatalogError::Malformed(_)));
    }
}
