use thiserror::Error;

/// Error type shared by every fallible operation in the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status}")]
    Status { status: u16 },

    #[error("Malformed response body: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether this error came out of the data fetch.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_) | CatalogError::Status { .. } | CatalogError::Parse(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        if self.is_fetch_error() {
            return "Failed to load data. Check the API ID or your internet connection.".to_string();
        }
        match self {
            CatalogError::Io(e) => format!("File system error: {}", e),
            CatalogError::Serialization(e) => format!("Data format error: {}", e),
            CatalogError::Clipboard(_) => "Copy failed".to_string(),
            CatalogError::Config(msg) => format!("Configuration error: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<arboard::Error> for CatalogError {
    fn from(e: arboard::Error) -> Self {
        CatalogError::Clipboard(e.to_string())
    }
}
