use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// The URL carries no 10-character alphanumeric path token.
    #[error("no listing identifier found in URL \"{url}\"")]
    Extraction { url: String },

    /// The lookup API returned an empty result set for the identifier.
    #[error("no marketplace item found for identifier {identifier}")]
    NotFound { identifier: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by marketplace API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("marketplace API rejected credentials (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("marketplace API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {operation}")]
    UnexpectedStatus { status: u16, operation: String },

    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid marketplace endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl MarketplaceError {
    /// `true` for transport, auth, rate-limit and response-shape failures:
    /// everything the remote side is responsible for, as opposed to a bad
    /// URL or a missing item.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        !matches!(
            self,
            MarketplaceError::Extraction { .. } | MarketplaceError::NotFound { .. }
        )
    }
}
