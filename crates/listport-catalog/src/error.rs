use listport_core::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog API rejected the access token (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("rate limited by catalog API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {operation}")]
    UnexpectedStatus { status: u16, operation: String },

    /// Top-level GraphQL `errors` (query or schema problems, throttling).
    #[error("{operation} failed: {}", .messages.join("; "))]
    Graphql {
        operation: String,
        messages: Vec<String>,
    },

    /// Field-level validation failures, reported verbatim.
    #[error("{operation} returned user errors: {}", join_user_errors(.errors))]
    UserErrors {
        operation: String,
        errors: Vec<UserError>,
    },

    /// The mutation succeeded at the transport level but returned no payload.
    #[error("{operation} returned no data")]
    MissingData { operation: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl CatalogError {
    /// The platform's field-level errors, if this is a user-error rejection.
    #[must_use]
    pub fn user_errors(&self) -> Option<&[UserError]> {
        match self {
            CatalogError::UserErrors { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

fn join_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
