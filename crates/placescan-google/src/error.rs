use thiserror::Error;

/// Errors returned by the Places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response envelope carried a status other than `OK`/`ZERO_RESULTS`
    /// (e.g. `REQUEST_DENIED`, `OVER_QUERY_LIMIT`, `INVALID_REQUEST`).
    #[error("Places API error {status}: {message}")]
    Api { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
