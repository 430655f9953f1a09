use thiserror::Error;

/// Failures of the reference dataset or the live availability feed.
///
/// None of these are retried; callers see them as "source unavailable".
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The feed answered with an envelope that carries no items.
    #[error("availability feed at {url} returned no items")]
    EmptyPayload { url: String },

    #[error("cannot read reference dataset {path}: {source}")]
    ReferenceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference dataset ({context}): {source}")]
    ReferenceCsv {
        context: String,
        #[source]
        source: csv::Error,
    },
}
