use thiserror::Error;
use wwlln_core::CoreError;

/// Why a single attempt to read the feed failed.
#[derive(Debug, Error)]
pub enum FetchCause {
    /// Network or TLS failure, timeout, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not a JSON object of strike records.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by [`WwllnClient`](crate::WwllnClient).
#[derive(Debug, Error)]
pub enum WwllnError {
    /// A caller-supplied argument was rejected before any I/O happened.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A nearest-strike lookup ran against an empty snapshot.
    #[error("no strikes available to search")]
    EmptyInput,

    /// One attempt to fetch the feed failed. The retry controller absorbs the
    /// first of these; callers only see it from single-shot requests.
    #[error("error requesting data from {url}: {source}")]
    TransientFetch {
        url: String,
        #[source]
        source: FetchCause,
    },

    /// The feed failed twice in a row.
    #[error("recurring error requesting data from {url}: {source}")]
    RecurringFetch {
        url: String,
        #[source]
        source: FetchCause,
    },

    /// The caller's cancellation token fired while a fetch was in progress.
    #[error("strike request cancelled")]
    Cancelled,

    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The underlying `reqwest::Client` could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl From<CoreError> for WwllnError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUnit(_) => WwllnError::InvalidArgument(err.to_string()),
            CoreError::EmptySnapshot => WwllnError::EmptyInput,
        }
    }
}
