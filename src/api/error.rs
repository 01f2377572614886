use thiserror::Error;

/// Errors that can occur while talking to the report backend.
///
/// These carry the raw detail for logging. The UI never shows them verbatim;
/// controllers map them to fixed messages (see [`crate::history::HistoryError`]).
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("server error: {status} - {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
