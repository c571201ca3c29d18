use thiserror::Error;

/// How much of a failing response body is kept for the error message.
pub const MAX_ERROR_BODY_BYTES: usize = 512;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid backend base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to rendering backend failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Rendering backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Remote render cancelled")]
    Cancelled,
}

impl TransportError {
    pub(crate) fn status(status: u16, body: &[u8]) -> Self {
        let end = body.len().min(MAX_ERROR_BODY_BYTES);
        TransportError::Status {
            status,
            body: String::from_utf8_lossy(&body[..end]).into_owned(),
        }
    }
}
