use thiserror::Error;

pub mod boundary;
pub mod email;
pub mod prices;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport failure: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("Unexpected response status {status}: {reason}")]
    Status { status: u16, reason: String },
    /// The payload is kept for diagnosis but not displayed.
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, payload: String },
}

impl Error {
    pub fn malformed(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            payload: payload.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
