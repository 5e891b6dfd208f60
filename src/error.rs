//! Errors reported by the guess service client.

use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// The request never produced a usable response.
    #[display("Guess service unavailable: {_0}")]
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    #[display("Guess service rejected the request ({status}): {message}")]
    #[from(ignore)]
    Rejected {
        status: u16,
        message: String,
    },
    /// The service answered, but not in the expected shape.
    #[display("Unexpected response from guess service: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Malformed(err.to_string())
    }
}
