//! Client error types for the quotation endpoints.

use thiserror::Error;

/// Errors that can occur calling the quotation endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to encode or decode a payload.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
