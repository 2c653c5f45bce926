/*!
 * Error types for the medreviews-batch service.
 *
 * This module contains custom error types for different parts of the service,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when calling the text-generation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Errors that can occur while fetching a single page
///
/// These are per-item errors: the batch captures them as failed result rows
/// and continues with the next URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-layer failure (DNS, connect, TLS, timeout, mid-body read)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    BadStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Job-level errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum JobError {
    /// The request body failed shape validation; maps to a 400 response
    #[error("{0}")]
    Validation(String),

    /// A defect escaped per-item handling; maps to a 500 response
    #[error("{0}")]
    Internal(String),
}

impl From<anyhow::Error> for JobError {
    fn from(error: anyhow::Error) -> Self {
        Self::Internal(error.to_string())
    }
}
