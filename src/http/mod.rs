//! HTTP client module with status-preserving responses and API error reporting.

mod client;
mod error;

pub use client::{ApiResponse, HttpClient, UploadBody};
pub use error::ApiError;
