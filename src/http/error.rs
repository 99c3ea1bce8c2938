//! Errors raised when the remote API answers with a status the caller did not expect.

use reqwest::StatusCode;

/// A response whose status is outside the documented success code for an operation.
///
/// Carries the raw response body so the user sees exactly what the server said.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Human-readable name of the operation, e.g. "Creating release".
    pub operation: String,
    pub status: StatusCode,
    pub body: String,
}

impl ApiError {
    pub fn new(operation: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns a short hint for statuses that usually have a well-known cause.
    pub fn hint(&self) -> Option<&'static str> {
        match self.status {
            StatusCode::UNAUTHORIZED => Some("Check that the GitHub token is valid."),
            StatusCode::FORBIDDEN => Some(
                "The token may lack write access to this repository, or the API rate limit was exceeded.",
            ),
            StatusCode::NOT_FOUND => Some(
                "The repository or resource was not found, or the token cannot access it.",
            ),
            StatusCode::UNPROCESSABLE_ENTITY => {
                Some("GitHub rejected the request as invalid (check the tag, ref and asset name).")
            }
            StatusCode::TOO_MANY_REQUESTS => Some("Too many requests. Try again later."),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed with HTTP {}",
            self.operation,
            self.status.as_u16()
        )?;
        if let Some(hint) = self.hint() {
            write!(f, ". {}", hint)?;
        }
        if !self.body.is_empty() {
            write!(f, "\nResponse: {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
