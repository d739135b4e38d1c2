use reqwest::StatusCode;

/// Failure talking to the quote or weather service.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        Self::Status { status, body: truncate_body(body) }
    }
}

/// Failure reported by a geolocation capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    PositionUnavailable(String),
    #[error("Location request timed out")]
    Timeout,
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
