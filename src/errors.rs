#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend signalled that the requested resource does not exist.
    /// On the phone lookup this is an expected outcome, not a failure.
    #[error("not found")]
    NotFound,

    #[error("{message}")]
    Backend { message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message shown to the user for a failed request: the backend's own
    /// `message` when one was present, otherwise the per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend { message } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
