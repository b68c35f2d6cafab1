use thiserror::Error;

/// Message shown to the user when a drop cannot be turned into a polygon.
pub const DROP_FAILED_MESSAGE: &str = "Failed to add polygon";

#[derive(Error, Debug)]
pub enum DragError {
    #[error("Malformed drag payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Failed to encode drag payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DragError {
    /// Short, user-facing text for the transient notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            DragError::MalformedPayload(_) | DragError::Encode(_) => DROP_FAILED_MESSAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, DragError>;
