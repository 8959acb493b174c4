//! Error types shared by the timeline, the wardrobe and the gateway.
//!
//! Every failure is recoverable: the session stays alive and the user
//! may retry whatever operation failed.

pub type StudioResult<T> = Result<T, StudioError>;

/// Failures reported by the image generation service
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request was refused by the content policy
    #[error("Request was blocked. Reason: {reason}. {detail}")]
    Blocked { reason: String, detail: String },

    /// The model answered without an image (text only, or nothing)
    #[error("{0}")]
    NoImage(String),

    /// Network or service failure
    #[error("{0}")]
    Transport(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StudioError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Rejected before any gateway call was made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Uploaded bytes are not an image format the model accepts
    #[error("Unsupported MIME type: {0}")]
    UnsupportedMediaType(String),

    /// A generation request is already in flight
    #[error("a generation request is already in progress")]
    Busy,

    /// The operation needs a finalized base portrait
    #[error("no active session")]
    NoSession,

    /// Sharing needs at least one worn garment
    #[error("no garment has been applied yet")]
    NothingToShare,

    #[error("configuration error: {0}")]
    Config(String),
}

impl StudioError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came back from the image generation service
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }

    /// Build the message shown to the user
    ///
    /// Unsupported media types get a dedicated hint; everything else is
    /// reported as `"{context}. {detail}"`.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            Self::UnsupportedMediaType(mime) if !mime.is_empty() => format!(
                "File type '{}' is not supported. Please use a format like PNG, JPEG, or WEBP.",
                mime
            ),
            Self::UnsupportedMediaType(_) => {
                "Unsupported file format. Please upload an image format like PNG, JPEG, or WEBP."
                    .to_string()
            }
            other => format!("{}. {}", context, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_message_carries_reason() {
        let err = StudioError::from(GatewayError::Blocked {
            reason: "SAFETY".to_string(),
            detail: String::new(),
        });
        assert!(err.is_gateway());
        assert!(err.to_string().contains("Reason: SAFETY"));
    }

    #[test]
    fn test_user_message_prefixes_context() {
        let err = StudioError::from(GatewayError::Transport("connection reset".to_string()));
        assert_eq!(
            err.user_message("Failed to apply garment"),
            "Failed to apply garment. connection reset"
        );
    }

    #[test]
    fn test_unsupported_media_type_message() {
        let err = StudioError::UnsupportedMediaType("image/tiff".to_string());
        let msg = err.user_message("Failed to apply garment");
        assert!(msg.starts_with("File type 'image/tiff' is not supported"));

        let unknown = StudioError::UnsupportedMediaType(String::new());
        assert!(unknown
            .user_message("ignored")
            .starts_with("Unsupported file format"));
    }
}
