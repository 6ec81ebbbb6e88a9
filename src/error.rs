//! Error taxonomy for the recognition client
//!
//! Every failure that reaches the UI is one of four kinds: the service could
//! not be reached, the credential was rejected, the input was malformed, or
//! the service reported an application-level error.

use thiserror::Error;

/// Malformed input detected locally, before or after a remote call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("image is empty")]
    EmptyImage,

    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("malformed data URI")]
    InvalidDataUri,
}

/// Failure of a client operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Network unreachable, timeout, or an undecodable response
    #[error("transport failure: {0}")]
    Transport(String),

    /// Missing, expired or insufficient credential
    #[error("authorization failure: {0}")]
    Auth(String),

    #[error("validation failure: {0}")]
    Validation(#[from] ValidationError),

    /// Application error reported by the service
    #[error("remote failure ({code}): {message}")]
    Remote { code: i64, message: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Credential-class failure; on an authenticated user action this forces logout
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// Short message suitable for display next to the control that failed
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => "Service unreachable, check your network".to_string(),
            ClientError::Auth(msg) if msg.is_empty() => "Please sign in again".to_string(),
            ClientError::Auth(msg) => msg.clone(),
            ClientError::Validation(e) => match e {
                ValidationError::InvalidDimensions { .. } => {
                    "The service returned an image without dimensions".to_string()
                }
                ValidationError::EmptyImage => "The selected file is empty".to_string(),
                ValidationError::UnsupportedImage(detail) => {
                    format!("Could not use this image ({})", detail)
                }
                ValidationError::InvalidDataUri => "Stored image could not be read".to_string(),
            },
            ClientError::Remote { message, .. } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth() {
        assert!(ClientError::Auth("expired".into()).is_auth());
        assert!(!ClientError::Transport("down".into()).is_auth());
        assert!(!ClientError::Remote { code: 5, message: "x".into() }.is_auth());
    }

    #[test]
    fn test_user_message_prefers_remote_text() {
        let err = ClientError::Remote { code: 6, message: "Daily limit reached".into() };
        assert_eq!(err.user_message(), "Daily limit reached");

        let err = ClientError::Auth(String::new());
        assert_eq!(err.user_message(), "Please sign in again");
    }

    #[test]
    fn test_validation_converts() {
        let err: ClientError = ValidationError::EmptyImage.into();
        assert_eq!(err, ClientError::Validation(ValidationError::EmptyImage));
        assert_eq!(err.user_message(), "The selected file is empty");
    }
}
