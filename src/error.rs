//! Error types for the Samarth client
//!
//! Every error here is recovered at the UI boundary: it becomes a
//! dismissible message and the application returns to a stable idle state.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamarthError {
    /// Microphone access was denied by the platform
    #[error("Microphone permission denied")]
    SpeechPermissionDenied,

    /// The speech service lost its network connection
    #[error("Speech recognition network error")]
    SpeechNetwork,

    /// Any other recognition failure, with the engine's code embedded
    #[error("Speech recognition error: {0}")]
    Speech(String),

    /// The recognition session could not be started
    #[error("Failed to start speech recognition: {0}")]
    SpeechStart(String),

    /// The backend rejected or failed the query
    #[error("Backend error: {0}")]
    Backend(String),

    /// The request never reached the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Channel communication error
    #[error("Channel error: {0}")]
    Channel(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SamarthError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors allow the user to simply retry; the rest need
    /// intervention (permissions, settings) before a retry can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Needs a permission change in the OS settings
            SamarthError::SpeechPermissionDenied => false,
            // Transient connectivity problems
            SamarthError::SpeechNetwork => true,
            SamarthError::Speech(_) => true,
            SamarthError::SpeechStart(_) => true,
            // Backend and transport failures are typically transient
            SamarthError::Backend(_) => true,
            SamarthError::Network(_) => true,
            // Channel errors indicate internal issues
            SamarthError::Channel(_) => false,
            // Config errors require user intervention
            SamarthError::Config(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    ///
    /// Returns a message suitable for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            SamarthError::SpeechPermissionDenied => {
                "Microphone access denied. Please allow microphone permissions in your system settings.".to_string()
            }
            SamarthError::SpeechNetwork => {
                "Network error occurred. Please check your internet connection.".to_string()
            }
            SamarthError::Speech(code) => {
                format!("Error with voice recognition: {}", code)
            }
            SamarthError::SpeechStart(_) => {
                "Failed to start voice recognition. Please try again.".to_string()
            }
            SamarthError::Backend(message) => message.clone(),
            SamarthError::Network(message) => message.clone(),
            SamarthError::Channel(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            SamarthError::Config(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

/// Result type alias for Samarth operations
pub type Result<T> = std::result::Result<T, SamarthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denial_has_dedicated_message() {
        let err = SamarthError::SpeechPermissionDenied;
        assert!(err.user_message().contains("Microphone access denied"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_generic_speech_error_embeds_code() {
        let err = SamarthError::Speech("audio-capture".to_string());
        assert_eq!(
            err.user_message(),
            "Error with voice recognition: audio-capture"
        );
    }

    #[test]
    fn test_backend_error_passes_message_through() {
        let err = SamarthError::Backend("db down".to_string());
        assert_eq!(err.user_message(), "db down");
        assert!(err.is_recoverable());
    }
}
