//! Media handle error types and handling
//!
//! This module defines the error types surfaced by capture acquisition and
//! output binding. None of them are retried internally; every failure goes
//! straight back to the caller.

use thiserror::Error;

/// Main error type for capture and output operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// No known capture-request mechanism exists on the host
    #[error("Unsupported platform: no capture mechanism available for {operation}")]
    UnsupportedPlatform {
        /// Operation that was attempted
        operation: String,
    },

    /// No output element was supplied and none can be created
    #[error("Cannot create output element: no document context available")]
    NoOutputContext,

    /// No known mechanism to attach a stream to an output element
    #[error("Cannot attach stream: no attachment mechanism detected")]
    UnsupportedAttachment,

    /// The platform answered the capture request with an error
    #[error("Capture request failed ({strategy}): {reason}")]
    CaptureRequestFailed {
        /// Strategy that issued the request
        strategy: String,
        /// Failure reason reported by the platform
        reason: String,
    },

    /// Constraints cannot be satisfied by any platform
    #[error("Invalid constraints: {message}")]
    InvalidConstraints {
        /// Error message
        message: String,
    },

    /// Output element refused to start playback
    #[error("Playback failed: {reason}")]
    PlaybackFailed {
        /// Failure reason
        reason: String,
    },

    /// Exception raised by a host platform API
    #[error("Platform error: {api} - {message}")]
    Platform {
        /// API that raised the exception
        api: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

/// Result type alias for media operations
pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MediaError::PlaybackFailed { .. } => true,
            MediaError::UnsupportedPlatform { .. } => false,
            MediaError::NoOutputContext => false,
            MediaError::UnsupportedAttachment => false,
            MediaError::CaptureRequestFailed { .. } => false,
            _ => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            MediaError::UnsupportedPlatform { .. } => ErrorCategory::Platform,
            MediaError::NoOutputContext => ErrorCategory::Output,
            MediaError::UnsupportedAttachment => ErrorCategory::Output,
            MediaError::CaptureRequestFailed { .. } => ErrorCategory::Capture,
            MediaError::InvalidConstraints { .. } => ErrorCategory::Configuration,
            MediaError::PlaybackFailed { .. } => ErrorCategory::Output,
            MediaError::Platform { .. } => ErrorCategory::Platform,
            MediaError::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Host platform capability errors
    Platform,
    /// Capture request errors (permissions, hardware)
    Capture,
    /// Output element errors
    Output,
    /// Configuration and parameter errors
    Configuration,
}

/// Helper trait for converting platform-specific errors
pub trait IntoMediaError {
    /// Convert into a [`MediaError::Platform`] tagged with the calling API
    fn into_media_error(self, api: &str) -> MediaError;
}

impl IntoMediaError for String {
    fn into_media_error(self, api: &str) -> MediaError {
        MediaError::Platform {
            api: api.to_string(),
            message: self,
        }
    }
}

impl IntoMediaError for &str {
    fn into_media_error(self, api: &str) -> MediaError {
        self.to_string().into_media_error(api)
    }
}
