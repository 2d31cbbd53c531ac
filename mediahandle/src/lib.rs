//! # mediahandle
//!
//! A thin handle over a browser's live audio/video capture stream. It keeps
//! mute and pause flags in sync with the stream's audio and video tracks,
//! acquires new streams from whichever capture entry point the host exposes,
//! and binds streams to output elements for playback.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mediahandle::{AcquireOptions, MediaHandle, MockPlatform};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Any `PlatformCapture` works here; in a browser use `WebPlatform`
//!     let platform = MockPlatform::new();
//!
//!     // Ask for camera and microphone
//!     let mut handle = MediaHandle::acquire(&platform, None, AcquireOptions::default()).await?;
//!
//!     // Stop sending audio, keep video
//!     handle.set_muted(true);
//!
//!     // Render into a fresh output element
//!     let _element = handle.attach(&platform, None)?;
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export media types for easy access
pub use mediahandle_media::{
    AttachMechanism, CaptureStream, CaptureStrategy, ErrorCategory, MediaConstraints,
    MediaError, MediaResult, MediaTrack, MockElement, MockPlatform, MockStream, OutputElement,
    PlatformCapture, PlatformRender, TrackInfo, TrackKind,
};

#[cfg(target_arch = "wasm32")]
pub use mediahandle_media::{WebElement, WebPlatform, WebStream};

// Public API modules
pub mod config;
pub mod handle;
pub mod logging;

// Re-export main API types
pub use config::{AcquireOptions, HandleOptions, LoggingConfig};
pub use handle::{HandleState, MediaHandle};
pub use logging::init_logging;
