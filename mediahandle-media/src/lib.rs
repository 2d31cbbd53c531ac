//! # mediahandle media
//!
//! Capture stream plumbing for mediahandle: track and stream abstractions,
//! capture strategy detection and acquisition, output element binding, and
//! the browser and in-memory platform backends.

#![warn(clippy::all)]

pub mod capture;
pub mod error;
pub mod render;
pub mod tracks;

// Re-export main types
pub use capture::mock::{MockElement, MockElementState, MockPlatform, MockStream, MockTrack};
#[cfg(target_arch = "wasm32")]
pub use capture::web::{WebElement, WebPlatform, WebStream, WebTrack};
pub use capture::{detect_strategy, request_stream, CaptureStrategy, MediaConstraints, PlatformCapture};
pub use error::{ErrorCategory, IntoMediaError, MediaError, MediaResult};
pub use render::{attach, AttachMechanism, OutputElement, PlatformRender};
pub use tracks::{set_tracks_enabled, track_infos, CaptureStream, MediaTrack, TrackInfo, TrackKind};
