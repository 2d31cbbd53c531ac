pub mod mock;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::{MediaError, MediaResult};
use crate::render::AttachMechanism;
use crate::tracks::CaptureStream;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Named capture-request entry points a host may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureStrategy {
    /// `navigator.webkitGetUserMedia`
    LegacyWebkit,
    /// `navigator.mozGetUserMedia`
    LegacyMoz,
    /// `navigator.mediaDevices.getUserMedia`
    Standard,
}

impl CaptureStrategy {
    /// Probe order used by [`detect_strategy`]
    pub const PRIORITY: [CaptureStrategy; 3] = [
        CaptureStrategy::LegacyWebkit,
        CaptureStrategy::LegacyMoz,
        CaptureStrategy::Standard,
    ];

    /// Strategy name
    pub fn name(&self) -> &'static str {
        match self {
            CaptureStrategy::LegacyWebkit => "legacy-webkit",
            CaptureStrategy::LegacyMoz => "legacy-moz",
            CaptureStrategy::Standard => "standard",
        }
    }

    /// How streams obtained through this strategy are bound to an output
    pub fn attach_mechanism(&self) -> AttachMechanism {
        match self {
            CaptureStrategy::LegacyWebkit => AttachMechanism::ObjectUrl,
            CaptureStrategy::LegacyMoz => AttachMechanism::MozSrcObject,
            CaptureStrategy::Standard => AttachMechanism::SrcObject,
        }
    }
}

impl fmt::Display for CaptureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which media kinds a capture request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConstraints {
    /// Request an audio track
    pub audio: bool,
    /// Request a video track
    pub video: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

impl MediaConstraints {
    /// Microphone only
    pub fn audio_only() -> Self {
        Self {
            audio: true,
            video: false,
        }
    }

    /// Camera only
    pub fn video_only() -> Self {
        Self {
            audio: false,
            video: true,
        }
    }

    /// True when nothing is requested
    pub fn is_empty(&self) -> bool {
        !self.audio && !self.video
    }
}

/// Host platform capture backend.
///
/// Futures are `?Send` because browser handles never leave their thread.
#[async_trait(?Send)]
pub trait PlatformCapture {
    /// Stream type handed out by this platform
    type Stream: CaptureStream;

    /// Whether the platform exposes the given entry point
    fn supports(&self, strategy: CaptureStrategy) -> bool;

    /// Issue one capture request through `strategy` and wait for the answer
    async fn request_stream(
        &self,
        strategy: CaptureStrategy,
        constraints: &MediaConstraints,
    ) -> MediaResult<Self::Stream>;
}

/// First supported strategy in [`CaptureStrategy::PRIORITY`] order
pub fn detect_strategy<P: PlatformCapture + ?Sized>(platform: &P) -> Option<CaptureStrategy> {
    let detected = CaptureStrategy::PRIORITY
        .into_iter()
        .find(|strategy| platform.supports(*strategy));
    debug!("🔍 Capture strategy probe: {:?}", detected);
    detected
}

/// Request a new capture stream from the platform.
///
/// Fails with [`MediaError::UnsupportedPlatform`] without touching the
/// platform when no strategy is detected. Otherwise a single request is
/// made; there is no retry or timeout.
pub async fn request_stream<P: PlatformCapture + ?Sized>(
    platform: &P,
    constraints: &MediaConstraints,
) -> MediaResult<P::Stream> {
    if constraints.is_empty() {
        return Err(MediaError::InvalidConstraints {
            message: "at least one of audio or video must be requested".to_string(),
        });
    }

    let strategy = detect_strategy(platform).ok_or_else(|| MediaError::UnsupportedPlatform {
        operation: "getUserMedia".to_string(),
    })?;

    info!(
        "🎥 Requesting capture via {} (audio: {}, video: {})",
        strategy, constraints.audio, constraints.video
    );

    match platform.request_stream(strategy, constraints).await {
        Ok(stream) => {
            info!("✅ Capture granted: stream {}", stream.id());
            Ok(stream)
        }
        Err(e) => {
            warn!("❌ Capture request via {} failed: {}", strategy, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            CaptureStrategy::PRIORITY,
            [
                CaptureStrategy::LegacyWebkit,
                CaptureStrategy::LegacyMoz,
                CaptureStrategy::Standard
            ]
        );
    }

    #[test]
    fn test_strategy_names_and_mechanisms() {
        assert_eq!(CaptureStrategy::LegacyWebkit.name(), "legacy-webkit");
        assert_eq!(CaptureStrategy::LegacyMoz.to_string(), "legacy-moz");
        assert_eq!(
            CaptureStrategy::LegacyWebkit.attach_mechanism(),
            AttachMechanism::ObjectUrl
        );
        assert_eq!(
            CaptureStrategy::LegacyMoz.attach_mechanism(),
            AttachMechanism::MozSrcObject
        );
        assert_eq!(
            CaptureStrategy::Standard.attach_mechanism(),
            AttachMechanism::SrcObject
        );
    }

    #[test]
    fn test_constraints() {
        let defaults = MediaConstraints::default();
        assert!(defaults.audio && defaults.video);
        assert!(!MediaConstraints::audio_only().video);
        assert!(!MediaConstraints::video_only().audio);
        assert!(MediaConstraints {
            audio: false,
            video: false
        }
        .is_empty());
    }
}
