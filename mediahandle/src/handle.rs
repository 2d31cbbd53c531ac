//! Media handle around a live capture stream

use crate::config::{AcquireOptions, HandleOptions};
use mediahandle_media::{
    capture, render, set_tracks_enabled, track_infos, CaptureStream, MediaConstraints,
    MediaResult, PlatformCapture, PlatformRender, TrackInfo, TrackKind,
};
use serde::Serialize;
use tracing::info;

/// Wrapper over a platform capture stream with mute and pause controls.
///
/// `muted` mirrors "all audio tracks disabled" and `paused` mirrors "all
/// video tracks disabled". Both are applied to the stream at construction
/// and on every set.
#[derive(Debug)]
pub struct MediaHandle<S: CaptureStream> {
    /// Wrapped capture stream
    stream: S,
    /// Audio tracks disabled
    muted: bool,
    /// Video tracks disabled
    paused: bool,
    /// Captured on this device
    local: bool,
}

impl<S: CaptureStream> MediaHandle<S> {
    /// Wrap `stream` with default options
    pub fn new(stream: S) -> Self {
        Self::with_options(stream, HandleOptions::default())
    }

    /// Wrap `stream`, applying the initial muted and paused state to its tracks
    pub fn with_options(stream: S, options: HandleOptions) -> Self {
        let mut handle = Self {
            stream,
            muted: options.muted,
            paused: options.paused,
            local: options.local,
        };
        handle.set_muted(options.muted);
        handle.set_paused(options.paused);
        handle
    }

    /// Request a new capture stream from `platform` and wrap it.
    ///
    /// `constraints` defaults to audio and video. Resolves once the platform
    /// grants or denies the request; nothing is retried.
    ///
    /// # Errors
    ///
    /// With [`MediaError::UnsupportedPlatform`] if the platform exposes no
    /// capture entry point, [`MediaError::CaptureRequestFailed`] if the
    /// request is denied, and [`MediaError::InvalidConstraints`] if nothing is
    /// requested.
    ///
    /// [`MediaError::UnsupportedPlatform`]: mediahandle_media::MediaError::UnsupportedPlatform
    /// [`MediaError::CaptureRequestFailed`]: mediahandle_media::MediaError::CaptureRequestFailed
    /// [`MediaError::InvalidConstraints`]: mediahandle_media::MediaError::InvalidConstraints
    pub async fn acquire<P>(
        platform: &P,
        constraints: Option<MediaConstraints>,
        options: AcquireOptions,
    ) -> MediaResult<Self>
    where
        P: PlatformCapture<Stream = S> + ?Sized,
    {
        let constraints = constraints.unwrap_or_default();
        let stream = capture::request_stream(platform, &constraints).await?;
        Ok(Self::with_options(stream, options.into()))
    }

    /// Wrapped capture stream
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Unwrap into the capture stream
    pub fn into_stream(self) -> S {
        self.stream
    }

    /// Whether the stream was captured on this device
    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Whether audio tracks are disabled
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Disable (`true`) or enable (`false`) every audio track
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            info!(
                "{} stream {}",
                if muted { "🔇 Muting" } else { "🔊 Unmuting" },
                self.stream.id()
            );
        }
        set_tracks_enabled(&self.stream, TrackKind::Audio, !muted);
        self.muted = muted;
    }

    /// Toggle mute state
    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.muted);
    }

    /// Whether video tracks are disabled
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Disable (`true`) or enable (`false`) every video track
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(
                "{} stream {}",
                if paused { "⏸️ Pausing" } else { "▶️ Resuming" },
                self.stream.id()
            );
        }
        set_tracks_enabled(&self.stream, TrackKind::Video, !paused);
        self.paused = paused;
    }

    /// Toggle pause state
    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Attach the stream to `element`, or to a new element when `None`.
    ///
    /// Local handles mute the element itself, independent of
    /// [`is_muted`](Self::is_muted). Playback is started and the element is
    /// returned.
    ///
    /// # Errors
    ///
    /// With [`MediaError::NoOutputContext`] if no element is given and none
    /// can be created, [`MediaError::UnsupportedAttachment`] if no attachment
    /// mechanism is detected, and [`MediaError::PlaybackFailed`] if the
    /// element refuses to play.
    ///
    /// [`MediaError::NoOutputContext`]: mediahandle_media::MediaError::NoOutputContext
    /// [`MediaError::UnsupportedAttachment`]: mediahandle_media::MediaError::UnsupportedAttachment
    /// [`MediaError::PlaybackFailed`]: mediahandle_media::MediaError::PlaybackFailed
    pub fn attach<P>(&self, platform: &P, element: Option<P::Element>) -> MediaResult<P::Element>
    where
        P: PlatformRender<Stream = S> + ?Sized,
    {
        render::attach(platform, &self.stream, element, self.local)
    }

    /// Serializable snapshot of the handle and its tracks
    pub fn state(&self) -> HandleState {
        HandleState {
            stream_id: self.stream.id(),
            local: self.local,
            muted: self.muted,
            paused: self.paused,
            tracks: track_infos(&self.stream),
        }
    }
}

/// Point-in-time view of a [`MediaHandle`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandleState {
    /// Stream ID
    pub stream_id: String,
    /// Captured on this device
    pub local: bool,
    /// Audio tracks disabled
    pub muted: bool,
    /// Video tracks disabled
    pub paused: bool,
    /// Per-track state
    pub tracks: Vec<TrackInfo>,
}
