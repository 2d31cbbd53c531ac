//! Track and capture stream abstractions

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Media kind carried by a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Audio track (microphone)
    Audio,
    /// Video track (camera)
    Video,
}

impl TrackKind {
    /// Kind name as reported by the platform (`"audio"` / `"video"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
        }
    }

    /// Parse a platform kind name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "audio" => Some(TrackKind::Audio),
            "video" => Some(TrackKind::Video),
            _ => None,
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One media channel within a capture stream.
///
/// Implementations are handles onto platform state, so enabling takes
/// `&self` the same way a browser `MediaStreamTrack` does.
pub trait MediaTrack {
    /// Track ID
    fn id(&self) -> String;

    /// Track kind
    fn kind(&self) -> TrackKind;

    /// Whether the track is currently enabled
    fn is_enabled(&self) -> bool;

    /// Enable or disable the track
    fn set_enabled(&self, enabled: bool);
}

/// Platform-provided live audio/video source
pub trait CaptureStream: fmt::Debug {
    /// Track handle type
    type Track: MediaTrack;

    /// Stream ID
    fn id(&self) -> String;

    /// Tracks of the given kind present right now
    fn tracks(&self, kind: TrackKind) -> Vec<Self::Track>;
}

/// Snapshot of a single track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track ID
    pub id: String,
    /// Track kind
    pub kind: TrackKind,
    /// Enabled flag at snapshot time
    pub enabled: bool,
}

impl TrackInfo {
    /// Capture the current state of a track
    pub fn of<T: MediaTrack>(track: &T) -> Self {
        Self {
            id: track.id(),
            kind: track.kind(),
            enabled: track.is_enabled(),
        }
    }
}

/// Set `enabled` on every track of `kind` currently in `stream`.
///
/// Only tracks present at the time of the call are touched. Returns how many
/// tracks were updated.
pub fn set_tracks_enabled<S: CaptureStream + ?Sized>(
    stream: &S,
    kind: TrackKind,
    enabled: bool,
) -> usize {
    let tracks = stream.tracks(kind);
    for track in &tracks {
        track.set_enabled(enabled);
    }
    debug!(
        "🎚️ Stream {}: set {} {} track(s) enabled={}",
        stream.id(),
        tracks.len(),
        kind,
        enabled
    );
    tracks.len()
}

/// Snapshot every audio and video track of `stream`
pub fn track_infos<S: CaptureStream + ?Sized>(stream: &S) -> Vec<TrackInfo> {
    [TrackKind::Audio, TrackKind::Video]
        .into_iter()
        .flat_map(|kind| stream.tracks(kind))
        .map(|track| TrackInfo::of(&track))
        .collect()
}
