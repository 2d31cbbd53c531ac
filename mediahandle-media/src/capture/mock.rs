//! In-memory capture backend
//!
//! Fake streams, tracks and output elements for hosts without a browser and
//! for tests. The platform can be told which capture strategies it exposes,
//! whether it has a document, and whether requests are granted right away,
//! denied, or held until [`MockPlatform::grant_next`] is called.

use super::{CaptureStrategy, MediaConstraints, PlatformCapture};
use crate::error::{MediaError, MediaResult};
use crate::render::{AttachMechanism, OutputElement, PlatformRender};
use crate::tracks::{CaptureStream, MediaTrack, TrackKind};
use async_trait::async_trait;
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Fake track with a shared enabled flag
#[derive(Debug, Clone)]
pub struct MockTrack {
    id: String,
    kind: TrackKind,
    enabled: Arc<AtomicBool>,
}

impl MockTrack {
    /// Create an enabled track of `kind`
    pub fn new(kind: TrackKind) -> Self {
        Self {
            id: next_id(kind.as_str()),
            kind,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MediaTrack for MockTrack {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

/// Fake capture stream. Clones share the same track list.
#[derive(Debug, Clone)]
pub struct MockStream {
    id: String,
    tracks: Arc<Mutex<Vec<MockTrack>>>,
}

impl MockStream {
    /// Empty stream
    pub fn new() -> Self {
        Self {
            id: next_id("stream"),
            tracks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stream with the given number of audio and video tracks
    pub fn with_tracks(audio: usize, video: usize) -> Self {
        let stream = Self::new();
        for _ in 0..audio {
            stream.add_track(TrackKind::Audio);
        }
        for _ in 0..video {
            stream.add_track(TrackKind::Video);
        }
        stream
    }

    /// Stream with one track per requested kind
    pub fn from_constraints(constraints: &MediaConstraints) -> Self {
        Self::with_tracks(constraints.audio as usize, constraints.video as usize)
    }

    /// Append a new enabled track and return a handle to it
    pub fn add_track(&self, kind: TrackKind) -> MockTrack {
        let track = MockTrack::new(kind);
        self.tracks.lock().push(track.clone());
        track
    }

    /// Total number of tracks
    pub fn track_count(&self) -> usize {
        self.tracks.lock().len()
    }
}

impl Default for MockStream {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStream for MockStream {
    type Track = MockTrack;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn tracks(&self, kind: TrackKind) -> Vec<MockTrack> {
        self.tracks
            .lock()
            .iter()
            .filter(|track| track.kind == kind)
            .cloned()
            .collect()
    }
}

/// Observable state of a [`MockElement`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElementState {
    /// Value assigned to `src`
    pub src: Option<String>,
    /// Stream ID assigned to `srcObject`
    pub src_object: Option<String>,
    /// Stream ID assigned to `mozSrcObject`
    pub moz_src_object: Option<String>,
    /// Element audio output muted
    pub muted: bool,
    /// Playback started
    pub playing: bool,
    /// Number of `play` calls
    pub play_calls: usize,
}

/// Fake output element. Clones refer to the same element.
#[derive(Debug, Clone)]
pub struct MockElement {
    state: Arc<Mutex<MockElementState>>,
    refuse_playback: bool,
}

impl MockElement {
    /// Create a new element
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockElementState::default())),
            refuse_playback: false,
        }
    }

    /// Element whose `play` always fails
    pub fn refusing_playback() -> Self {
        Self {
            refuse_playback: true,
            ..Self::new()
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> MockElementState {
        self.state.lock().clone()
    }

    /// Whether playback was started
    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    /// Whether `other` is the same element
    pub fn same_element(&self, other: &MockElement) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for MockElement {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputElement for MockElement {
    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.state.lock().muted
    }

    fn play(&self) -> MediaResult<()> {
        let mut state = self.state.lock();
        state.play_calls += 1;
        if self.refuse_playback {
            return Err(MediaError::PlaybackFailed {
                reason: "playback refused by element".to_string(),
            });
        }
        state.playing = true;
        Ok(())
    }
}

type PendingGrant = (MediaConstraints, oneshot::Sender<MediaResult<MockStream>>);

/// Configurable fake host platform
#[derive(Debug)]
pub struct MockPlatform {
    strategies: Vec<CaptureStrategy>,
    has_document: bool,
    denial: Option<String>,
    manual_grant: bool,
    pending: Mutex<VecDeque<PendingGrant>>,
    requests: Mutex<Vec<CaptureStrategy>>,
    created_elements: AtomicUsize,
}

impl MockPlatform {
    /// Platform with the standard entry point and a document
    pub fn new() -> Self {
        Self::with_strategies(&[CaptureStrategy::Standard])
    }

    /// Platform exposing exactly `strategies`, with a document
    pub fn with_strategies(strategies: &[CaptureStrategy]) -> Self {
        Self {
            strategies: strategies.to_vec(),
            has_document: true,
            denial: None,
            manual_grant: false,
            pending: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            created_elements: AtomicUsize::new(0),
        }
    }

    /// Platform with no capture entry point at all
    pub fn unsupported() -> Self {
        Self::with_strategies(&[])
    }

    /// Remove the document context
    pub fn without_document(mut self) -> Self {
        self.has_document = false;
        self
    }

    /// Deny every capture request with `reason`
    pub fn denying(mut self, reason: impl Into<String>) -> Self {
        self.denial = Some(reason.into());
        self
    }

    /// Hold capture requests until granted or denied explicitly
    pub fn with_manual_grant(mut self) -> Self {
        self.manual_grant = true;
        self
    }

    /// Strategies used by issued requests, in order
    pub fn requests(&self) -> Vec<CaptureStrategy> {
        self.requests.lock().clone()
    }

    /// Number of requests waiting for a grant
    pub fn pending_requests(&self) -> usize {
        self.pending.lock().len()
    }

    /// Number of elements created by this platform
    pub fn created_elements(&self) -> usize {
        self.created_elements.load(Ordering::SeqCst)
    }

    /// Grant the oldest pending request; false if none is pending
    pub fn grant_next(&self) -> bool {
        match self.pending.lock().pop_front() {
            Some((constraints, tx)) => {
                let _ = tx.send(Ok(MockStream::from_constraints(&constraints)));
                true
            }
            None => false,
        }
    }

    /// Deny the oldest pending request; false if none is pending
    pub fn deny_next(&self, reason: impl Into<String>) -> bool {
        match self.pending.lock().pop_front() {
            Some((_, tx)) => {
                let _ = tx.send(Err(MediaError::CaptureRequestFailed {
                    strategy: "manual".to_string(),
                    reason: reason.into(),
                }));
                true
            }
            None => false,
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PlatformCapture for MockPlatform {
    type Stream = MockStream;

    fn supports(&self, strategy: CaptureStrategy) -> bool {
        self.strategies.contains(&strategy)
    }

    async fn request_stream(
        &self,
        strategy: CaptureStrategy,
        constraints: &MediaConstraints,
    ) -> MediaResult<MockStream> {
        self.requests.lock().push(strategy);

        if let Some(reason) = &self.denial {
            return Err(MediaError::CaptureRequestFailed {
                strategy: strategy.name().to_string(),
                reason: reason.clone(),
            });
        }

        if !self.manual_grant {
            return Ok(MockStream::from_constraints(constraints));
        }

        let (tx, rx) = oneshot::channel();
        self.pending.lock().push_back((*constraints, tx));
        debug!("⏳ Mock capture request via {} pending", strategy);

        rx.await.map_err(|_| MediaError::CaptureRequestFailed {
            strategy: strategy.name().to_string(),
            reason: "request abandoned by platform".to_string(),
        })?
    }
}

impl PlatformRender for MockPlatform {
    type Element = MockElement;

    fn create_element(&self) -> Option<MockElement> {
        if !self.has_document {
            return None;
        }
        self.created_elements.fetch_add(1, Ordering::SeqCst);
        Some(MockElement::new())
    }

    fn bind(
        &self,
        element: &MockElement,
        stream: &MockStream,
        mechanism: AttachMechanism,
    ) -> MediaResult<()> {
        let mut state = element.state.lock();
        match mechanism {
            AttachMechanism::ObjectUrl => state.src = Some(format!("blob:mock/{}", stream.id)),
            AttachMechanism::MozSrcObject => state.moz_src_object = Some(stream.id.clone()),
            AttachMechanism::SrcObject => state.src_object = Some(stream.id.clone()),
        }
        Ok(())
    }
}
