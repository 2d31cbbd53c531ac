//! Browser capture backend (WASM)
//!
//! Wraps `MediaStream`, `MediaStreamTrack` and `HTMLMediaElement` through
//! `web-sys`. Entry points are detected at call time on the JS global
//! object, so the same build works with the prefixed legacy APIs and with
//! `navigator.mediaDevices`.

use super::{CaptureStrategy, MediaConstraints, PlatformCapture};
use crate::error::{IntoMediaError, MediaError, MediaResult};
use crate::render::{AttachMechanism, OutputElement, PlatformRender};
use crate::tracks::{CaptureStream, MediaTrack, TrackKind};
use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, HtmlMediaElement, MediaDevices, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

impl IntoMediaError for JsValue {
    fn into_media_error(self, api: &str) -> MediaError {
        js_message(&self).into_media_error(api)
    }
}

/// Best-effort text for a thrown JS value (`DOMException`, `Error`, string)
fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    let field = |key: &str| {
        Reflect::get(value, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) if !message.is_empty() => format!("{}: {}", name, message),
        (Some(name), _) => name,
        (None, Some(message)) => message,
        (None, None) => format!("{:?}", value),
    }
}

/// Defined, non-null property of a JS value
fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn constraints_js(constraints: &MediaConstraints) -> MediaStreamConstraints {
    let js = MediaStreamConstraints::new();
    js.set_audio(&JsValue::from_bool(constraints.audio));
    js.set_video(&JsValue::from_bool(constraints.video));
    js
}

/// Browser `MediaStreamTrack`
#[derive(Debug, Clone)]
pub struct WebTrack {
    track: MediaStreamTrack,
    kind: TrackKind,
}

impl WebTrack {
    /// Underlying browser track
    pub fn inner(&self) -> &MediaStreamTrack {
        &self.track
    }
}

impl MediaTrack for WebTrack {
    fn id(&self) -> String {
        self.track.id()
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.track.enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.track.set_enabled(enabled);
    }
}

/// Browser `MediaStream`
#[derive(Debug, Clone)]
pub struct WebStream(MediaStream);

impl WebStream {
    /// Underlying browser stream
    pub fn inner(&self) -> &MediaStream {
        &self.0
    }
}

impl From<MediaStream> for WebStream {
    fn from(stream: MediaStream) -> Self {
        Self(stream)
    }
}

impl CaptureStream for WebStream {
    type Track = WebTrack;

    fn id(&self) -> String {
        self.0.id()
    }

    fn tracks(&self, kind: TrackKind) -> Vec<WebTrack> {
        let list = match kind {
            TrackKind::Audio => self.0.get_audio_tracks(),
            TrackKind::Video => self.0.get_video_tracks(),
        };
        list.iter()
            .filter_map(|value| value.dyn_into::<MediaStreamTrack>().ok())
            .map(|track| WebTrack { track, kind })
            .collect()
    }
}

/// Browser `HTMLMediaElement`
#[derive(Debug, Clone)]
pub struct WebElement(HtmlMediaElement);

impl WebElement {
    /// Underlying browser element
    pub fn inner(&self) -> &HtmlMediaElement {
        &self.0
    }
}

impl From<HtmlMediaElement> for WebElement {
    fn from(element: HtmlMediaElement) -> Self {
        Self(element)
    }
}

impl OutputElement for WebElement {
    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn is_muted(&self) -> bool {
        self.0.muted()
    }

    fn play(&self) -> MediaResult<()> {
        let promise = self.0.play().map_err(|e| MediaError::PlaybackFailed {
            reason: js_message(&e),
        })?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("⚠️ Playback rejected: {}", js_message(&e));
            }
        });
        Ok(())
    }
}

/// Browser host reached through the JS global object
#[derive(Debug, Clone)]
pub struct WebPlatform {
    global: Object,
}

impl WebPlatform {
    /// Platform bound to the current JS global (`window` or worker scope)
    pub fn new() -> Self {
        Self {
            global: js_sys::global(),
        }
    }

    fn navigator(&self) -> Option<JsValue> {
        property(&self.global, "navigator")
    }

    fn legacy_entry(&self, key: &str) -> Option<(JsValue, Function)> {
        let navigator = self.navigator()?;
        let entry = property(&navigator, key)?.dyn_into::<Function>().ok()?;
        Some((navigator, entry))
    }

    fn media_devices(&self) -> Option<MediaDevices> {
        let devices = property(&self.navigator()?, "mediaDevices")?;
        property(&devices, "getUserMedia")?
            .dyn_into::<Function>()
            .ok()?;
        devices.dyn_into::<MediaDevices>().ok()
    }

    fn legacy_key(strategy: CaptureStrategy) -> &'static str {
        match strategy {
            CaptureStrategy::LegacyWebkit => "webkitGetUserMedia",
            CaptureStrategy::LegacyMoz => "mozGetUserMedia",
            CaptureStrategy::Standard => "getUserMedia",
        }
    }

    /// Callback-style `navigator.*GetUserMedia(constraints, ok, err)`,
    /// bridged into a promise so the caller can await it.
    async fn request_legacy(
        &self,
        strategy: CaptureStrategy,
        constraints: &MediaConstraints,
    ) -> MediaResult<WebStream> {
        let key = Self::legacy_key(strategy);
        let (navigator, entry) =
            self.legacy_entry(key)
                .ok_or_else(|| MediaError::UnsupportedPlatform {
                    operation: key.to_string(),
                })?;
        let js_constraints = constraints_js(constraints);

        let mut call_error = None;
        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(e) = entry.call3(&navigator, &js_constraints, &resolve, &reject) {
                call_error = Some(e);
            }
        });
        if let Some(e) = call_error {
            return Err(e.into_media_error(key));
        }

        debug!("⏳ Waiting on {} callbacks", key);
        Self::settle(strategy, JsFuture::from(promise).await)
    }

    async fn request_standard(&self, constraints: &MediaConstraints) -> MediaResult<WebStream> {
        let devices = self
            .media_devices()
            .ok_or_else(|| MediaError::UnsupportedPlatform {
                operation: "mediaDevices.getUserMedia".to_string(),
            })?;
        let promise = devices
            .get_user_media_with_constraints(&constraints_js(constraints))
            .map_err(|e| e.into_media_error("mediaDevices.getUserMedia"))?;

        Self::settle(CaptureStrategy::Standard, JsFuture::from(promise).await)
    }

    fn settle(
        strategy: CaptureStrategy,
        outcome: Result<JsValue, JsValue>,
    ) -> MediaResult<WebStream> {
        match outcome {
            Ok(value) => value
                .dyn_into::<MediaStream>()
                .map(WebStream)
                .map_err(|value| MediaError::Platform {
                    api: strategy.name().to_string(),
                    message: format!("granted value is not a MediaStream: {:?}", value),
                }),
            Err(e) => Err(MediaError::CaptureRequestFailed {
                strategy: strategy.name().to_string(),
                reason: js_message(&e),
            }),
        }
    }

    fn object_url(&self, stream: &WebStream) -> MediaResult<String> {
        const API: &str = "URL.createObjectURL";
        let url = property(&self.global, "URL")
            .or_else(|| property(&self.global, "webkitURL"))
            .ok_or_else(|| "URL is not defined".into_media_error(API))?;
        let create = property(&url, "createObjectURL")
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| "createObjectURL is not a function".into_media_error(API))?;
        create
            .call1(&url, &stream.0)
            .map_err(|e| e.into_media_error(API))?
            .as_string()
            .ok_or_else(|| "createObjectURL returned a non-string".into_media_error(API))
    }
}

impl Default for WebPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PlatformCapture for WebPlatform {
    type Stream = WebStream;

    fn supports(&self, strategy: CaptureStrategy) -> bool {
        match strategy {
            CaptureStrategy::LegacyWebkit | CaptureStrategy::LegacyMoz => {
                self.legacy_entry(Self::legacy_key(strategy)).is_some()
            }
            CaptureStrategy::Standard => self.media_devices().is_some(),
        }
    }

    async fn request_stream(
        &self,
        strategy: CaptureStrategy,
        constraints: &MediaConstraints,
    ) -> MediaResult<WebStream> {
        match strategy {
            CaptureStrategy::LegacyWebkit | CaptureStrategy::LegacyMoz => {
                self.request_legacy(strategy, constraints).await
            }
            CaptureStrategy::Standard => self.request_standard(constraints).await,
        }
    }
}

impl PlatformRender for WebPlatform {
    type Element = WebElement;

    fn create_element(&self) -> Option<WebElement> {
        let document = property(&self.global, "document")?
            .dyn_into::<Document>()
            .ok()?;
        let element = document.create_element("video").ok()?;
        element.dyn_into::<HtmlMediaElement>().ok().map(WebElement)
    }

    fn bind(
        &self,
        element: &WebElement,
        stream: &WebStream,
        mechanism: AttachMechanism,
    ) -> MediaResult<()> {
        match mechanism {
            AttachMechanism::ObjectUrl => {
                let url = self.object_url(stream)?;
                element.0.set_src(&url);
            }
            AttachMechanism::MozSrcObject => {
                Reflect::set(&element.0, &JsValue::from_str("mozSrcObject"), &stream.0)
                    .map_err(|e| e.into_media_error("mozSrcObject"))?;
            }
            AttachMechanism::SrcObject => element.0.set_src_object(Some(&stream.0)),
        }
        Ok(())
    }
}
