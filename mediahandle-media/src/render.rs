//! Binding capture streams to output elements
//!
//! An output element is whatever surface plays a stream back, e.g. a
//! `<video>` element in a browser. Binding picks exactly one attachment
//! mechanism, chosen from the capture strategy the host exposes.

use crate::capture::{detect_strategy, PlatformCapture};
use crate::error::{MediaError, MediaResult};
use crate::tracks::CaptureStream;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Ways to hand a stream to an output element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachMechanism {
    /// `element.src = URL.createObjectURL(stream)`
    ObjectUrl,
    /// `element.mozSrcObject = stream`
    MozSrcObject,
    /// `element.srcObject = stream`
    SrcObject,
}

impl fmt::Display for AttachMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttachMechanism::ObjectUrl => "object-url",
            AttachMechanism::MozSrcObject => "moz-src-object",
            AttachMechanism::SrcObject => "src-object",
        };
        f.write_str(name)
    }
}

/// Playback surface a stream can be attached to
pub trait OutputElement {
    /// Mute or unmute the element's own audio output
    fn set_muted(&self, muted: bool);

    /// Whether the element's own audio output is muted
    fn is_muted(&self) -> bool;

    /// Start playback
    fn play(&self) -> MediaResult<()>;
}

/// Host platform rendering backend
pub trait PlatformRender: PlatformCapture {
    /// Output element type
    type Element: OutputElement;

    /// Create a fresh output element, or `None` without a document context
    fn create_element(&self) -> Option<Self::Element>;

    /// Assign `stream` as the element's source using `mechanism`
    fn bind(
        &self,
        element: &Self::Element,
        stream: &Self::Stream,
        mechanism: AttachMechanism,
    ) -> MediaResult<()>;
}

/// Attach `stream` to `element`, creating one when none is given.
///
/// `local` mutes the element itself so locally captured audio is not played
/// back into the microphone. Playback is started before returning.
pub fn attach<P: PlatformRender + ?Sized>(
    platform: &P,
    stream: &P::Stream,
    element: Option<P::Element>,
    local: bool,
) -> MediaResult<P::Element> {
    let element = match element {
        Some(element) => element,
        None => {
            debug!("🖼️ No output element supplied, creating one");
            platform
                .create_element()
                .ok_or(MediaError::NoOutputContext)?
        }
    };

    let mechanism = detect_strategy(platform)
        .map(|strategy| strategy.attach_mechanism())
        .ok_or(MediaError::UnsupportedAttachment)?;

    platform.bind(&element, stream, mechanism)?;

    if local {
        element.set_muted(true);
    }

    element.play()?;

    info!(
        "📺 Attached stream {} via {} (local: {})",
        stream.id(),
        mechanism,
        local
    );
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mechanism_display() {
        assert_eq!(AttachMechanism::ObjectUrl.to_string(), "object-url");
        assert_eq!(AttachMechanism::MozSrcObject.to_string(), "moz-src-object");
        assert_eq!(AttachMechanism::SrcObject.to_string(), "src-object");
    }
}
