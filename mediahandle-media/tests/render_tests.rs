//! Unit tests for binding capture streams to output elements
//!
//! This module contains tests for element creation, attachment mechanism
//! selection, local feedback muting, and playback start.

use mediahandle_media::*;

// ============================================================================
// ELEMENT ACQUISITION TESTS
// ============================================================================

#[test]
fn test_attach_creates_element_when_none_supplied() {
    let platform = MockPlatform::new();
    let stream = MockStream::with_tracks(1, 1);

    let element = attach(&platform, &stream, None, false).unwrap();

    assert_eq!(platform.created_elements(), 1);
    assert!(element.is_playing());
}

#[test]
fn test_attach_without_document_fails() {
    let platform = MockPlatform::new().without_document();
    let stream = MockStream::with_tracks(1, 1);

    let result = attach(&platform, &stream, None, true);

    assert!(matches!(result, Err(MediaError::NoOutputContext)));
}

#[test]
fn test_attach_without_document_uses_supplied_element() {
    let platform = MockPlatform::new().without_document();
    let stream = MockStream::with_tracks(1, 1);
    let existing = MockElement::new();

    let element = attach(&platform, &stream, Some(existing.clone()), false).unwrap();

    assert!(element.same_element(&existing));
    assert_eq!(platform.created_elements(), 0);
}

// ============================================================================
// ATTACHMENT MECHANISM TESTS
// ============================================================================

#[test]
fn test_attach_webkit_uses_object_url() {
    let platform = MockPlatform::with_strategies(&[CaptureStrategy::LegacyWebkit]);
    let stream = MockStream::with_tracks(1, 1);

    let element = attach(&platform, &stream, None, false).unwrap();
    let state = element.state();

    assert_eq!(state.src, Some(format!("blob:mock/{}", stream.id())));
    assert!(state.src_object.is_none());
    assert!(state.moz_src_object.is_none());
}

#[test]
fn test_attach_moz_uses_moz_src_object() {
    let platform = MockPlatform::with_strategies(&[CaptureStrategy::LegacyMoz]);
    let stream = MockStream::with_tracks(1, 1);

    let state = attach(&platform, &stream, None, false).unwrap().state();

    assert_eq!(state.moz_src_object, Some(stream.id()));
    assert!(state.src.is_none());
}

#[test]
fn test_attach_standard_uses_src_object() {
    let platform = MockPlatform::new();
    let stream = MockStream::with_tracks(0, 1);

    let state = attach(&platform, &stream, None, false).unwrap().state();

    assert_eq!(state.src_object, Some(stream.id()));
}

#[test]
fn test_attach_only_one_mechanism_when_several_detected() {
    let platform = MockPlatform::with_strategies(&[
        CaptureStrategy::LegacyWebkit,
        CaptureStrategy::LegacyMoz,
        CaptureStrategy::Standard,
    ]);
    let stream = MockStream::with_tracks(1, 1);

    let state = attach(&platform, &stream, None, false).unwrap().state();

    assert!(state.src.is_some());
    assert!(state.moz_src_object.is_none());
    assert!(state.src_object.is_none());
}

#[test]
fn test_attach_unsupported_after_element_created() {
    let platform = MockPlatform::unsupported();
    let stream = MockStream::with_tracks(1, 1);

    let result = attach(&platform, &stream, None, false);

    assert!(matches!(result, Err(MediaError::UnsupportedAttachment)));
    assert_eq!(platform.created_elements(), 1);
}

// ============================================================================
// MUTING AND PLAYBACK TESTS
// ============================================================================

#[test]
fn test_attach_local_mutes_element() {
    let platform = MockPlatform::new();
    let stream = MockStream::with_tracks(1, 1);

    let element = attach(&platform, &stream, None, true).unwrap();

    assert!(element.is_muted());
}

#[test]
fn test_attach_remote_leaves_element_audible() {
    let platform = MockPlatform::new();
    let stream = MockStream::with_tracks(1, 1);

    let element = attach(&platform, &stream, None, false).unwrap();

    assert!(!element.is_muted());
}

#[test]
fn test_attach_reports_playback_refusal() {
    let platform = MockPlatform::new();
    let stream = MockStream::with_tracks(1, 1);
    let element = MockElement::refusing_playback();

    let result = attach(&platform, &stream, Some(element.clone()), true);

    assert!(matches!(result, Err(MediaError::PlaybackFailed { .. })));
    assert_eq!(element.state().play_calls, 1);
    assert!(!element.is_playing());
}
