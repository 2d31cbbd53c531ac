//! Unit tests for capture strategy detection and stream acquisition
//!
//! This module contains tests for the strategy priority table, constraint
//! validation, and the single request/response acquisition round-trip.

use mediahandle_media::*;

// ============================================================================
// STRATEGY DETECTION TESTS
// ============================================================================

#[test]
fn test_detect_prefers_legacy_webkit() {
    let platform = MockPlatform::with_strategies(&[
        CaptureStrategy::Standard,
        CaptureStrategy::LegacyMoz,
        CaptureStrategy::LegacyWebkit,
    ]);

    assert_eq!(
        detect_strategy(&platform),
        Some(CaptureStrategy::LegacyWebkit)
    );
}

#[test]
fn test_detect_moz_before_standard() {
    let platform =
        MockPlatform::with_strategies(&[CaptureStrategy::Standard, CaptureStrategy::LegacyMoz]);

    assert_eq!(detect_strategy(&platform), Some(CaptureStrategy::LegacyMoz));
}

#[test]
fn test_detect_nothing_on_unsupported_platform() {
    assert_eq!(detect_strategy(&MockPlatform::unsupported()), None);
}

// ============================================================================
// ACQUISITION TESTS
// ============================================================================

#[tokio::test]
async fn test_request_uses_detected_strategy_once() {
    let platform =
        MockPlatform::with_strategies(&[CaptureStrategy::LegacyMoz, CaptureStrategy::Standard]);

    let stream = request_stream(&platform, &MediaConstraints::default())
        .await
        .expect("capture should be granted");

    assert_eq!(platform.requests(), vec![CaptureStrategy::LegacyMoz]);
    assert_eq!(stream.tracks(TrackKind::Audio).len(), 1);
    assert_eq!(stream.tracks(TrackKind::Video).len(), 1);
}

#[tokio::test]
async fn test_request_honors_constraints() {
    let platform = MockPlatform::new();

    let stream = request_stream(&platform, &MediaConstraints::audio_only())
        .await
        .unwrap();

    assert_eq!(stream.tracks(TrackKind::Audio).len(), 1);
    assert!(stream.tracks(TrackKind::Video).is_empty());
}

#[tokio::test]
async fn test_request_unsupported_platform() {
    let platform = MockPlatform::unsupported();

    let result = request_stream(&platform, &MediaConstraints::default()).await;

    match result {
        Err(MediaError::UnsupportedPlatform { .. }) => (),
        other => panic!("Expected UnsupportedPlatform, got {:?}", other),
    }
    assert!(platform.requests().is_empty());
}

#[tokio::test]
async fn test_request_rejects_empty_constraints() {
    let platform = MockPlatform::new();
    let constraints = MediaConstraints {
        audio: false,
        video: false,
    };

    let result = request_stream(&platform, &constraints).await;

    assert!(matches!(result, Err(MediaError::InvalidConstraints { .. })));
    assert!(platform.requests().is_empty());
}

#[tokio::test]
async fn test_request_denied_is_not_retried() {
    let platform = MockPlatform::new().denying("NotAllowedError: Permission denied");

    let error = request_stream(&platform, &MediaConstraints::default())
        .await
        .unwrap_err();

    assert_eq!(
        error,
        MediaError::CaptureRequestFailed {
            strategy: "standard".to_string(),
            reason: "NotAllowedError: Permission denied".to_string(),
        }
    );
    assert_eq!(error.category(), ErrorCategory::Capture);
    assert_eq!(platform.requests().len(), 1);
}

#[tokio::test]
async fn test_request_waits_for_manual_grant() {
    let platform = MockPlatform::new().with_manual_grant();
    let constraints = MediaConstraints::video_only();

    let request = request_stream(&platform, &constraints);
    let grant = async {
        // Let the request register before answering it
        tokio::task::yield_now().await;
        assert_eq!(platform.pending_requests(), 1);
        assert!(platform.grant_next());
    };

    let (stream, ()) = tokio::join!(request, grant);
    let stream = stream.unwrap();

    assert_eq!(stream.tracks(TrackKind::Video).len(), 1);
    assert_eq!(platform.pending_requests(), 0);
}

#[tokio::test]
async fn test_request_manual_denial() {
    let platform = MockPlatform::new().with_manual_grant();
    let constraints = MediaConstraints::default();

    let request = request_stream(&platform, &constraints);
    let deny = async {
        tokio::task::yield_now().await;
        assert!(platform.deny_next("NotFoundError"));
    };

    let (result, ()) = tokio::join!(request, deny);

    assert!(matches!(
        result,
        Err(MediaError::CaptureRequestFailed { reason, .. }) if reason == "NotFoundError"
    ));
}

#[test]
fn test_grant_without_pending_request() {
    let platform = MockPlatform::new().with_manual_grant();
    assert!(!platform.grant_next());
    assert!(!platform.deny_next("nothing to deny"));
}
