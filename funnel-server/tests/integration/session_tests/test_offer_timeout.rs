use axum::http::StatusCode;
use funnel_server::{HttpRequestHandler, RtcSignalingChannel, WhipError};

use crate::integration::{create_test_device, init_tracing, test_config};
use crate::utils::{MockHostSession, ingest_request, wait_for_pending};

#[tokio::test(start_paused = true)]
async fn test_offer_timeout_then_late_post() {
    init_tracing();

    let device = create_test_device(test_config());
    let host = MockHostSession::new();

    let result = device.start_rtc_signaling_session(&host).await;
    assert!(matches!(result.err(), Some(WhipError::Timeout(_))));
    assert!(host.calls().await.is_empty(), "Host must not be touched");

    // The timed-out session took its slot with it, so nothing is pending.
    let response = device.on_request(ingest_request("o=1")).await.unwrap();
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(device.pending_offers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_next_session_after_timeout_still_works() {
    init_tracing();

    let device = create_test_device(test_config());
    let host = MockHostSession::new();

    assert!(device.start_rtc_signaling_session(&host).await.is_err());

    let session = tokio::spawn({
        let device = device.clone();
        let host = host.clone();
        async move { device.start_rtc_signaling_session(&host).await }
    });
    assert!(wait_for_pending(device.pending_offers(), 1).await);

    let response = device.on_request(ingest_request("o=2")).await.unwrap();
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(session.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_timeouts_do_not_grow_queue() {
    init_tracing();

    let device = create_test_device(test_config());
    let host = MockHostSession::new();

    for _ in 0..100 {
        let result = device.start_rtc_signaling_session(&host).await;
        assert!(matches!(result.err(), Some(WhipError::Timeout(_))));
    }

    assert_eq!(device.pending_offers().len(), 0);
}
