use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use funnel_core::DeviceId;
use funnel_server::{RtcSignalingChannel, router};
use tower::ServiceExt;

use crate::integration::{create_test_registry, init_tracing, test_config};
use crate::utils::{MockHostSession, answer_for, ingest_body, wait_for_pending};

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_route_answers_offer() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    let device = registry.get_device(&DeviceId::from("cam"));
    let host = MockHostSession::new();

    let session = tokio::spawn({
        let device = device.clone();
        let host = host.clone();
        async move { device.start_rtc_signaling_session(&host).await }
    });
    assert!(wait_for_pending(device.pending_offers(), 1).await);

    let response = router(registry)
        .oneshot(post("/endpoint/cam/public/", ingest_body("v=0")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/sdp"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, answer_for("v=0").as_bytes());

    assert!(session.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_route_unknown_device() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());

    let response = router(registry)
        .oneshot(post("/endpoint/ghost/public/", ingest_body("v=0")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, "Device not found".as_bytes());
}

#[tokio::test]
async fn test_route_empty_marker_has_no_content() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    registry.get_device(&DeviceId::from("cam"));

    let response = router(registry)
        .oneshot(post("/endpoint/cam/public/", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_route_rejects_non_utf8_body() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    registry.get_device(&DeviceId::from("cam"));

    let response = router(registry)
        .oneshot(post("/endpoint/cam/public/", vec![0xff, 0xfe, 0x00]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_route_without_pending_session() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    registry.get_device(&DeviceId::from("cam"));

    let response = router(registry)
        .oneshot(post("/endpoint/cam/public/", ingest_body("v=0")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
