use funnel_server::{HttpRequest, HttpRequestHandler, RtcSignalingChannel};

use crate::integration::{create_test_device, init_tracing, test_config};
use crate::utils::{MockHostSession, ingest_request, wait_for_pending};

#[tokio::test]
async fn test_empty_body_is_ignored() {
    init_tracing();

    let device = create_test_device(test_config());
    let host = MockHostSession::new();

    let session = tokio::spawn({
        let device = device.clone();
        let host = host.clone();
        async move { device.start_rtc_signaling_session(&host).await }
    });
    assert!(wait_for_pending(device.pending_offers(), 1).await);

    let response = device
        .on_request(HttpRequest::post("/endpoint/cam/public/", "{}"))
        .await;
    assert!(response.is_none(), "{{}} must not produce a response");
    assert_eq!(device.pending_offers().len(), 1, "No slot consumed");
    assert!(host.received_offer().await.is_none());

    // The slot is still live, so a real offer goes through afterwards.
    let response = device.on_request(ingest_request("v=0")).await.unwrap();
    assert_eq!(response.status, axum::http::StatusCode::CREATED);
    assert!(session.await.unwrap().is_ok());
}
