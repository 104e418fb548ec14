use axum::http::StatusCode;
use funnel_core::{MediaDirection, SdpType};
use funnel_server::{HttpRequest, HttpRequestHandler, RtcSignalingChannel, SessionControl};

use crate::integration::{create_test_device, init_tracing, test_config};
use crate::utils::{HostCall, MockHostSession, answer_for, wait_for_pending};

#[tokio::test]
async fn test_offer_reaches_waiting_session() {
    init_tracing();

    let device = create_test_device(test_config());
    let host = MockHostSession::new();

    let session = tokio::spawn({
        let device = device.clone();
        let host = host.clone();
        async move { device.start_rtc_signaling_session(&host).await }
    });
    assert!(wait_for_pending(device.pending_offers(), 1).await);

    // {"data":[111,61,49]} decodes to "o=1"
    let response = device
        .on_request(HttpRequest::post(
            "/endpoint/cam/public/",
            r#"{"data":[111,61,49]}"#,
        ))
        .await
        .expect("Expected a response");

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body, answer_for("o=1"));
    assert_eq!(host.received_offer().await.as_deref(), Some("o=1"));

    let control = session.await.unwrap().expect("Session should complete");
    assert_eq!(control.get_refresh_at().await, None);
    control.end_session().await.unwrap();

    let calls = host.calls().await;
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        HostCall::SetRemote { description, setup } => {
            assert_eq!(description.sdp_type, SdpType::Offer);
            assert_eq!(setup.video.unwrap().direction, MediaDirection::Recvonly);
            assert_eq!(setup.audio.unwrap().direction, MediaDirection::Recvonly);
            let rtc = setup.configuration.as_ref().unwrap();
            assert_eq!(rtc.ice_servers.len(), 1);
            assert_eq!(rtc.ice_candidate_pool_size, 0);
        }
        other => panic!("Expected SetRemote first, got {:?}", other),
    }
    assert_eq!(
        calls[1],
        HostCall::CreateLocal {
            sdp_type: SdpType::Answer
        }
    );
}
