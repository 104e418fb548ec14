use axum::http::StatusCode;
use funnel_server::HttpRequestHandler;

use crate::integration::{create_test_device, init_tracing, test_config};
use crate::utils::ingest_request;

#[tokio::test]
async fn test_no_pending_connection() {
    init_tracing();

    let device = create_test_device(test_config());

    let response = device.on_request(ingest_request("o=1")).await.unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, "No pending connection");
}

#[tokio::test]
async fn test_empty_sdp_is_rejected() {
    init_tracing();

    let device = create_test_device(test_config());

    let response = device.on_request(ingest_request("")).await.unwrap();

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "No SDP provided");
}
