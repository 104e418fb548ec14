use axum::Router;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::device::DeviceRegistry;
use crate::error::WhipError;
use crate::ingest::HttpRequest;
use funnel_core::DeviceId;

pub const INGEST_ROUTE: &str = "/endpoint/{device_id}/public/";

pub fn router(devices: DeviceRegistry) -> Router {
    Router::new()
        .route(INGEST_ROUTE, post(handle_ingest))
        .with_state(devices)
}

/// POST /endpoint/{device_id}/public/
pub async fn handle_ingest(
    Path(device_id): Path<String>,
    State(devices): State<DeviceRegistry>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let device_id = DeviceId::from(device_id);

    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(e) => {
            warn!("Non UTF-8 body for {}: {}", device_id, e);
            return WhipError::MalformedPayload(e.to_string()).into_response();
        }
    };

    let request = HttpRequest {
        method: method.to_string(),
        url: uri.to_string(),
        body: Some(body),
    };

    match devices.route(&device_id, request).await {
        Ok(Some(response)) => response.into_response(),
        // Ядро на такие запросы не отвечает, а HTTP-клиенту что-то вернуть нужно.
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            debug!("Ingest request for {} rejected: {}", device_id, e);
            e.into_response()
        }
    }
}
