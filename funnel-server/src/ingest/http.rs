use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::WhipError;

/// Запрос в том виде, в котором его передает транспорт хоста.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_owned(),
            url: url.into(),
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl IngestResponse {
    pub fn created(answer_sdp: String) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: answer_sdp,
        }
    }
}

impl From<&WhipError> for IngestResponse {
    fn from(err: &WhipError) -> Self {
        Self {
            status: err.status_code(),
            body: err.client_message().to_owned(),
        }
    }
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        let content_type = if self.status == StatusCode::CREATED {
            "application/sdp"
        } else {
            "text/plain; charset=utf-8"
        };
        (self.status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

impl IntoResponse for WhipError {
    fn into_response(self) -> Response {
        IngestResponse::from(&self).into_response()
    }
}
