//! Ошибки рандеву оффер/ответ и их отображение в HTTP-статусы.

use axum::http::StatusCode;
use funnel_core::DeviceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhipError {
    /// Описание неверного типа там, где требуется "offer" или "answer".
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// Ожидание оффера или ответа превысило лимит.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// В очереди устройства нет живого слота.
    #[error("No pending connection")]
    NoPendingSession,

    /// Тело запроса не JSON или не UTF-8.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("No SDP provided")]
    EmptyOffer,

    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// Слот закрыт до того, как его успели заполнить (устройство удалено).
    #[error("Slot closed: {0}")]
    Closed(String),

    /// Ошибка, пришедшая от хост-платформы.
    #[error("Host error: {0}")]
    Host(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WhipError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WhipError::EmptyOffer | WhipError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WhipError::DeviceNotFound(_) => StatusCode::NOT_FOUND,
            WhipError::NoPendingSession => StatusCode::SERVICE_UNAVAILABLE,
            WhipError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            WhipError::ProtocolViolation(_)
            | WhipError::Closed(_)
            | WhipError::Host(_)
            | WhipError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Короткий тег для тела HTTP-ответа. Текст внутренних ошибок наружу не уходит.
    pub fn client_message(&self) -> &'static str {
        match self {
            WhipError::EmptyOffer => "No SDP provided",
            WhipError::MalformedPayload(_) => "Malformed payload",
            WhipError::DeviceNotFound(_) => "Device not found",
            WhipError::NoPendingSession => "No pending connection",
            WhipError::Timeout(_) => "Timeout waiting for answer",
            _ => "Internal error",
        }
    }
}

pub type Result<T> = std::result::Result<T, WhipError>;
