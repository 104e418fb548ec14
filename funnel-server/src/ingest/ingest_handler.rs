use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{Result, WhipError};
use crate::ingest::{HttpRequest, IngestResponse};
use crate::rendezvous::{OfferSlot, PendingOfferRegistry};
use funnel_core::{DeviceId, IngestBody};

/// HTTP-сторона рандеву: разбирает оффер, отдает его ждущей сессии
/// и коротко ждет SDP-ответ.
pub struct IngestionRequestHandler {
    device_id: DeviceId,
    registry: Arc<PendingOfferRegistry>,
    answer_timeout: Duration,
}

impl IngestionRequestHandler {
    pub fn new(
        device_id: DeviceId,
        registry: Arc<PendingOfferRegistry>,
        answer_timeout: Duration,
    ) -> Self {
        Self {
            device_id,
            registry,
            answer_timeout,
        }
    }

    /// `None` означает "ответа нет": пустое тело или `{}`.
    pub async fn on_request(&self, request: &HttpRequest) -> Option<IngestResponse> {
        let body = request.body.as_deref()?;
        if body.is_empty() || body == IngestBody::EMPTY_MARKER {
            debug!("Ignoring empty {} {}", request.method, request.url);
            return None;
        }

        let response = match self.ingest(body).await {
            Ok(answer) => IngestResponse::created(answer),
            Err(e) => {
                self.log_failure(&e);
                IngestResponse::from(&e)
            }
        };
        Some(response)
    }

    async fn ingest(&self, body: &str) -> Result<String> {
        let offer = parse_offer(body)?;
        debug!("Ingest offer for {}:\n{}", self.device_id, offer);

        if self.registry.is_empty() {
            return Err(WhipError::NoPendingSession);
        }
        let slot = self.deliver(offer).ok_or(WhipError::NoPendingSession)?;

        let answer = slot.await_answer(self.answer_timeout).await?;
        info!("Answered ingest request for {} ({})", self.device_id, slot.id());
        Ok(answer)
    }

    /// Снимает живые слоты, пока один не примет оффер. Слот может быть брошен
    /// между снятием и заполнением; такие пропускаются.
    fn deliver(&self, offer: String) -> Option<Arc<OfferSlot>> {
        while let Some(slot) = self.registry.claim_next() {
            if slot.fulfill(offer.clone()) {
                return Some(slot);
            }
        }
        None
    }

    fn log_failure(&self, err: &WhipError) {
        match err {
            WhipError::EmptyOffer | WhipError::MalformedPayload(_) => {
                warn!("Rejected ingest request for {}: {}", self.device_id, err)
            }
            WhipError::NoPendingSession => {
                warn!("No pending connection for {}", self.device_id)
            }
            WhipError::Timeout(_) => {
                warn!("Timeout waiting for answer on {}: {}", self.device_id, err)
            }
            _ => error!("Error processing request for {}: {}", self.device_id, err),
        }
    }
}

fn parse_offer(body: &str) -> Result<String> {
    let envelope: IngestBody =
        serde_json::from_str(body).map_err(|e| WhipError::MalformedPayload(e.to_string()))?;
    let offer = envelope
        .into_sdp()
        .map_err(|e| WhipError::MalformedPayload(e.to_string()))?;

    if offer.is_empty() {
        return Err(WhipError::EmptyOffer);
    }
    Ok(offer)
}
