use crate::error::{Result, WhipError};
use crate::rendezvous::OfferSlot;
use crate::signaling::SignalingSession;
use async_trait::async_trait;
use funnel_core::{SdpType, SessionDescription, SetupOptions};
use std::sync::Arc;
use tracing::debug;

/// Сессия удаленной камеры. Может только отдать свой оффер и принять ответ;
/// принятый ответ уходит в слот, где его ждет HTTP-запрос.
pub struct CameraSession {
    offer: String,
    slot: Arc<OfferSlot>,
}

impl CameraSession {
    pub fn new(offer: String, slot: Arc<OfferSlot>) -> Self {
        Self { offer, slot }
    }

    pub fn local_offer(&self) -> SessionDescription {
        SessionDescription::offer(self.offer.clone())
    }
}

#[async_trait]
impl SignalingSession for CameraSession {
    async fn create_local_description(
        &self,
        sdp_type: SdpType,
        _setup: &SetupOptions,
    ) -> Result<SessionDescription> {
        if sdp_type != SdpType::Offer {
            return Err(WhipError::ProtocolViolation(format!(
                "camera session can only create offers, {sdp_type} requested"
            )));
        }
        Ok(self.local_offer())
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
        _setup: &SetupOptions,
    ) -> Result<()> {
        if description.sdp_type != SdpType::Answer {
            return Err(WhipError::ProtocolViolation(format!(
                "camera session can only accept answers, got {}",
                description.sdp_type
            )));
        }

        if !self.slot.resolve_answer(description.sdp) {
            debug!(
                "Answer for {} arrived after the ingest request gave up",
                self.slot.id()
            );
        }
        Ok(())
    }
}
