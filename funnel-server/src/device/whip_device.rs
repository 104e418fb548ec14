use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::IngestConfig;
use crate::device::capabilities::{HttpRequestHandler, RtcSignalingChannel, Settings, VideoCamera};
use crate::device::settings::endpoint_settings;
use crate::device::{HostEnvironment, MediaObject, RTC_SIGNALING_CHANNEL_MIME};
use crate::error::Result;
use crate::ingest::{HttpRequest, IngestResponse, IngestionRequestHandler};
use crate::rendezvous::PendingOfferRegistry;
use crate::signaling::{SessionControl, SignalingSession, SignalingSessionCoordinator};
use funnel_core::{DeviceId, Setting, StreamOptions};

/// WHIP-камера: один объект с несколькими узкими возможностями.
/// Очередь офферов принадлежит устройству и больше никому.
pub struct WhipDevice {
    id: DeviceId,
    name: String,
    registry: Arc<PendingOfferRegistry>,
    ingest: IngestionRequestHandler,
    config: IngestConfig,
    host: Arc<dyn HostEnvironment>,
}

impl WhipDevice {
    pub fn new(
        id: DeviceId,
        name: impl Into<String>,
        config: IngestConfig,
        host: Arc<dyn HostEnvironment>,
    ) -> Self {
        let registry = Arc::new(PendingOfferRegistry::new());
        let ingest =
            IngestionRequestHandler::new(id.clone(), registry.clone(), config.answer_timeout);

        Self {
            id,
            name: name.into(),
            registry,
            ingest,
            config,
            host,
        }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pending_offers(&self) -> &Arc<PendingOfferRegistry> {
        &self.registry
    }

    /// Бросает все ждущие слоты; вызывается при удалении устройства.
    pub fn shutdown(&self) {
        let dropped = self.registry.close();
        if dropped > 0 {
            info!("Device {} released with {} pending slot(s)", self.id, dropped);
        }
    }
}

#[async_trait]
impl HttpRequestHandler for WhipDevice {
    async fn on_request(&self, request: HttpRequest) -> Option<IngestResponse> {
        self.ingest.on_request(&request).await
    }
}

#[async_trait]
impl Settings for WhipDevice {
    async fn get_settings(&self) -> Result<Vec<Setting>> {
        endpoint_settings(self.host.as_ref(), &self.id).await
    }
}

#[async_trait]
impl VideoCamera for WhipDevice {
    async fn get_video_stream_options(&self) -> Vec<StreamOptions> {
        vec![StreamOptions::whip_default()]
    }

    async fn get_video_stream(&self) -> Result<MediaObject> {
        let media = self
            .host
            .create_media_object(&self.id, RTC_SIGNALING_CHANNEL_MIME)
            .await?;
        Ok(media)
    }
}

#[async_trait]
impl RtcSignalingChannel for WhipDevice {
    async fn start_rtc_signaling_session(
        &self,
        session: &dyn SignalingSession,
    ) -> Result<Box<dyn SessionControl>> {
        SignalingSessionCoordinator::new(self.id.clone(), self.registry.clone(), self.config.clone())
            .run(session)
            .await
    }
}
