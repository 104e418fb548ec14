use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::rendezvous::{OfferSlot, PendingOfferRegistry, SlotId};
use crate::signaling::{CameraSession, SessionControl, SignalingSession, WhipSessionControl};
use funnel_core::{DeviceId, SdpType, SetupOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    WaitingForOffer,
    ExchangingDescriptions,
    AwaitingAnswerDelivery,
    Complete,
    Failed,
}

/// Ведет одну сигнальную сессию хоста от ожидания оффера до выдачи ответа.
///
/// Координатор кладет пустой слот в очередь устройства и ждет, пока HTTP-запрос
/// заполнит его оффером. Затем прогоняет обмен описаниями через сессию хоста
/// и отдает полученный ответ обратно в слот.
pub struct SignalingSessionCoordinator {
    device_id: DeviceId,
    registry: Arc<PendingOfferRegistry>,
    config: IngestConfig,
    state_tx: watch::Sender<SessionState>,
}

impl SignalingSessionCoordinator {
    pub fn new(
        device_id: DeviceId,
        registry: Arc<PendingOfferRegistry>,
        config: IngestConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::WaitingForOffer);
        Self {
            device_id,
            registry,
            config,
            state_tx,
        }
    }

    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn transition(&self, state: SessionState) {
        debug!("Signaling session for {} -> {:?}", self.device_id, state);
        self.state_tx.send_replace(state);
    }

    /// Запуск сессии. Ошибка на любом шаге переводит ее в `Failed`
    /// и возвращается вызывающему; ответ в слот при этом не попадает.
    pub async fn run(&self, host: &dyn SignalingSession) -> Result<Box<dyn SessionControl>> {
        self.transition(SessionState::WaitingForOffer);

        let slot = Arc::new(OfferSlot::new());
        self.registry.enqueue(slot.clone());
        info!("Waiting for camera offer on {} ({})", self.device_id, slot.id());

        let _dequeue = DequeueOnDrop {
            registry: &self.registry,
            id: slot.id(),
        };

        let offer = match slot.await_offer(self.config.offer_timeout).await {
            Ok(offer) => offer,
            Err(e) => {
                warn!("No camera offer for {}: {}", self.device_id, e);
                self.transition(SessionState::Failed);
                return Err(e);
            }
        };

        self.transition(SessionState::ExchangingDescriptions);
        let camera = CameraSession::new(offer, slot);

        if let Err(e) = self.exchange(&camera, host).await {
            error!("Error setting up session for {}: {}", self.device_id, e);
            self.transition(SessionState::Failed);
            return Err(e);
        }

        self.transition(SessionState::Complete);
        info!("Signaling session for {} established", self.device_id);
        Ok(Box::new(WhipSessionControl))
    }

    async fn exchange(&self, camera: &CameraSession, host: &dyn SignalingSession) -> Result<()> {
        let host_setup = self.config.host_setup();
        let camera_setup = SetupOptions::default();

        let camera_offer = camera.local_offer();
        debug!("Camera offer sdp:\n{}", camera_offer.sdp);

        host.set_remote_description(camera_offer, &host_setup).await?;
        let host_answer = host
            .create_local_description(SdpType::Answer, &host_setup)
            .await?;
        debug!("Host answer sdp:\n{}", host_answer.sdp);

        self.transition(SessionState::AwaitingAnswerDelivery);
        camera
            .set_remote_description(host_answer, &camera_setup)
            .await
    }
}

/// Брошенный сессией слот не должен копиться в очереди до следующего POST.
/// Уже снятый HTTP-стороной слот в очереди отсутствует, и `remove` ничего не делает.
struct DequeueOnDrop<'a> {
    registry: &'a PendingOfferRegistry,
    id: SlotId,
}

impl Drop for DequeueOnDrop<'_> {
    fn drop(&mut self) {
        if self.registry.remove(self.id) {
            debug!("Removed retired {} from queue", self.id);
        }
    }
}
