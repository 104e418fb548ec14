use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiverInit;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;

use crate::error::WhipError;
use crate::signaling::SignalingSession;
use crate::transport::PeerEvent;
use funnel_core::{DeviceId, MediaDirection, SdpType, SessionDescription, SetupOptions};

/// Сколько ждать сбора ICE-кандидатов. Должно быть меньше лимита ожидания
/// ответа на HTTP-стороне, иначе медленный STUN-сервер дает 504.
pub const DEFAULT_ICE_GATHER_TIMEOUT: Duration = Duration::from_millis(700);

/// Сессия хоста на базе webrtc-rs: принимает оффер камеры и отвечает на него.
///
/// PeerConnection создается при первом `set_remote_description`, потому что
/// ICE-конфигурация приходит вместе с параметрами setup.
pub struct PeerHostSession {
    device_id: DeviceId,
    event_tx: mpsc::Sender<PeerEvent>,
    peer_connection: OnceCell<Arc<RTCPeerConnection>>,
    gather_timeout: Duration,
}

impl PeerHostSession {
    pub fn new(device_id: DeviceId, event_tx: mpsc::Sender<PeerEvent>) -> Self {
        Self {
            device_id,
            event_tx,
            peer_connection: OnceCell::new(),
            gather_timeout: DEFAULT_ICE_GATHER_TIMEOUT,
        }
    }

    pub fn with_gather_timeout(mut self, timeout: Duration) -> Self {
        self.gather_timeout = timeout;
        self
    }

    async fn connection(&self, setup: &SetupOptions) -> Result<Arc<RTCPeerConnection>> {
        self.peer_connection
            .get_or_try_init(|| self.open(setup))
            .await
            .cloned()
    }

    async fn open(&self, setup: &SetupOptions) -> Result<Arc<RTCPeerConnection>> {
        // 1. Кодеки и интерцепторы по умолчанию
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        // 2. ICE-конфигурация из setup хоста
        let rtc = setup.configuration.clone().unwrap_or_default();
        let rtc_config = RTCConfiguration {
            ice_servers: rtc
                .ice_servers
                .into_iter()
                .map(|server| RTCIceServer {
                    urls: server.urls,
                    username: server.username.unwrap_or_default(),
                    credential: server.credential.unwrap_or_default(),
                })
                .collect(),
            ice_candidate_pool_size: rtc.ice_candidate_pool_size,
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        // 3. Трансиверы до применения оффера, чтобы ответ получил нужное направление
        let kinds = [
            (RTPCodecType::Audio, setup.audio),
            (RTPCodecType::Video, setup.video),
        ];
        for (kind, media) in kinds {
            let Some(media) = media else { continue };
            peer_connection
                .add_transceiver_from_kind(
                    kind,
                    Some(RTCRtpTransceiverInit {
                        direction: transceiver_direction(media.direction),
                        send_encodings: vec![],
                    }),
                )
                .await
                .with_context(|| format!("Failed to add {kind} transceiver"))?;
        }

        self.watch_connection(&peer_connection);
        Ok(peer_connection)
    }

    fn watch_connection(&self, peer_connection: &Arc<RTCPeerConnection>) {
        let state_tx = self.event_tx.clone();
        let state_id = self.device_id.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                let id = state_id.clone();

                Box::pin(async move {
                    info!("Peer Connection State changed for {}: {:?}", id, s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(PeerEvent::Disconnected(id)).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        let track_tx = self.event_tx.clone();
        let track_id = self.device_id.clone();
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();
            let id = track_id.clone();

            Box::pin(async move {
                let kind = track.kind().to_string();
                let codec = track.codec().capability.mime_type.clone();
                info!("Track received for {}: {} ({})", id, kind, codec);
                let _ = tx
                    .send(PeerEvent::TrackReceived {
                        device_id: id.clone(),
                        kind: kind.clone(),
                        codec,
                    })
                    .await;

                // Чтение в отдельной задаче: обработчик on_track держит мьютекс.
                tokio::spawn(async move {
                    let mut packets = 0u64;
                    while let Ok((packet, _)) = track.read_rtp().await {
                        packets += 1;
                        if packets == 1 {
                            let _ = tx
                                .send(PeerEvent::MediaFlowing {
                                    device_id: id.clone(),
                                    kind: kind.clone(),
                                })
                                .await;
                        }
                        debug!("{} {} rtp seq={}", id, kind, packet.header.sequence_number);
                    }
                    debug!("Track {} for {} ended after {} packets", kind, id, packets);
                });
            })
        }));
    }

    /// Применить оффер камеры как удаленное описание.
    pub async fn apply_offer(&self, sdp: String, setup: &SetupOptions) -> Result<()> {
        let peer_connection = self.connection(setup).await?;
        let offer = RTCSessionDescription::offer(sdp)?;
        peer_connection.set_remote_description(offer).await?;
        Ok(())
    }

    /// Создать ответ и дождаться сбора ICE-кандидатов, чтобы они попали в SDP.
    /// По истечении `gather_timeout` отдается то, что успело собраться.
    pub async fn create_answer(&self) -> Result<String> {
        let peer_connection = self
            .peer_connection
            .get()
            .cloned()
            .context("Remote offer must be applied before answering")?;

        let answer = peer_connection.create_answer(None).await?;
        let mut gather_complete = peer_connection.gathering_complete_promise().await;
        peer_connection.set_local_description(answer).await?;
        if tokio::time::timeout(self.gather_timeout, gather_complete.recv())
            .await
            .is_err()
        {
            warn!(
                "ICE gathering for {} not complete after {:?}, answering with partial candidates",
                self.device_id, self.gather_timeout
            );
        }

        let local = peer_connection
            .local_description()
            .await
            .context("No local description after ICE gathering")?;
        Ok(local.sdp)
    }

    pub async fn close(&self) -> Result<()> {
        if let Some(peer_connection) = self.peer_connection.get() {
            peer_connection.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SignalingSession for PeerHostSession {
    async fn create_local_description(
        &self,
        sdp_type: SdpType,
        _setup: &SetupOptions,
    ) -> crate::error::Result<SessionDescription> {
        if sdp_type != SdpType::Answer {
            return Err(WhipError::ProtocolViolation(format!(
                "host session only answers, {sdp_type} requested"
            )));
        }
        Ok(SessionDescription::answer(self.create_answer().await?))
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
        setup: &SetupOptions,
    ) -> crate::error::Result<()> {
        if description.sdp_type != SdpType::Offer {
            return Err(WhipError::ProtocolViolation(format!(
                "host session expects an offer, got {}",
                description.sdp_type
            )));
        }
        if let Err(e) = self.apply_offer(description.sdp, setup).await {
            warn!("Failed to apply camera offer for {}: {:?}", self.device_id, e);
            return Err(e.into());
        }
        Ok(())
    }
}

fn transceiver_direction(direction: MediaDirection) -> RTCRtpTransceiverDirection {
    match direction {
        MediaDirection::Sendrecv => RTCRtpTransceiverDirection::Sendrecv,
        MediaDirection::Sendonly => RTCRtpTransceiverDirection::Sendonly,
        MediaDirection::Recvonly => RTCRtpTransceiverDirection::Recvonly,
        MediaDirection::Inactive => RTCRtpTransceiverDirection::Inactive,
    }
}
