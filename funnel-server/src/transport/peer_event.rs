use funnel_core::DeviceId;

/// События WebRTC-соединения хоста, которые стоит показать снаружи.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// Камера начала присылать трек.
    TrackReceived {
        device_id: DeviceId,
        kind: String,
        codec: String,
    },

    /// Первый RTP-пакет трека.
    MediaFlowing { device_id: DeviceId, kind: String },

    /// Соединение с камерой разорвано или не установилось.
    Disconnected(DeviceId),
}
