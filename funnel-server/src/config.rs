use funnel_core::{IceServerConfig, RtcConfiguration, SetupOptions};
use std::time::Duration;

pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";

/// Настройки приема: лимиты ожидания и ICE-политика для хоста.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Сколько сигнальная сессия ждет оффер от камеры.
    pub offer_timeout: Duration,
    /// Сколько HTTP-запрос ждет SDP-ответ после передачи оффера.
    pub answer_timeout: Duration,
    pub ice_servers: Vec<IceServerConfig>,
    pub ice_candidate_pool_size: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            offer_timeout: Duration::from_secs(60),
            answer_timeout: Duration::from_secs(1),
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_SERVER)],
            ice_candidate_pool_size: 0,
        }
    }
}

impl IngestConfig {
    pub fn with_offer_timeout(mut self, timeout: Duration) -> Self {
        self.offer_timeout = timeout;
        self
    }

    pub fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    pub fn with_ice_servers(mut self, ice_servers: Vec<IceServerConfig>) -> Self {
        self.ice_servers = ice_servers;
        self
    }

    /// Setup для сессии хоста: только прием аудио и видео.
    pub fn host_setup(&self) -> SetupOptions {
        SetupOptions::receive_only(RtcConfiguration {
            ice_servers: self.ice_servers.clone(),
            ice_candidate_pool_size: self.ice_candidate_pool_size,
        })
    }
}
