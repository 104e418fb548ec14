use crate::model::description::SdpType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RtcConfiguration {
    pub ice_servers: Vec<IceServerConfig>,
    pub ice_candidate_pool_size: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaDirection {
    Sendrecv,
    Sendonly,
    Recvonly,
    Inactive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaSetup {
    pub direction: MediaDirection,
}

/// Параметры, с которыми сессия выполняет set/create description.
/// Пустой `SetupOptions::default()` означает "без дополнительных требований".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sdp_type: Option<SdpType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<MediaSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<RtcConfiguration>,
}

impl SetupOptions {
    /// Настройка отвечающей стороны: только прием аудио и видео.
    pub fn receive_only(configuration: RtcConfiguration) -> Self {
        let recv = MediaSetup {
            direction: MediaDirection::Recvonly,
        };
        Self {
            sdp_type: Some(SdpType::Answer),
            audio: Some(recv),
            video: Some(recv),
            configuration: Some(configuration),
        }
    }
}
