use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoStreamOptions {
    pub codec: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioStreamOptions {
    pub codec: String,
}

/// Описание потока, который устройство отдает хосту.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamOptions {
    pub id: String,
    pub name: String,
    pub container: String,
    pub video: VideoStreamOptions,
    pub audio: AudioStreamOptions,
    pub source: String,
    pub tool: String,
    pub user_configurable: bool,
}

impl StreamOptions {
    /// Единственный поток WHIP-камеры.
    pub fn whip_default() -> Self {
        Self {
            id: "default".to_owned(),
            name: "WHIP".to_owned(),
            container: "rtsp".to_owned(),
            video: VideoStreamOptions {
                codec: "h264".to_owned(),
            },
            audio: AudioStreamOptions {
                codec: "pcm_alaw".to_owned(),
            },
            source: "local".to_owned(),
            tool: "scrypted".to_owned(),
            user_configurable: false,
        }
    }
}
