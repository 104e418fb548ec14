use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<bool>,
}

/// Управление установленной сессией, которое получает хост.
/// Продление и завершение зависят от хоста; здесь точки расширения.
#[async_trait]
pub trait SessionControl: Send + Sync {
    async fn get_refresh_at(&self) -> Option<u64>;

    async fn extend_session(&self) -> Result<()>;

    async fn end_session(&self) -> Result<()>;

    async fn set_playback(&self, options: PlaybackOptions) -> Result<()>;
}

/// WHIP-сессия не требует продления: все операции пустые.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhipSessionControl;

#[async_trait]
impl SessionControl for WhipSessionControl {
    async fn get_refresh_at(&self) -> Option<u64> {
        None
    }

    async fn extend_session(&self) -> Result<()> {
        Ok(())
    }

    async fn end_session(&self) -> Result<()> {
        Ok(())
    }

    async fn set_playback(&self, _options: PlaybackOptions) -> Result<()> {
        Ok(())
    }
}
