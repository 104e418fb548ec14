use crate::error::Result;
use async_trait::async_trait;
use funnel_core::{SdpType, SessionDescription, SetupOptions};

/// Одна сторона WebRTC-переговоров: умеет выдать свое описание и принять чужое.
/// Реализуется хост-платформой и сессией камеры.
#[async_trait]
pub trait SignalingSession: Send + Sync {
    async fn create_local_description(
        &self,
        sdp_type: SdpType,
        setup: &SetupOptions,
    ) -> Result<SessionDescription>;

    async fn set_remote_description(
        &self,
        description: SessionDescription,
        setup: &SetupOptions,
    ) -> Result<()>;
}
