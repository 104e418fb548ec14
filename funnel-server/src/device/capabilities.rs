use async_trait::async_trait;
use funnel_core::{Setting, StreamOptions};

use crate::device::MediaObject;
use crate::error::Result;
use crate::ingest::{HttpRequest, IngestResponse};
use crate::signaling::{SessionControl, SignalingSession};

#[async_trait]
pub trait HttpRequestHandler: Send + Sync {
    async fn on_request(&self, request: HttpRequest) -> Option<IngestResponse>;
}

#[async_trait]
pub trait Settings: Send + Sync {
    async fn get_settings(&self) -> Result<Vec<Setting>>;
}

#[async_trait]
pub trait VideoCamera: Send + Sync {
    async fn get_video_stream_options(&self) -> Vec<StreamOptions>;

    async fn get_video_stream(&self) -> Result<MediaObject>;
}

/// Точка входа хоста: начать сигнальную сессию с устройством.
#[async_trait]
pub trait RtcSignalingChannel: Send + Sync {
    async fn start_rtc_signaling_session(
        &self,
        session: &dyn SignalingSession,
    ) -> Result<Box<dyn SessionControl>>;
}
