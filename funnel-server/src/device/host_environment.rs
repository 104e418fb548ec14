use async_trait::async_trait;
use funnel_core::{DeviceId, DeviceManifest};
use tracing::info;

/// MIME-тип медиа-объекта, через который хост получает сигнальный канал камеры.
pub const RTC_SIGNALING_CHANNEL_MIME: &str = "x-scrypted/x-scrypted-rtc-signaling-channel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    pub mime_type: String,
    pub source: DeviceId,
}

/// Все, что ядру нужно от хост-платформы: адреса для настроек,
/// регистрация новых устройств и создание медиа-объектов.
#[async_trait]
pub trait HostEnvironment: Send + Sync + 'static {
    async fn server_ip(&self) -> anyhow::Result<String>;

    async fn http_port(&self) -> anyhow::Result<u16>;

    async fn https_port(&self) -> anyhow::Result<u16>;

    async fn on_device_discovered(&self, manifest: DeviceManifest) -> anyhow::Result<()>;

    async fn create_media_object(
        &self,
        source: &DeviceId,
        mime_type: &str,
    ) -> anyhow::Result<MediaObject>;
}

/// Хост с фиксированными адресом и портами. Используется отдельным сервером.
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub ip: String,
    pub http_port: u16,
    pub https_port: u16,
}

#[async_trait]
impl HostEnvironment for StaticHost {
    async fn server_ip(&self) -> anyhow::Result<String> {
        Ok(self.ip.clone())
    }

    async fn http_port(&self) -> anyhow::Result<u16> {
        Ok(self.http_port)
    }

    async fn https_port(&self) -> anyhow::Result<u16> {
        Ok(self.https_port)
    }

    async fn on_device_discovered(&self, manifest: DeviceManifest) -> anyhow::Result<()> {
        info!(
            "Device discovered: {} ({}) {:?}",
            manifest.name, manifest.native_id, manifest.interfaces
        );
        Ok(())
    }

    async fn create_media_object(
        &self,
        source: &DeviceId,
        mime_type: &str,
    ) -> anyhow::Result<MediaObject> {
        Ok(MediaObject {
            mime_type: mime_type.to_owned(),
            source: source.clone(),
        })
    }
}
