use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::config::IngestConfig;
use crate::device::capabilities::HttpRequestHandler;
use crate::device::{HostEnvironment, WhipDevice};
use crate::error::{Result, WhipError};
use crate::ingest::{HttpRequest, IngestResponse};
use funnel_core::{DeviceId, DeviceManifest, DeviceType, Interface, Setting};

pub const DEFAULT_DEVICE_NAME: &str = "New WHIP Camera";

/// Реестр устройств плагина: `nativeId -> устройство`.
/// Устройство создается при первом обращении и удаляется явно.
#[derive(Clone)]
pub struct DeviceRegistry {
    devices: Arc<DashMap<DeviceId, Arc<WhipDevice>>>,
    config: IngestConfig,
    host: Arc<dyn HostEnvironment>,
}

impl DeviceRegistry {
    pub fn new(config: IngestConfig, host: Arc<dyn HostEnvironment>) -> Self {
        Self {
            devices: Arc::new(DashMap::new()),
            config,
            host,
        }
    }

    pub fn get_device(&self, native_id: &DeviceId) -> Arc<WhipDevice> {
        if let Some(device) = self.devices.get(native_id) {
            return device.clone();
        }

        self.devices
            .entry(native_id.clone())
            .or_insert_with(|| {
                info!("Creating device: {}", native_id);
                Arc::new(self.build_device(native_id.clone(), DEFAULT_DEVICE_NAME))
            })
            .clone()
    }

    pub fn find_device(&self, native_id: &DeviceId) -> Option<Arc<WhipDevice>> {
        self.devices.get(native_id).map(|device| device.clone())
    }

    pub fn release_device(&self, native_id: &DeviceId) -> bool {
        let Some((_, device)) = self.devices.remove(native_id) else {
            return false;
        };
        device.shutdown();
        info!("Released device: {}", native_id);
        true
    }

    /// Новое устройство: сообщаем хосту и сразу создаем экземпляр.
    pub async fn create_device(&self, settings: &HashMap<String, String>) -> Result<DeviceId> {
        let native_id = DeviceId::new();
        let name = settings
            .get("name")
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_owned());

        self.host
            .on_device_discovered(DeviceManifest {
                native_id: native_id.clone(),
                name: name.clone(),
                interfaces: vec![
                    Interface::VideoCamera,
                    Interface::Settings,
                    Interface::HttpRequestHandler,
                ],
                device_type: DeviceType::Camera,
            })
            .await?;

        let device = Arc::new(self.build_device(native_id.clone(), name));
        self.devices.insert(native_id.clone(), device);
        Ok(native_id)
    }

    pub fn create_device_settings(&self) -> Vec<Setting> {
        vec![Setting {
            title: "Name".to_owned(),
            key: "name".to_owned(),
            ..Default::default()
        }]
    }

    /// Передает HTTP-запрос устройству. Неизвестное устройство дает 404.
    pub async fn route(
        &self,
        native_id: &DeviceId,
        request: HttpRequest,
    ) -> Result<Option<IngestResponse>> {
        let device = self
            .find_device(native_id)
            .ok_or_else(|| WhipError::DeviceNotFound(native_id.clone()))?;
        Ok(device.on_request(request).await)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn build_device(&self, native_id: DeviceId, name: impl Into<String>) -> WhipDevice {
        WhipDevice::new(native_id, name, self.config.clone(), self.host.clone())
    }
}
