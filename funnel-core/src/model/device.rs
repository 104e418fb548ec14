use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Идентификатор плагина; используется в пути, когда у устройства нет своего id.
pub const PLUGIN_NATIVE_ID: &str = "@scrypted/whip";

/// Стабильный `nativeId` устройства. Один id соответствует одной очереди офферов.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    /// Новый id в компактной hex-форме (uuid v4 без дефисов).
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interface {
    VideoCamera,
    Settings,
    HttpRequestHandler,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceType {
    Camera,
}

/// Описание устройства, которое сообщается хост-платформе при создании.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceManifest {
    pub native_id: DeviceId,
    pub name: String,
    pub interfaces: Vec<Interface>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}
