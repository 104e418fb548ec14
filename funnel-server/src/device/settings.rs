use funnel_core::{DeviceId, PLUGIN_NATIVE_ID, Setting};

use crate::device::HostEnvironment;
use crate::error::Result;

pub fn endpoint_path(id: Option<&DeviceId>) -> String {
    let id = id
        .map(DeviceId::as_str)
        .filter(|id| !id.is_empty())
        .unwrap_or(PLUGIN_NATIVE_ID);
    format!("/endpoint/{id}/public/")
}

/// IPv6-адрес в URL нужно обернуть в скобки.
pub fn url_host(ip: &str) -> String {
    if ip.contains(':') {
        format!("[{ip}]")
    } else {
        ip.to_owned()
    }
}

/// Адреса приема HTTP/HTTPS для устройства, только для чтения.
pub async fn endpoint_settings(host: &dyn HostEnvironment, id: &DeviceId) -> Result<Vec<Setting>> {
    let ip = url_host(&host.server_ip().await?);
    let path = endpoint_path(Some(id));
    let http_port = host.http_port().await?;
    let https_port = host.https_port().await?;

    Ok(vec![
        Setting {
            title: "HTTP endpoint".to_owned(),
            key: "http_endpoint".to_owned(),
            description: Some("HTTP ingestion endpoint".to_owned()),
            value: Some(format!("http://{ip}:{http_port}{path}")),
            readonly: true,
        },
        Setting {
            title: "HTTPS endpoint".to_owned(),
            key: "https_endpoint".to_owned(),
            description: Some("HTTPS ingestion endpoint".to_owned()),
            value: Some(format!("https://{ip}:{https_port}{path}")),
            readonly: true,
        },
    ])
}
