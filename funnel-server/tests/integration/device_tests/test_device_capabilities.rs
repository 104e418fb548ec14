use std::collections::HashMap;

use funnel_core::{DeviceType, Interface};
use funnel_server::{RTC_SIGNALING_CHANNEL_MIME, Settings, VideoCamera};

use crate::integration::{create_test_registry, init_tracing, test_config};

#[tokio::test]
async fn test_create_device_announces_manifest() {
    init_tracing();

    let (registry, host) = create_test_registry(test_config());
    let settings = HashMap::from([("name".to_owned(), "Porch".to_owned())]);

    let id = registry.create_device(&settings).await.unwrap();

    let discovered = host.discovered().await;
    assert_eq!(discovered.len(), 1);
    let manifest = &discovered[0];
    assert_eq!(manifest.native_id, id);
    assert_eq!(manifest.name, "Porch");
    assert_eq!(manifest.device_type, DeviceType::Camera);
    assert!(manifest.interfaces.contains(&Interface::VideoCamera));
    assert!(manifest.interfaces.contains(&Interface::Settings));
    assert!(manifest.interfaces.contains(&Interface::HttpRequestHandler));
}

#[tokio::test]
async fn test_settings_show_public_endpoints() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    let id = registry.create_device(&HashMap::new()).await.unwrap();
    let device = registry.find_device(&id).unwrap();

    let settings = device.get_settings().await.unwrap();
    assert_eq!(settings.len(), 2);

    let http = settings.iter().find(|s| s.key == "http_endpoint").unwrap();
    assert_eq!(
        http.value.as_deref(),
        Some(format!("http://192.168.1.10:11080/endpoint/{id}/public/").as_str())
    );
    assert!(http.readonly);

    let https = settings.iter().find(|s| s.key == "https_endpoint").unwrap();
    assert_eq!(
        https.value.as_deref(),
        Some(format!("https://192.168.1.10:10443/endpoint/{id}/public/").as_str())
    );
}

#[tokio::test]
async fn test_video_stream_is_signaling_channel() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    let id = registry.create_device(&HashMap::new()).await.unwrap();
    let device = registry.find_device(&id).unwrap();

    let options = device.get_video_stream_options().await;
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].container, "rtsp");
    assert!(!options[0].user_configurable);

    let media = device.get_video_stream().await.unwrap();
    assert_eq!(media.mime_type, RTC_SIGNALING_CHANNEL_MIME);
    assert_eq!(media.source, id);
}
