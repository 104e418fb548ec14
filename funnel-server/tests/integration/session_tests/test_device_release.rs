use funnel_core::DeviceId;
use funnel_server::{RtcSignalingChannel, WhipError};

use crate::integration::{create_test_registry, init_tracing, test_config};
use crate::utils::{MockHostSession, wait_for_pending};

#[tokio::test]
async fn test_release_closes_waiting_session() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    let id = DeviceId::from("cam");
    let device = registry.get_device(&id);
    let host = MockHostSession::new();

    let session = tokio::spawn({
        let device = device.clone();
        let host = host.clone();
        async move { device.start_rtc_signaling_session(&host).await }
    });
    assert!(wait_for_pending(device.pending_offers(), 1).await);

    assert!(registry.release_device(&id));

    let result = session.await.unwrap();
    assert!(matches!(result.err(), Some(WhipError::Closed(_))));
    assert!(device.pending_offers().is_empty());
    assert!(registry.find_device(&id).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_session_on_released_device_is_closed() {
    init_tracing();

    let (registry, _) = create_test_registry(test_config());
    let id = DeviceId::from("cam");
    let device = registry.get_device(&id);
    assert!(registry.release_device(&id));

    let started = tokio::time::Instant::now();
    let host = MockHostSession::new();
    let result = device.start_rtc_signaling_session(&host).await;

    assert!(matches!(result.err(), Some(WhipError::Closed(_))));
    assert!(started.elapsed() < test_config().offer_timeout);
    assert!(device.pending_offers().is_empty());
}
