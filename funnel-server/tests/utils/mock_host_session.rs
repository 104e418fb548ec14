use async_trait::async_trait;
use funnel_core::{SdpType, SessionDescription, SetupOptions};
use funnel_server::{Result, SignalingSession, WhipError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Calls made by the coordinator against the host session.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetRemote {
        description: SessionDescription,
        setup: SetupOptions,
    },
    CreateLocal {
        sdp_type: SdpType,
    },
}

/// Host session that answers every offer with `answer-for:<offer>`.
#[derive(Clone)]
pub struct MockHostSession {
    calls: Arc<Mutex<Vec<HostCall>>>,
    remote_offer: Arc<Mutex<Option<String>>>,
    /// Type tag put on the produced description; `Offer` simulates a broken host.
    answer_type: SdpType,
}

impl MockHostSession {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            remote_offer: Arc::new(Mutex::new(None)),
            answer_type: SdpType::Answer,
        }
    }

    /// A host that wrongly labels its answer as an offer.
    pub fn mislabeling() -> Self {
        Self {
            answer_type: SdpType::Offer,
            ..Self::new()
        }
    }

    pub async fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().await.clone()
    }

    pub async fn received_offer(&self) -> Option<String> {
        self.remote_offer.lock().await.clone()
    }
}

#[async_trait]
impl SignalingSession for MockHostSession {
    async fn create_local_description(
        &self,
        sdp_type: SdpType,
        _setup: &SetupOptions,
    ) -> Result<SessionDescription> {
        self.calls.lock().await.push(HostCall::CreateLocal { sdp_type });

        let offer = self
            .remote_offer
            .lock()
            .await
            .clone()
            .ok_or_else(|| WhipError::Internal("answer requested before offer".into()))?;

        Ok(SessionDescription {
            sdp: answer_for(&offer),
            sdp_type: self.answer_type,
        })
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
        setup: &SetupOptions,
    ) -> Result<()> {
        tracing::debug!("[MockHost] set_remote_description {:?}", description.sdp_type);
        *self.remote_offer.lock().await = Some(description.sdp.clone());
        self.calls.lock().await.push(HostCall::SetRemote {
            description,
            setup: setup.clone(),
        });
        Ok(())
    }
}

pub fn answer_for(offer: &str) -> String {
    format!("answer-for:{offer}")
}
