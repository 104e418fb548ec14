pub use funnel_core::model::{DeviceId, SdpType, SessionDescription};

pub mod model {
    pub use funnel_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use funnel_server::*;
}
