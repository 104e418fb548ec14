mod description;
mod device;
mod ingest;
mod setting;
mod setup;
mod stream;

pub use description::{SdpType, SessionDescription};
pub use device::{DeviceId, DeviceManifest, DeviceType, Interface, PLUGIN_NATIVE_ID};
pub use ingest::IngestBody;
pub use setting::Setting;
pub use setup::{IceServerConfig, MediaDirection, MediaSetup, RtcConfiguration, SetupOptions};
pub use stream::{AudioStreamOptions, StreamOptions, VideoStreamOptions};
