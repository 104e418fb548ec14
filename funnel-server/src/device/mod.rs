mod capabilities;
mod device_registry;
mod host_environment;
mod settings;
mod whip_device;

pub use capabilities::*;
pub use device_registry::*;
pub use host_environment::*;
pub use settings::*;
pub use whip_device::*;
