mod peer_event;
mod peer_host_session;

pub use peer_event::*;
pub use peer_host_session::*;
