mod camera_session;
mod coordinator;
mod session_control;
mod signaling_session;

pub use camera_session::*;
pub use coordinator::*;
pub use session_control::*;
pub use signaling_session::*;
