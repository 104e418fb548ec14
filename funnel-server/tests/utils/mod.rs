pub mod mock_host_session;

pub use ingest_helpers::*;
pub use mock_host_environment::*;
pub use mock_host_session::*;
