mod http;
mod http_routes;
mod ingest_handler;

pub use http::*;
pub use http_routes::*;
pub use ingest_handler::*;
