//! Точка приема WHIP: сводит SDP-оффер, пришедший по HTTP, с сигнальной
//! сессией хоста и возвращает SDP-ответ обратно в HTTP.

mod config;
mod device;
mod error;
mod ingest;
mod rendezvous;
mod signaling;
mod transport;

pub use config::*;
pub use device::*;
pub use error::*;
pub use ingest::*;
pub use rendezvous::*;
pub use signaling::*;
pub use transport::*;
