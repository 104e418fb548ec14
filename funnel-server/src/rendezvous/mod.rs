mod offer_slot;
mod pending_registry;
mod rendezvous_cell;

pub use offer_slot::*;
pub use pending_registry::*;
pub use rendezvous_cell::*;
