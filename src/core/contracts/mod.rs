pub mod protocol_v1;

pub use protocol_v1::{ButtonTransition, EventKind, ProtocolEvent, PRIMARY_BUTTON, PROXIMITY_BUTTON};
