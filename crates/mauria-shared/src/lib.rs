//! # mauria-shared
//!
//! Domain types and wire contracts shared by every Mauria crate: the lesson,
//! event and task models, user preferences, the host message protocol spoken
//! with an embedding parent frame, and the response envelope of the backend
//! proxy.

pub mod api;
pub mod protocol;
pub mod types;

pub use protocol::HostMessage;
pub use types::*;
