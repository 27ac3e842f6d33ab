//! Transient broadcast channel for activity events
//!
//! Qualifying mutations (new post, new like) push a human-readable event
//! to every currently connected subscriber. Delivery is best effort:
//! subscribers connected after the event miss it, there is no replay,
//! and a failed send never affects the originating request. The durable
//! record for a specific recipient is the persisted notification row,
//! which is a separate mechanism.

pub mod hub;
pub mod messages;
pub mod session;

pub use hub::{BroadcastHub, ConnectionId};
pub use messages::BroadcastMessage;
pub use session::ws_connect;
