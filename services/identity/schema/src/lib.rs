//! sea-orm entity definitions for the identity service.

pub mod subscriptions;
pub mod users;
pub mod videos;
pub mod watch_history;
