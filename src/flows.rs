//! Handshake and API call orchestration on top of [`PlurkClient`](crate::client::PlurkClient).

pub mod api;
pub mod authorization;
pub mod user_agent;

pub use authorization::*;
pub use user_agent::*;
