//! Mentorship wire types
//!
//! Request and response bodies exchanged between the REST API and its clients.
//! Both sides depend on this crate so the JSON shapes cannot drift apart.

pub mod messages;

pub use messages::*;

/// Path prefix every REST route is mounted under
pub const API_PREFIX: &str = "/api";
