//! Mentorship client
//!
//! Typed access to the mentorship REST API plus the in-memory state a UI
//! renders from:
//! - [`ApiClient`]: generic create/read/update/delete over HTTP + JSON
//! - [`MentorDirectory`]: cached set of mentor IDs kept in step with the server
//! - [`SelectedMentor`]: the mentor currently on display

pub mod client;
pub mod notify;
pub mod roster;
pub mod stores;

pub use client::{ApiClient, ClientError};
pub use mentorship_proto as proto;
pub use notify::{Notifier, TracingNotifier};
pub use stores::{MentorDirectory, SelectedMentor};
