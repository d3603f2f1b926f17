//! User-facing notifications

use tracing::{info, warn};

/// Sink for messages shown to the user
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, is_error: bool);
}

/// Notifier that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show(&self, message: &str, is_error: bool) {
        if is_error {
            warn!(target: "mentorship::notify", "{}", message);
        } else {
            info!(target: "mentorship::notify", "{}", message);
        }
    }
}
