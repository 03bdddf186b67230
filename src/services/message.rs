//! User-facing notices
//!
//! Fire-and-forget: implementations must not block and must not fail.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Danger,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: MessageLevel, key: &str);
}

/// Routes notices to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: MessageLevel, key: &str) {
        match level {
            MessageLevel::Success | MessageLevel::Info => info!(key, ?level, "user notice"),
            MessageLevel::Warning => warn!(key, "user notice"),
            MessageLevel::Danger => error!(key, "user notice"),
        }
    }
}
