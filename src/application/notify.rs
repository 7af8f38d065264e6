//! Where user-facing outcome messages go.

use std::sync::Mutex;

use tracing::{info, warn};

use crate::cache::lock::{self, Site};

const SOURCE: &str = "application::notify";

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Emits notifications as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "rentbook::notify", outcome = "success", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "rentbook::notify", outcome = "error", "{message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps every notification in order; handy when the caller decides later
/// how to present them.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock::lock(&self.sent, Site::new(SOURCE, "notifications")).clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *lock::lock(&self.sent, Site::new(SOURCE, "take")))
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        lock::lock(&self.sent, Site::new(SOURCE, "success"))
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        lock::lock(&self.sent, Site::new(SOURCE, "error"))
            .push(Notification::Error(message.to_string()));
    }
}
