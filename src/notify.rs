//! User notifications
//!
//! Views report every success and failure through a [`Notifier`]. The CLI
//! prints them; tests record them.

use parking_lot::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Prints one line per notification on stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => {
                info!(message, "Notification");
                eprintln!("✔ {message}");
            }
            Level::Error => {
                error!(message, "Notification");
                eprintln!("✖ {message}");
            }
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.by_level(Level::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.by_level(Level::Success)
    }

    fn by_level(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}
