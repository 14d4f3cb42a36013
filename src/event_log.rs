use std::collections::VecDeque;

use chrono::Local;

/// Maximum number of entries retained in the dashboard log.
pub const LOG_CAP: usize = 50;

/// Bounded FIFO of timestamped event messages, oldest first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAP),
        }
    }

    /// Appends a wall-clock-stamped entry, evicting the oldest once full.
    pub fn push(&mut self, message: &str) {
        if self.entries.len() == LOG_CAP {
            self.entries.pop_front();
        }
        self.entries
            .push_back(format!("[{}] {}", Local::now().format("%H:%M:%S"), message));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    /// The last `n` entries, oldest first, for a scrolling pane.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|s| s.as_str())
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
