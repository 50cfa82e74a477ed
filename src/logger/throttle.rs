//! Rate-limited logging scoped to one owner
//!
//! Poll loops fire every few seconds; logging each cycle floods the console.
//! A `ThrottledLogger` lets at most one message through per window and counts
//! what it swallowed, so the next emitted line can say how much was skipped.

use super::levels::LogLevel;
use super::tags::LogTag;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct ThrottledLogger {
    tag: LogTag,
    window: Duration,
    last_emit: Option<Instant>,
    suppressed: u64,
}

impl ThrottledLogger {
    pub fn new(tag: LogTag, window: Duration) -> Self {
        Self {
            tag,
            window,
            last_emit: None,
            suppressed: 0,
        }
    }

    /// Decide whether a message may be emitted now, updating the window
    ///
    /// Returns the number of messages suppressed since the last emission
    /// when the caller may log, `None` otherwise.
    pub fn admit(&mut self) -> Option<u64> {
        let now = Instant::now();
        let open = match self.last_emit {
            None => true,
            Some(last) => now.duration_since(last) >= self.window,
        };

        if open {
            self.last_emit = Some(now);
            let skipped = self.suppressed;
            self.suppressed = 0;
            Some(skipped)
        } else {
            self.suppressed += 1;
            None
        }
    }

    /// Reopen the window so the next message is emitted immediately
    pub fn reset(&mut self) {
        self.last_emit = None;
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        if let Some(skipped) = self.admit() {
            if skipped > 0 {
                super::log(
                    self.tag.clone(),
                    level,
                    &format!("{} ({} similar suppressed)", message, skipped),
                );
            } else {
                super::log(self.tag.clone(), level, message);
            }
        }
    }

    pub fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.log(LogLevel::Warning, message);
    }
}
