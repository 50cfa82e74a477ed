use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

// ═══════════════════════════════════════════════════════════════════════════════
// SHUTDOWN SIGNAL
// ═══════════════════════════════════════════════════════════════════════════════
//
// One signal shared by every poller and the webserver. Once triggered it stays
// triggered, so tasks that start waiting late still observe it.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct Shutdown {
    triggered: AtomicBool,
    notify: Notify,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolve once `trigger` has been called (immediately if it already was)
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // register before checking the flag so a concurrent trigger is not lost
            notified.as_mut().enable();

            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }
}
