use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

/// How long a banner stays visible before dismissing itself.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Default)]
struct BannerState {
    current: Option<Notification>,
    /// Bumped on every `show`; a dismissal task only clears the banner if
    /// its generation still matches, so a newer banner is never hidden by
    /// the timer of the one it replaced.
    generation: u64,
}

/// Banner state for surface implementations: at most one notification is
/// visible, a new one replaces the current one, and each dismisses itself
/// after [`DISMISS_AFTER`]. `show` must run inside a tokio runtime.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Arc<Mutex<BannerState>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Notification> {
        let guard = self.inner.lock().expect("banner poisoned");
        guard.current.clone()
    }

    pub fn show(&self, message: &str, severity: Severity) {
        let generation = {
            let mut guard = self.inner.lock().expect("banner poisoned");
            guard.generation += 1;
            guard.current = Some(Notification {
                message: message.to_string(),
                severity,
            });
            guard.generation
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(DISMISS_AFTER).await;
            let mut guard = inner.lock().expect("banner poisoned");
            if guard.generation == generation {
                guard.current = None;
            }
        });
    }

    pub fn clear(&self) {
        let mut guard = self.inner.lock().expect("banner poisoned");
        guard.generation += 1;
        guard.current = None;
    }
}
