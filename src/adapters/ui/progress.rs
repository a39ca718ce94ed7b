//! Loading indicator. An indicatif spinner shown while tracker requests are outstanding.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

pub struct LoadingSpinner {
    bar: Mutex<Option<ProgressBar>>,
    message: String,
}

impl LoadingSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            bar: Mutex::new(None),
            message: message.into(),
        }
    }

    /// Show (idempotent) or clear the spinner.
    pub fn set(&self, loading: bool) {
        let mut bar = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match (loading, bar.as_ref()) {
            (true, None) => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{spinner:.magenta} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.set_message(self.message.clone());
                pb.enable_steady_tick(TICK);
                *bar = Some(pb);
            }
            (false, Some(_)) => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
