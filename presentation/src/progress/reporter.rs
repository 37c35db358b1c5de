//! Streamed console output for query sessions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use querydash_application::SessionObserver;
use querydash_domain::{SessionId, SessionSnapshot, SessionStatus};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Prints fragments to stdout as they arrive, with a spinner on stderr
/// until the first one shows up. Failures and cancellations go to stderr.
pub struct StreamPrinter {
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            spinner: Mutex::new(None),
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self) {
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Processing...");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.lock_spinner() = Some(pb);
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.lock_spinner().take() {
            pb.finish_and_clear();
        }
    }

    fn lock_spinner(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.spinner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for StreamPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for StreamPrinter {
    fn on_session_start(&self, _snapshot: &SessionSnapshot) {
        self.start_spinner();
    }

    fn on_fragment(&self, _id: SessionId, fragment: &str) {
        self.clear_spinner();
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(fragment.as_bytes());
        let _ = stdout.flush();
    }

    fn on_status_change(&self, _id: SessionId, status: SessionStatus) {
        if status == SessionStatus::Streaming
            && let Some(pb) = self.lock_spinner().as_ref()
        {
            pb.set_message("Receiving...");
        }
    }

    fn on_session_end(&self, snapshot: &SessionSnapshot) {
        self.clear_spinner();
        if !snapshot.text.is_empty() {
            println!();
        }
        match snapshot.status {
            SessionStatus::Failed => {
                let message = snapshot.failure.as_deref().unwrap_or("Request failed");
                eprintln!("{} {}", "Error:".red().bold(), message.red());
            }
            SessionStatus::Cancelled => {
                eprintln!("{}", "(cancelled)".dimmed());
            }
            _ => {}
        }
    }
}

/// Spinner only, for output formats that print the result at the end.
pub struct SpinnerOnly {
    inner: StreamPrinter,
}

impl SpinnerOnly {
    pub fn new(show_progress: bool) -> Self {
        Self {
            inner: StreamPrinter::new().with_progress(show_progress),
        }
    }
}

impl SessionObserver for SpinnerOnly {
    fn on_session_start(&self, snapshot: &SessionSnapshot) {
        self.inner.on_session_start(snapshot);
    }

    fn on_status_change(&self, id: SessionId, status: SessionStatus) {
        self.inner.on_status_change(id, status);
    }

    fn on_session_end(&self, _snapshot: &SessionSnapshot) {
        self.inner.clear_spinner();
    }
}
