use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while the data file loads.
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { spinner: Some(pb) }
    }

    pub fn hidden() -> Self {
        Self { spinner: None }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn abandon(&self) {
        if let Some(ref pb) = self.spinner {
            pb.abandon_with_message("Load failed");
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
