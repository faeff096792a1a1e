use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ui::color::{Colors, colorize};

/// Spinner shown while ads are audited. The number of ads is unknown up
/// front since they are pulled from the source one at a time.
pub struct ProgressReporter {
    audit_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            audit_progress: None,
            enabled,
        }
    }

    pub fn start_audit(&mut self) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} ads checked {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        self.audit_progress = Some(pb);
    }

    pub fn update_audit_progress(&self, ads_scanned: usize, broken_found: usize) {
        if let Some(ref pb) = self.audit_progress {
            pb.set_position(ads_scanned as u64);
            if broken_found > 0 {
                pb.set_message(format!("({broken_found} broken)"));
            }
        }
    }

    pub fn finish_audit(&self, ads_scanned: usize, broken_found: usize) {
        if let Some(ref pb) = self.audit_progress {
            let message = if broken_found == 0 {
                format!("✓ {ads_scanned} ads checked, no broken links")
            } else {
                format!("✓ {ads_scanned} ads checked, {broken_found} broken")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.audit_progress {
            pb.finish_and_clear();
        }
    }

    pub fn log_warning(&self, message: &str) {
        if let Some(ref pb) = self.audit_progress {
            pb.println(colorize(&format!("⚠ {message}"), Colors::BRIGHT_YELLOW));
        }
    }
}
