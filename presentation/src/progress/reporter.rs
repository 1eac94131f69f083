//! Progress reporting for council requests

use colored::Colorize;
use council_application::CouncilProgress;
use council_domain::{ActivationMode, ModelRole};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Reports progress with one spinner per backend call
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<ModelRole, ProgressBar>>,
    synthesis_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
            synthesis_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn spinner(&self, prefix: String, message: String) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message);
        pb.enable_steady_tick(TICK);
        pb
    }

    fn finish(pb: &ProgressBar, success: bool) {
        let status = if success {
            "done".green().to_string()
        } else {
            "failed".red().to_string()
        };
        pb.finish_with_message(status);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CouncilProgress for ProgressReporter {
    fn on_mode_start(&self, mode: ActivationMode) {
        // Printing through MultiProgress keeps the line above the spinners
        let _ = self
            .multi
            .println(format!("{} {}", "->".cyan(), mode.description().bold()));
    }

    fn on_call_start(&self, role: ModelRole, backend: &str) {
        let pb = self.spinner(role.display_name().to_string(), format!("asking {}...", backend));
        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(role, pb);
        }
    }

    fn on_call_complete(&self, role: ModelRole, success: bool) {
        let pb = self.bars.lock().ok().and_then(|mut bars| bars.remove(&role));
        if let Some(pb) = pb {
            Self::finish(&pb, success);
        }
    }

    fn on_synthesis_start(&self, backend: &str) {
        let pb = self.spinner("Synthesis".to_string(), format!("{} is reconciling...", backend));
        if let Ok(mut slot) = self.synthesis_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_synthesis_complete(&self, success: bool) {
        let pb = self.synthesis_bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(pb) = pb {
            Self::finish(&pb, success);
        }
    }

    fn on_mode_complete(&self, _mode: ActivationMode, _success: bool) {
        // Clear any spinner left behind by an aborted fan-out
        if let Ok(mut bars) = self.bars.lock() {
            for (_, pb) in bars.drain() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl CouncilProgress for SimpleProgress {
    fn on_mode_start(&self, mode: ActivationMode) {
        eprintln!("{} {}", "->".cyan(), mode.description().bold());
    }

    fn on_call_start(&self, role: ModelRole, backend: &str) {
        eprintln!("  {} {} ({})", "..".dimmed(), role.display_name(), backend);
    }

    fn on_call_complete(&self, role: ModelRole, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), role.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), role.display_name());
        }
    }

    fn on_synthesis_start(&self, backend: &str) {
        eprintln!("  {} Synthesis ({})", "..".dimmed(), backend);
    }

    fn on_synthesis_complete(&self, success: bool) {
        if success {
            eprintln!("  {} Synthesis", "v".green());
        } else {
            eprintln!("  {} Synthesis (failed)", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_and_releases_spinners() {
        let reporter = ProgressReporter::new();
        reporter.on_call_start(ModelRole::Style, "Claude");
        reporter.on_call_start(ModelRole::Coherence, "Gemini");
        assert_eq!(reporter.bars.lock().unwrap().len(), 2);

        reporter.on_call_complete(ModelRole::Style, true);
        assert_eq!(reporter.bars.lock().unwrap().len(), 1);

        reporter.on_mode_complete(ActivationMode::Polish, false);
        assert!(reporter.bars.lock().unwrap().is_empty());
    }

    #[test]
    fn test_synthesis_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_synthesis_start("GPT");
        assert!(reporter.synthesis_bar.lock().unwrap().is_some());
        reporter.on_synthesis_complete(true);
        assert!(reporter.synthesis_bar.lock().unwrap().is_none());
    }
}
