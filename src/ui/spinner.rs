//! Spinner shown while the update probe waits on the network.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Frames of a small bouncing cursor.
const FRAMES: &[&str] = &["[>   ]", "[=>  ]", "[==> ]", "[ ==>]", "[  ==]", "[   =]", "[    ]"];

pub struct Spinner {
    bar: ProgressBar,
    message: String,
}

impl Spinner {
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        // Template is static; fall back to the default style if it is ever rejected.
        let spinner_style = ProgressStyle::default_spinner()
            .tick_strings(FRAMES)
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        bar.set_style(spinner_style);
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message(message.to_string());

        Self {
            bar,
            message: message.to_string(),
        }
    }

    /// Replace the spinner with a checkmark line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
        println!("{} {}", style(&self.message).bold(), style("✓").green());
    }

    /// Replace the spinner with a cross line.
    pub fn finish_error(&self) {
        self.bar.finish_and_clear();
        println!("{} {}", style(&self.message).bold(), style("✗").red());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_share_a_width() {
        let width = FRAMES[0].len();
        assert!(FRAMES.iter().all(|f| f.len() == width));
    }

    #[test]
    fn finished_frame_is_an_empty_track() {
        assert_eq!(FRAMES.last().copied(), Some("[    ]"));
    }
}
