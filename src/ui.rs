//! Terminal output.
//!
//! Status lines go to stderr with a colored glyph in front:
//!
//! - `⚡` a stage started
//! - `✓` a stage finished (with its timing)
//! - `💡` hint
//! - `!` warning
//! - `x` error
//!
//! Only preset listings go to stdout, bare and one per line, so
//! `pbuild list | ...` sees nothing but names.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn info(msg: impl AsRef<str>) {
    eprintln!("{} {}", "⚡".yellow(), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    eprintln!("{} {}", "✓".green(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    eprintln!("{} {}", "!".yellow(), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", "x".red(), msg.as_ref());
}

pub fn hint(msg: impl AsRef<str>) {
    eprintln!("   {} {}", "💡".yellow(), msg.as_ref());
}

/// Spinner shown while a step with silenced output runs.
///
/// Hidden when stderr is not an attended terminal, so captured logs stay clean.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(msg: impl Into<String>) -> Self {
        let bar = if console::Term::stderr().features().is_attended() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("◜◠◝◞◡◟"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(msg.into());
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
