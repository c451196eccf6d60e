//! Single-line progress reporting, rewritten in place on stderr.

use kdam::term::Colorizer;
use std::io::{self, Write};

/// Observational collaborator fed `(stage, item, current, total)` tuples;
/// correctness never depends on it.
pub trait ProgressSink {
    fn update(&mut self, stage: &str, item: &str, current: usize, total: usize);
}

/// Discards every update. Used by tests and quiet callers.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _: &str, _: &str, _: usize, _: usize) {}
}

/// Renders progress as one stderr line, erased and redrawn per update.
pub struct TermProgress;

impl TermProgress {
    pub fn new() -> Self {
        Self
    }

    /// Moves past the progress line so later output starts fresh.
    pub fn finish(&mut self) {
        let mut handle = io::stderr().lock();
        let _ = write!(handle, "\r\x1B[2K");
        let _ = handle.flush();
    }
}

impl Default for TermProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TermProgress {
    fn update(&mut self, stage: &str, item: &str, current: usize, total: usize) {
        let percent = if total > 0 { current * 100 / total } else { 100 };

        let mut handle = io::stderr().lock();
        // \x1B[2K clears the line
        let _ = write!(
            handle,
            "\r\x1B[2K{} [{}/{}] {}% {}",
            stage.colorize("bold cyan"),
            current,
            total,
            percent,
            item
        );
        let _ = handle.flush();
    }
}
