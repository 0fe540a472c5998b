//! Live progress for the scan: a counter with the most recently found repository.

use kdam::{Bar, BarExt};

/// Receives collector updates. Each call redraws the whole status line.
pub trait ProgressRenderer {
    /// A repository was appended; `count` is the cumulative total, `path` the newest one.
    fn found(&mut self, count: usize, path: &str);
    /// Scanning is over. `count` is the number written, or 0 when the build failed.
    fn finish(&mut self, count: usize);
}

/// Renders nothing. Used by library callers and tests.
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl ProgressRenderer for NoopRenderer {
    fn found(&mut self, _count: usize, _path: &str) {}
    fn finish(&mut self, _count: usize) {}
}

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = 0,
        desc = desc,
        position = 0,
        unit = " repos"
    )
}

/// kdam counter on stderr: `Scanning: 12 repos [..] found: /src/last/`.
pub struct CounterRenderer {
    bar: Bar,
}

impl CounterRenderer {
    pub fn new(desc: &'static str) -> Self {
        Self {
            bar: create_counter(desc),
        }
    }
}

impl ProgressRenderer for CounterRenderer {
    fn found(&mut self, count: usize, path: &str) {
        self.bar.set_postfix(format!("found: {path}"));
        let _ = self.bar.update_to(count);
    }

    fn finish(&mut self, _count: usize) {
        let _ = self.bar.clear();
    }
}
