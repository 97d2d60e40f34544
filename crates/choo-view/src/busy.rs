//! Outstanding-operation counter behind the busy indicator.

/// Counts in-flight remote operations; busy while any is outstanding.
#[derive(Debug, Clone, Default)]
pub struct BusyTracker {
    outstanding: usize,
}

impl BusyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.outstanding += 1;
    }

    /// Never drops below zero; an unmatched `end` is logged and ignored.
    pub fn end(&mut self) {
        match self.outstanding.checked_sub(1) {
            Some(n) => self.outstanding = n,
            None => tracing::warn!("BusyTracker::end called with no outstanding operation"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.outstanding > 0
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}
