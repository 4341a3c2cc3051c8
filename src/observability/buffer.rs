//! Bounded in-memory sink for exported span batches.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lines kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 256;

/// Shared ring of OTLP JSON lines.
///
/// Cloning hands out another handle to the same buffer: the exporter pushes, the
/// host drains (to the console, a beacon, a test assertion).
#[derive(Debug, Clone)]
pub struct SpanBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for SpanBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SpanBuffer {
    /// A buffer holding at most `capacity` lines (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Appends a line, evicting the oldest when full.
    pub fn push_line(&self, line: String) {
        let mut lines = self.lock();
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Removes and returns every buffered line, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock leaves plain strings behind; keep using them.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
