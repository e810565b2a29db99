//! Bounded ring of metrics; the oldest entry is evicted first.

use std::collections::VecDeque;

use vigil_core::models::HealthMetric;

/// Append-only metric window with a fixed capacity.
#[derive(Debug, Clone)]
pub struct MetricWindow {
    entries: VecDeque<HealthMetric>,
    capacity: usize,
}

impl MetricWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting from the front once full.
    pub fn push(&mut self, metric: HealthMetric) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(metric);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HealthMetric> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
