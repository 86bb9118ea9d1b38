use super::nil::{compare_nil_first, NilSentinel};
use crate::base::database::ColumnProperties;
use core::cmp::Ordering;
use itertools::Itertools;

/// Tracks the ordering and nil flags of a column while it is being encoded.
///
/// Each appended value is reported once, together with how it compares to its
/// predecessor. `sorted` and `reverse_sorted` start out true and are cleared
/// for good by the first pair that violates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTracker {
    sorted: bool,
    reverse_sorted: bool,
    has_nil: bool,
    count: usize,
}

impl Default for PropertyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyTracker {
    /// A tracker that has seen no values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sorted: true,
            reverse_sorted: true,
            has_nil: false,
            count: 0,
        }
    }

    /// Records the next value.
    ///
    /// `ordering` is how the value compares to the previous one, `None` for the
    /// first value or for values that are not comparable.
    pub fn record(&mut self, is_nil: bool, ordering: Option<Ordering>) {
        self.count += 1;
        self.has_nil |= is_nil;
        match ordering {
            Some(Ordering::Greater) => self.reverse_sorted = false,
            Some(Ordering::Less) => self.sorted = false,
            Some(Ordering::Equal) | None => {}
        }
    }

    /// Number of values recorded.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The flags for everything recorded so far.
    #[must_use]
    pub fn finish(&self) -> ColumnProperties {
        ColumnProperties {
            sorted: self.sorted,
            reverse_sorted: self.reverse_sorted,
            has_nil: self.has_nil,
            has_no_nil: !self.has_nil,
        }
    }

    /// Computes the flags of an already filled buffer in one forward scan.
    #[must_use]
    pub fn scan<T: NilSentinel>(values: &[T]) -> ColumnProperties {
        let mut tracker = Self::new();
        if let Some(first) = values.first() {
            tracker.record(first.is_nil(), None);
        }
        for (previous, current) in values.iter().copied().tuple_windows() {
            tracker.record(current.is_nil(), compare_nil_first(current, previous));
        }
        tracker.finish()
    }
}
