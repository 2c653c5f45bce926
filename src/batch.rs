/*!
 * Bounded batch iteration.
 *
 * This module contains the deadline clock and the bounded iterator that
 * together cap how much work a single request's batch may consume: at most
 * `max_items` items, and no new item once the wall-clock deadline has passed.
 */

use std::time::{Duration, Instant};

use log::warn;

/// Wall-clock deadline shared by every item in one batch
///
/// The deadline is cooperative: callers check it at item boundaries before
/// starting new work. In-flight work is not cancelled when it expires.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    /// Create a deadline expiring `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self { end: Instant::now() + budget }
    }

    /// Whether the deadline has passed
    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    /// Time left before expiry, zero if already expired
    pub fn remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }
}

/// Resource caps applied to one batch
#[derive(Debug, Clone, Copy)]
pub struct BatchBudget {
    /// Maximum number of items processed per batch
    pub max_items: usize,

    /// Wall-clock budget for the whole batch
    pub time_budget: Duration,
}

impl Default for BatchBudget {
    fn default() -> Self {
        Self {
            max_items: 100,
            time_budget: Duration::from_secs(20),
        }
    }
}

impl BatchBudget {
    /// Start the batch clock, returning the deadline items are checked against
    pub fn start(&self) -> Deadline {
        Deadline::after(self.time_budget)
    }
}

/// Lazy, ordered iterator over at most `max_items` batch items
///
/// The input is truncated to its first `max_items` elements before any work
/// begins. Before yielding each item the deadline is checked; once expired the
/// sequence terminates and the remaining items are dropped silently. The
/// iterator is not restartable.
pub struct BoundedBatchIter<I> {
    inner: std::vec::IntoIter<I>,
    deadline: Deadline,
    yielded: usize,
    stopped: bool,
}

impl<I> BoundedBatchIter<I> {
    /// Create a bounded iterator over `items` under `budget`
    ///
    /// The deadline starts counting immediately.
    pub fn new(mut items: Vec<I>, budget: &BatchBudget) -> Self {
        if items.len() > budget.max_items {
            warn!(
                "Batch of {} items truncated to {}",
                items.len(),
                budget.max_items
            );
            items.truncate(budget.max_items);
        }
        Self {
            inner: items.into_iter(),
            deadline: budget.start(),
            yielded: 0,
            stopped: false,
        }
    }

    /// The deadline this iterator polls
    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Number of items yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<I> Iterator for BoundedBatchIter<I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        if self.stopped {
            return None;
        }
        // The first item is always admitted; the clock only gates the rest.
        if self.yielded > 0 && self.deadline.expired() {
            warn!(
                "Batch deadline reached after {} items, dropping the rest",
                self.yielded
            );
            self.stopped = true;
            return None;
        }
        let item = self.inner.next()?;
        self.yielded += 1;
        Some(item)
    }
}
