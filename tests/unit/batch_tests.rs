/*!
 * Tests for the deadline clock and bounded batch iteration
 */

use std::time::Duration;

use medreviews_batch::batch::{BatchBudget, BoundedBatchIter, Deadline};

/// Test that oversized input is truncated before any processing
#[test]
fn test_bounded_iter_withOversizedInput_shouldTruncateToMaxItems() {
    let budget = BatchBudget {
        max_items: 100,
        time_budget: Duration::from_secs(20),
    };
    let input: Vec<usize> = (0..150).collect();

    let collected: Vec<usize> = BoundedBatchIter::new(input, &budget).collect();

    assert_eq!(collected.len(), 100);
    assert_eq!(collected[0], 0);
    assert_eq!(collected[99], 99);
}

/// Test that items come out in input order
#[test]
fn test_bounded_iter_withSmallInput_shouldPreserveOrder() {
    let budget = BatchBudget::default();
    let input = vec!["a", "b", "c"];

    let collected: Vec<&str> = BoundedBatchIter::new(input, &budget).collect();

    assert_eq!(collected, vec!["a", "b", "c"]);
}

/// Test that an already-expired deadline still admits the first item
/// and drops the rest silently
#[test]
fn test_bounded_iter_withExpiredDeadline_shouldStopAfterFirstItem() {
    let budget = BatchBudget {
        max_items: 100,
        time_budget: Duration::from_secs(0),
    };

    let collected: Vec<i32> = BoundedBatchIter::new(vec![1, 2, 3], &budget).collect();

    assert_eq!(collected, vec![1]);
}

/// Test that the iterator is finite and fused once stopped
#[test]
fn test_bounded_iter_afterDeadlineStop_shouldKeepReturningNone() {
    let budget = BatchBudget {
        max_items: 100,
        time_budget: Duration::from_secs(0),
    };
    let mut iter = BoundedBatchIter::new(vec![1, 2, 3], &budget);

    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.yielded(), 1);
}

/// Test deadline expiry and remaining-time clamping
#[test]
fn test_deadline_withZeroBudget_shouldBeExpiredWithNoRemaining() {
    let deadline = Deadline::after(Duration::from_secs(0));

    assert!(deadline.expired());
    assert_eq!(deadline.remaining(), Duration::ZERO);
}

/// Test that a generous deadline is not expired
#[test]
fn test_deadline_withGenerousBudget_shouldNotBeExpired() {
    let deadline = Deadline::after(Duration::from_secs(60));

    assert!(!deadline.expired());
    assert!(deadline.remaining() > Duration::from_secs(50));
}
