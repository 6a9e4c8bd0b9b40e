//! Product id allocation.

use std::fmt::Debug;

use twist_taste_core::ProductId;

/// Source of fresh product ids.
///
/// Implementations must never return the same id twice in a row; the catalog
/// additionally re-draws until it gets an id it does not already hold.
pub trait IdAllocator: Send + Debug {
    fn allocate(&mut self) -> ProductId;
}

/// Ids seeded from the wall clock (milliseconds) but strictly increasing.
///
/// Two products created within the same millisecond, or after the clock
/// steps backwards, still get distinct ids.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: i64,
}

impl ClockIds {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }
}

impl IdAllocator for ClockIds {
    fn allocate(&mut self) -> ProductId {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = now.max(self.last.saturating_add(1));
        ProductId::new(self.last)
    }
}

/// Plain counter, for tests and deterministic fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    #[must_use]
    pub const fn starting_at(first: i64) -> Self {
        Self { next: first }
    }
}

impl IdAllocator for SequentialIds {
    fn allocate(&mut self) -> ProductId {
        let id = ProductId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_ids_strictly_increase() {
        let mut ids = ClockIds::new();
        let mut previous = ids.allocate();
        for _ in 0..1_000 {
            let next = ids.allocate();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_clock_ids_track_wall_clock() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = ClockIds::new().allocate();
        assert!(id.as_i64() >= before);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::starting_at(100);
        assert_eq!(ids.allocate(), ProductId::new(100));
        assert_eq!(ids.allocate(), ProductId::new(101));
    }
}
