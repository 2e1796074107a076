//! Device selection tracking
//!
//! Each selection on a side gets a ticket with a higher generation than the
//! last. Only the newest ticket's response may replace that side's list;
//! anything older arriving later is stale. A side is in flight from `begin`
//! until its newest ticket completes.

use devcmp_core::ListSide;

/// Identifies one device selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    side: ListSide,
    generation: u64,
}

impl SelectionTicket {
    pub fn side(&self) -> ListSide {
        self.side
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Latest selection generation per side
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    latest: [u64; 2],
    in_flight: [bool; 2],
}

fn slot(side: ListSide) -> usize {
    match side {
        ListSide::A => 0,
        ListSide::B => 1,
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection on `side`, superseding any earlier one
    pub fn begin(&mut self, side: ListSide) -> SelectionTicket {
        let latest = &mut self.latest[slot(side)];
        *latest += 1;
        self.in_flight[slot(side)] = true;
        SelectionTicket {
            side,
            generation: *latest,
        }
    }

    /// Mark `ticket` as finished
    ///
    /// Returns false, leaving the side in flight, when a newer selection
    /// superseded it.
    pub fn complete(&mut self, ticket: SelectionTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight[slot(ticket.side)] = false;
        true
    }

    /// Whether the newest selection on `side` is still waiting for its data
    pub fn is_in_flight(&self, side: ListSide) -> bool {
        self.in_flight[slot(side)]
    }

    /// Whether either side is still waiting for its data
    pub fn any_in_flight(&self) -> bool {
        self.in_flight.iter().any(|pending| *pending)
    }

    /// Whether `ticket` is still the newest selection on its side
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.latest[slot(ticket.side)] == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.begin(ListSide::A);
        let second = tracker.begin(ListSide::A);

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_in_flight_until_newest_ticket_completes() {
        let mut tracker = SelectionTracker::new();
        let older = tracker.begin(ListSide::A);
        let newer = tracker.begin(ListSide::A);
        let b = tracker.begin(ListSide::B);

        assert!(!tracker.complete(older));
        assert!(tracker.is_in_flight(ListSide::A));

        assert!(tracker.complete(newer));
        assert!(!tracker.is_in_flight(ListSide::A));
        assert!(tracker.any_in_flight());

        assert!(tracker.complete(b));
        assert!(!tracker.any_in_flight());
    }

    #[test]
    fn test_sides_are_independent() {
        let mut tracker = SelectionTracker::new();
        let a = tracker.begin(ListSide::A);
        let b = tracker.begin(ListSide::B);
        tracker.begin(ListSide::B);

        assert!(tracker.is_current(a));
        assert!(!tracker.is_current(b));
        assert_eq!(a.side(), ListSide::A);
    }
}
