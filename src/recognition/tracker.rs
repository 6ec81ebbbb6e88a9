//! Sequencing of in-flight recognition calls
//!
//! Calls are not cancellable, so two overlapping uploads can complete in
//! either order. Each call carries a ticket and only the most recently issued
//! ticket may publish its result.

/// Sequence number handed to a recognition call when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides which completions are current
#[derive(Debug, Default)]
pub struct RecognitionTracker {
    issued: u64,
    in_flight: Option<u64>,
}

impl RecognitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new call, superseding any call still outstanding
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        RequestTicket(self.issued)
    }

    /// Settle a completed call; returns false when its result is stale
    pub fn finish(&mut self, ticket: RequestTicket) -> bool {
        let current = ticket.0 == self.issued;
        if current {
            self.in_flight = None;
        }
        current
    }

    /// Drop interest in every outstanding call
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.in_flight = None;
    }

    /// Whether the latest call is still awaiting its result
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_call() {
        let mut tracker = RecognitionTracker::new();
        assert!(!tracker.is_busy());

        let ticket = tracker.begin();
        assert!(tracker.is_busy());
        assert!(tracker.finish(ticket));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_older_completion_is_stale() {
        let mut tracker = RecognitionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        // Second completes first and is accepted
        assert!(tracker.finish(second));
        // First completes later and is discarded
        assert!(!tracker.finish(first));
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_stale_completion_keeps_latest_in_flight() {
        let mut tracker = RecognitionTracker::new();
        let first = tracker.begin();
        let _second = tracker.begin();

        assert!(!tracker.finish(first));
        assert!(tracker.is_busy());
    }

    #[test]
    fn test_invalidate_discards_outstanding() {
        let mut tracker = RecognitionTracker::new();
        let ticket = tracker.begin();
        tracker.invalidate();

        assert!(!tracker.is_busy());
        assert!(!tracker.finish(ticket));
    }

    #[test]
    fn test_tickets_increase() {
        let mut tracker = RecognitionTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        assert!(b > a);
        assert_eq!(b.sequence(), a.sequence() + 1);
    }
}
