use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Counter used to recognise stale load results.
///
/// Every load takes a [`Ticket`]; starting another load invalidates all
/// earlier tickets.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    /// Creates a counter at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns its ticket.
    pub fn begin(&self) -> Ticket {
        let value = self.0.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket {
            value,
            counter: Arc::clone(&self.0),
        }
    }

    /// Invalidates every outstanding ticket without starting a load.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// The most recent generation.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}

/// Proof of which generation a load belongs to.
#[derive(Debug)]
pub struct Ticket {
    value: u64,
    counter: Arc<AtomicU64>,
}

impl Ticket {
    /// The generation this ticket was issued for.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns `true` if no newer generation has started.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let generation = Generation::new();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.value(), 2);

        generation.invalidate();
        assert!(!second.is_current());
        assert_eq!(generation.current(), 3);
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = Generation::new();
        let ticket = generation.begin();
        generation.clone().begin();
        assert!(!ticket.is_current());
    }
}
