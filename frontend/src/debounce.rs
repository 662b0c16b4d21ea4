//! Leading and trailing debounce over caller-supplied timestamps.
//!
//! Nothing here touches a clock. The caller passes "now" in milliseconds and
//! arranges for [`Debouncer::poll`] to run at [`Debouncer::deadline`].

#[derive(Debug)]
pub struct Debouncer<T> {
    wait_ms: u64,
    last_offer: Option<u64>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            last_offer: None,
            pending: None,
        }
    }

    /// Returns `value` straight back when the window is quiet. Otherwise it
    /// is held as the trailing value, replacing any earlier one, and the
    /// window is pushed out.
    pub fn offer(&mut self, value: T, now: u64) -> Option<T> {
        let quiet = match self.last_offer {
            Some(last) => now.saturating_sub(last) >= self.wait_ms,
            None => true,
        };
        self.last_offer = Some(now);
        if quiet {
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// When the held value becomes due, if one is held.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref()?;
        self.last_offer.map(|last| last + self.wait_ms)
    }

    pub fn poll(&mut self, now: u64) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take(),
            _ => None,
        }
    }

    /// Releases the held value regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offer_fires_immediately() {
        let mut debouncer = Debouncer::new(1000);
        assert_eq!(debouncer.offer(1, 0), Some(1));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_burst_fires_latest_once_on_trailing_edge() {
        let mut debouncer = Debouncer::new(1000);
        assert_eq!(debouncer.offer(1, 0), Some(1));
        assert_eq!(debouncer.offer(2, 100), None);
        assert_eq!(debouncer.offer(3, 500), None);
        assert_eq!(debouncer.deadline(), Some(1500));

        assert_eq!(debouncer.poll(1499), None);
        assert_eq!(debouncer.poll(1500), Some(3));
        assert_eq!(debouncer.poll(3000), None);
    }

    #[test]
    fn test_offers_keep_pushing_the_window() {
        let mut debouncer = Debouncer::new(1000);
        debouncer.offer('a', 0);
        for t in (900..5000).step_by(900) {
            assert_eq!(debouncer.offer('b', t), None);
        }
        assert_eq!(debouncer.poll(4600), None);
        assert_eq!(debouncer.poll(5500), Some('b'));
    }

    #[test]
    fn test_quiet_period_restarts_with_leading_edge() {
        let mut debouncer = Debouncer::new(1000);
        debouncer.offer(1, 0);
        debouncer.offer(2, 10);
        assert_eq!(debouncer.poll(1010), Some(2));
        assert_eq!(debouncer.offer(3, 2500), Some(3));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush() {
        let mut debouncer = Debouncer::new(1000);
        debouncer.offer(1, 0);
        debouncer.offer(2, 1);
        assert_eq!(debouncer.flush(), Some(2));
        assert_eq!(debouncer.flush(), None);
    }
}
