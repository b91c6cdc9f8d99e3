use tracing::debug;

/// Bookkeeping for the page-level touch/click pair that retries blocked
/// autoplay. Any number of `ArmInteractionRetry` commands in one armed
/// period install the pair once; the first event of either kind ends the
/// period and both listeners go away.
#[derive(Debug, Default)]
pub struct InteractionLatch {
    armed: bool,
}

impl InteractionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` when the caller must install the listener pair now.
    pub fn arm(&mut self) -> bool {
        if self.armed {
            return false;
        }
        debug!("interaction retry armed");
        self.armed = true;
        true
    }

    /// A touch or click arrived. Returns `true` when it ends an armed period,
    /// meaning the pair must be removed and the retries dispatched.
    pub fn fire(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once_per_armed_period() {
        let mut latch = InteractionLatch::new();
        assert!(latch.arm());
        assert!(!latch.arm());
        assert!(!latch.arm());
        assert!(latch.is_armed());
    }

    #[test]
    fn first_event_disarms() {
        let mut latch = InteractionLatch::new();
        latch.arm();
        assert!(latch.fire());
        assert!(!latch.is_armed());
        // The second listener of the pair, if it still fires, does nothing.
        assert!(!latch.fire());
    }

    #[test]
    fn rearms_after_a_period_ends() {
        let mut latch = InteractionLatch::new();
        latch.arm();
        latch.fire();
        assert!(latch.arm());
    }

    #[test]
    fn unarmed_event_is_ignored() {
        let mut latch = InteractionLatch::new();
        assert!(!latch.fire());
    }
}
