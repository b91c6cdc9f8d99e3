use showreel_protocol::ScrollSample;

/// Coalesces scroll events into at most one evaluation per display frame.
///
/// Every event overwrites the latest sample. Only the first event after an
/// evaluation asks for a frame; the frame callback then consumes whatever
/// sample is newest at that point.
#[derive(Debug, Default)]
pub struct ScrollGate {
    latest: Option<ScrollSample>,
    pending: bool,
}

impl ScrollGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. Returns `true` when the caller must schedule a
    /// frame callback, `false` when one is already outstanding.
    pub fn offer(&mut self, sample: ScrollSample) -> bool {
        self.latest = Some(sample);
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending flag and the newest sample.
    pub fn take(&mut self) -> Option<ScrollSample> {
        self.pending = false;
        self.latest.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
