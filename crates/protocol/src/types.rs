use serde::{Deserialize, Serialize};

/// One reading of the page's vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollSample {
    /// Vertical offset in whole CSS pixels (never negative).
    pub y: u32,
    /// When the sample was taken, in milliseconds on the page clock.
    pub timestamp_ms: i64,
}

impl ScrollSample {
    pub fn new(y: u32, timestamp_ms: i64) -> Self {
        Self { y, timestamp_ms }
    }

    /// Build a sample from a raw `scrollY` reading. Negative offsets
    /// (rubber-band overscroll) are clamped to zero.
    pub fn from_offset(y: f64, timestamp_ms: f64) -> Self {
        let y = if y.is_finite() { y.max(0.0).round() } else { 0.0 };
        Self {
            y: y.min(f64::from(u32::MAX)) as u32,
            timestamp_ms: timestamp_ms as i64,
        }
    }
}

/// Index of a background video registered with the media manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VideoId(pub u32);

/// Index of an element observed for the one-shot reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealId(pub u32);

/// DOM elements that commands can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Header,
    Hamburger,
    NavLinks,
    Modal,
    Reveal(RevealId),
}

/// Media elements that commands can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaTarget {
    /// A lazily loaded background video.
    Tracked(VideoId),
    /// The video inside the preview modal.
    Modal,
    /// The autoplaying hero background video.
    Hero,
}

/// Transient header animation. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderAnimation {
    /// The header is sliding out after a downward scroll.
    Exiting,
    /// The header is sliding back in after an upward scroll.
    Revealing,
}

/// Identifies a scheduled animation-flag clear.
///
/// The receiver compares both fields against its current state before
/// clearing anything, so a timer that outlived its transition is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub generation: u64,
    pub animation: HeaderAnimation,
}

/// Why a play command was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayAttempt {
    /// Issued in response to an intersection or page-visibility signal.
    Signal,
    /// Issued by the one-shot user-interaction retry after a rejection.
    InteractionRetry,
}
