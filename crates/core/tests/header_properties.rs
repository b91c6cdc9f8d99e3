//! Property tests for the header's top-lock zone and hysteresis band.

use proptest::prelude::*;
use showreel_core::config::{HeaderConfig, SCROLL_THRESHOLD_PX, TOP_LOCK_PX};
use showreel_core::header::{HeaderController, HeaderState};
use showreel_protocol::ScrollSample;

proptest! {
    /// Whatever happened before, landing inside the top-lock zone shows the
    /// header with no animation flag.
    #[test]
    fn ending_in_top_lock_zone_shows_header(
        start in 0u32..5_000,
        offsets in prop::collection::vec(0u32..5_000, 0..40),
        last in 0u32..TOP_LOCK_PX,
    ) {
        let mut header = HeaderController::new(HeaderConfig::default(), start, false);
        for (t, y) in offsets.into_iter().enumerate() {
            header.evaluate(ScrollSample::new(y, t as i64));
        }
        header.evaluate(ScrollSample::new(last, 9_999));

        prop_assert_eq!(header.state(), HeaderState::Shown);
        prop_assert_eq!(header.animation(), None);
        prop_assert_eq!(header.last_offset(), last);
    }

    /// Jitter within the hysteresis band never changes anything.
    #[test]
    fn small_deltas_never_transition(
        anchor in (TOP_LOCK_PX + SCROLL_THRESHOLD_PX)..5_000,
        deltas in prop::collection::vec(
            -(SCROLL_THRESHOLD_PX as i64)..=(SCROLL_THRESHOLD_PX as i64),
            1..60,
        ),
    ) {
        let mut header = HeaderController::new(HeaderConfig::default(), anchor, false);
        for (t, delta) in deltas.into_iter().enumerate() {
            let y = (i64::from(anchor) + delta) as u32;
            let commands = header.evaluate(ScrollSample::new(y, t as i64));
            prop_assert!(commands.is_empty());
            prop_assert_eq!(header.state(), HeaderState::Shown);
            prop_assert_eq!(header.last_offset(), anchor);
        }
    }
}
