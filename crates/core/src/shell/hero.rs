use showreel_protocol::{MediaTarget, PlayAttempt, UiCommand};
use tracing::{debug, warn};

use crate::error::PlaybackError;

/// Autoplaying hero background video with a single interaction retry.
#[derive(Debug, Default)]
pub struct HeroVideo {
    retry_armed: bool,
}

impl HeroVideo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retry_armed(&self) -> bool {
        self.retry_armed
    }

    pub fn start(&self) -> Vec<UiCommand> {
        vec![UiCommand::play(MediaTarget::Hero)]
    }

    pub fn on_play_rejected(
        &mut self,
        attempt: PlayAttempt,
        error: &PlaybackError,
    ) -> Vec<UiCommand> {
        if !error.is_policy() || attempt == PlayAttempt::InteractionRetry {
            warn!(%error, ?attempt, "hero video did not start");
            return Vec::new();
        }
        if self.retry_armed {
            return Vec::new();
        }
        debug!("hero autoplay blocked, waiting for user interaction");
        self.retry_armed = true;
        vec![UiCommand::ArmInteractionRetry]
    }

    pub fn on_user_interaction(&mut self) -> Vec<UiCommand> {
        if !std::mem::take(&mut self.retry_armed) {
            return Vec::new();
        }
        vec![UiCommand::Play {
            media: MediaTarget::Hero,
            attempt: PlayAttempt::InteractionRetry,
        }]
    }
}
