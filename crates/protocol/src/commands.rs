use serde::{Deserialize, Serialize};

use crate::class_token::ClassToken;
use crate::types::{MediaTarget, PlayAttempt, Target, TimerToken};

/// A single, idempotent UI instruction.
///
/// Controllers return a `Vec<UiCommand>` from every event handler. Sinks
/// apply the list sequentially; each command carries all the data it needs
/// and applying it twice has the same effect as applying it once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCommand {
    /// Add a class to an element's class list.
    AddClass { target: Target, class: ClassToken },

    /// Remove a class from an element's class list.
    RemoveClass { target: Target, class: ClassToken },

    /// Set a boolean ARIA attribute to `"true"` or `"false"`.
    SetAria {
        target: Target,
        attribute: AriaAttribute,
        value: bool,
    },

    /// Stop observing an element for intersection changes.
    Unobserve { target: Target },

    /// Run `on_timer(token)` on the header controller after `delay_ms`.
    /// Fire-and-forget; never cancelled.
    ScheduleTimer { delay_ms: u32, token: TimerToken },

    /// Point a media element at its source and start loading it.
    AssignSource { media: MediaTarget, url: String },

    /// Seek a media element back to the start.
    Rewind { media: MediaTarget },

    /// Ask the platform to start playback. May be rejected asynchronously;
    /// the sink reports rejections back with the same `attempt`.
    Play {
        media: MediaTarget,
        attempt: PlayAttempt,
    },

    /// Pause playback.
    Pause { media: MediaTarget },

    /// Install the page-wide one-shot touch/click listener pair that
    /// triggers `on_user_interaction`. Installing twice is a no-op.
    ArmInteractionRetry,
}

impl UiCommand {
    pub fn add(target: Target, class: ClassToken) -> Self {
        UiCommand::AddClass { target, class }
    }

    pub fn remove(target: Target, class: ClassToken) -> Self {
        UiCommand::RemoveClass { target, class }
    }

    pub fn play(media: MediaTarget) -> Self {
        UiCommand::Play {
            media,
            attempt: PlayAttempt::Signal,
        }
    }

    pub fn pause(media: MediaTarget) -> Self {
        UiCommand::Pause { media }
    }
}

/// ARIA attributes the shell keeps in sync with its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AriaAttribute {
    Expanded,
    Hidden,
}

impl AriaAttribute {
    pub fn attribute_name(self) -> &'static str {
        match self {
            AriaAttribute::Expanded => "aria-expanded",
            AriaAttribute::Hidden => "aria-hidden",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VideoId;

    #[test]
    fn commands_serialize_as_tagged_json() {
        let cmd = UiCommand::play(MediaTarget::Tracked(VideoId(3)));
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("Play"));
        assert!(json.contains("Signal"));
    }
}
