//! Scroll-direction header visibility.
//!
//! The header hides when the visitor scrolls toward content and comes back
//! when they scroll toward the top. Small movements are ignored, the first
//! few pixels of the page always show the header, and the slide animations
//! are tracked as transient flags cleared by one-shot timers.

mod gate;

pub use gate::ScrollGate;

use showreel_protocol::{
    ClassToken, HeaderAnimation, ScrollSample, Target, TimerToken, UiCommand,
};
use tracing::debug;

use crate::config::HeaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Shown,
    Hidden,
}

fn animation_class(animation: HeaderAnimation) -> ClassToken {
    match animation {
        HeaderAnimation::Exiting => ClassToken::HeaderExiting,
        HeaderAnimation::Revealing => ClassToken::HeaderRevealing,
    }
}

/// Header visibility state machine.
///
/// Owns no DOM: every handler returns the commands the sink must apply.
#[derive(Debug)]
pub struct HeaderController {
    config: HeaderConfig,
    /// Whether transitions skip the animation flags entirely.
    skip_animations: bool,
    state: HeaderState,
    animation: Option<HeaderAnimation>,
    /// Bumped on every transition; stamped into timer tokens.
    generation: u64,
    last_offset: u32,
    gate: ScrollGate,
}

impl HeaderController {
    /// Create a controller for a page currently scrolled to `initial_offset`.
    ///
    /// `prefers_reduced_motion` is the platform preference; it only has an
    /// effect when the config opts into respecting it.
    pub fn new(config: HeaderConfig, initial_offset: u32, prefers_reduced_motion: bool) -> Self {
        let skip_animations = config.respect_reduced_motion && prefers_reduced_motion;
        Self {
            config,
            skip_animations,
            state: HeaderState::Shown,
            animation: None,
            generation: 0,
            last_offset: initial_offset,
            gate: ScrollGate::new(),
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn animation(&self) -> Option<HeaderAnimation> {
        self.animation
    }

    pub fn last_offset(&self) -> u32 {
        self.last_offset
    }

    /// Scroll event handler. Returns `true` when the caller must request a
    /// display frame and call [`Self::on_frame`] from it.
    pub fn on_scroll(&mut self, sample: ScrollSample) -> bool {
        self.gate.offer(sample)
    }

    /// Frame callback: evaluates the newest sample recorded since the last
    /// frame, if any.
    pub fn on_frame(&mut self) -> Vec<UiCommand> {
        match self.gate.take() {
            Some(sample) => self.evaluate(sample),
            None => Vec::new(),
        }
    }

    /// Run the state machine on one sample, bypassing the frame gate.
    pub fn evaluate(&mut self, sample: ScrollSample) -> Vec<UiCommand> {
        let y = sample.y;

        if y < self.config.top_lock_px {
            self.last_offset = y;
            return self.force_shown();
        }

        let delta = i64::from(y) - i64::from(self.last_offset);
        if delta.unsigned_abs() <= u64::from(self.config.threshold_px) {
            return Vec::new();
        }
        self.last_offset = y;

        match (delta > 0, self.state) {
            (true, HeaderState::Shown) => self.hide(sample),
            (false, HeaderState::Hidden) => self.show(sample),
            _ => Vec::new(),
        }
    }

    /// Timer callback. Clears the animation flag named by `token` only if
    /// no newer transition has happened since it was scheduled.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<UiCommand> {
        if token.generation != self.generation || self.animation != Some(token.animation) {
            debug!(?token, current = self.generation, "stale header timer ignored");
            return Vec::new();
        }
        self.animation = None;
        vec![UiCommand::remove(
            Target::Header,
            animation_class(token.animation),
        )]
    }

    fn force_shown(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        if self.state == HeaderState::Hidden {
            debug!("header shown: top of page");
            self.state = HeaderState::Shown;
            commands.push(UiCommand::remove(Target::Header, ClassToken::HeaderHidden));
        }
        if let Some(animation) = self.animation.take() {
            commands.push(UiCommand::remove(Target::Header, animation_class(animation)));
        }
        commands
    }

    fn hide(&mut self, sample: ScrollSample) -> Vec<UiCommand> {
        debug!(y = sample.y, t = sample.timestamp_ms, "header hidden");
        self.state = HeaderState::Hidden;
        self.generation += 1;

        let mut commands = Vec::with_capacity(4);
        if let Some(previous) = self.animation.take() {
            commands.push(UiCommand::remove(Target::Header, animation_class(previous)));
        }
        if !self.skip_animations {
            commands.push(UiCommand::add(Target::Header, ClassToken::HeaderExiting));
        }
        commands.push(UiCommand::add(Target::Header, ClassToken::HeaderHidden));
        if !self.skip_animations {
            commands.push(self.start_animation(
                HeaderAnimation::Exiting,
                self.config.exit_clear_delay_ms(),
            ));
        }
        commands
    }

    fn show(&mut self, sample: ScrollSample) -> Vec<UiCommand> {
        debug!(y = sample.y, t = sample.timestamp_ms, "header revealed");
        self.state = HeaderState::Shown;
        self.generation += 1;

        let mut commands = Vec::with_capacity(4);
        commands.push(UiCommand::remove(Target::Header, ClassToken::HeaderHidden));
        if let Some(previous) = self.animation.take() {
            commands.push(UiCommand::remove(Target::Header, animation_class(previous)));
        }
        if !self.skip_animations {
            commands.push(UiCommand::add(Target::Header, ClassToken::HeaderRevealing));
            commands.push(self.start_animation(
                HeaderAnimation::Revealing,
                self.config.reveal_clear_delay_ms(),
            ));
        }
        commands
    }

    fn start_animation(&mut self, animation: HeaderAnimation, delay_ms: u32) -> UiCommand {
        self.animation = Some(animation);
        UiCommand::ScheduleTimer {
            delay_ms,
            token: TimerToken {
                generation: self.generation,
                animation,
            },
        }
    }
}
