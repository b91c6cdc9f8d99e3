//! Background video lifecycle.
//!
//! Videos are discovered once at startup. Each one loads its source the
//! first time it scrolls into view, plays while visible, pauses when it
//! leaves the viewport, and pauses unconditionally while the tab is hidden.

use showreel_protocol::{MediaTarget, PlayAttempt, UiCommand, VideoId};
use tracing::{debug, warn};

use crate::error::PlaybackError;

/// Intersection state of one element, as delivered by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEntry {
    Intersecting,
    NotIntersecting,
}

impl From<bool> for VisibilityEntry {
    fn from(is_intersecting: bool) -> Self {
        if is_intersecting {
            VisibilityEntry::Intersecting
        } else {
            VisibilityEntry::NotIntersecting
        }
    }
}

/// Document visibility, refreshed by the sink on every dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageVisibility {
    pub hidden: bool,
}

impl PageVisibility {
    pub const VISIBLE: PageVisibility = PageVisibility { hidden: false };
    pub const HIDDEN: PageVisibility = PageVisibility { hidden: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIntent {
    Play,
    Pause,
}

/// Last command issued to a video, not a confirmed playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPhase {
    /// No source assigned yet.
    Idle,
    /// Source assigned, no play command issued yet.
    Loaded,
    Playing,
    Paused,
    /// Playback failed for a reason other than autoplay policy.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct TrackedVideo {
    id: VideoId,
    deferred_source: Option<String>,
    has_source: bool,
    intent: PlaybackIntent,
    phase: VideoPhase,
    retry_armed: bool,
}

impl TrackedVideo {
    pub fn id(&self) -> VideoId {
        self.id
    }

    pub fn deferred_source(&self) -> Option<&str> {
        self.deferred_source.as_deref()
    }

    pub fn has_source(&self) -> bool {
        self.has_source
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.intent
    }

    pub fn phase(&self) -> VideoPhase {
        self.phase
    }

    pub fn retry_armed(&self) -> bool {
        self.retry_armed
    }

    fn media(&self) -> MediaTarget {
        MediaTarget::Tracked(self.id)
    }

    /// Assign the deferred source the first time it is needed. Never undone.
    fn ensure_source(&mut self, commands: &mut Vec<UiCommand>) {
        if self.has_source {
            return;
        }
        let Some(url) = self.deferred_source.clone() else {
            return;
        };
        debug!(video = self.id.0, %url, "loading deferred source");
        self.has_source = true;
        self.phase = VideoPhase::Loaded;
        commands.push(UiCommand::AssignSource {
            media: self.media(),
            url,
        });
    }

    fn play(&mut self, commands: &mut Vec<UiCommand>) {
        self.phase = VideoPhase::Playing;
        commands.push(UiCommand::play(self.media()));
    }

    fn pause(&mut self, commands: &mut Vec<UiCommand>) {
        if self.has_source && self.phase != VideoPhase::Stopped {
            self.phase = VideoPhase::Paused;
        }
        commands.push(UiCommand::pause(self.media()));
    }
}

/// Keeps a fixed set of background videos in step with viewport and page
/// visibility.
#[derive(Debug, Default)]
pub struct MediaManager {
    videos: Vec<TrackedVideo>,
}

impl MediaManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a video. `has_source` is true when the markup already gave the
    /// element a playable source.
    pub fn register(&mut self, deferred_source: Option<String>, has_source: bool) -> VideoId {
        let id = VideoId(self.videos.len() as u32);
        self.videos.push(TrackedVideo {
            id,
            deferred_source,
            has_source,
            intent: PlaybackIntent::Pause,
            phase: if has_source {
                VideoPhase::Loaded
            } else {
                VideoPhase::Idle
            },
            retry_armed: false,
        });
        id
    }

    pub fn video(&self, id: VideoId) -> Option<&TrackedVideo> {
        self.videos.get(id.0 as usize)
    }

    pub fn videos(&self) -> &[TrackedVideo] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Intersection observer callback for one video.
    ///
    /// While the page is hidden a newly visible video still gets its source,
    /// but playback waits for the page to become visible again.
    pub fn on_intersection(
        &mut self,
        id: VideoId,
        entry: VisibilityEntry,
        page: PageVisibility,
    ) -> Vec<UiCommand> {
        let Some(video) = self.videos.get_mut(id.0 as usize) else {
            debug!(video = id.0, "intersection for unknown video");
            return Vec::new();
        };

        let mut commands = Vec::new();
        match entry {
            VisibilityEntry::Intersecting => {
                video.intent = PlaybackIntent::Play;
                video.ensure_source(&mut commands);
                if !page.hidden {
                    video.play(&mut commands);
                }
            }
            VisibilityEntry::NotIntersecting => {
                video.intent = PlaybackIntent::Pause;
                video.pause(&mut commands);
            }
        }
        commands
    }

    /// Document visibility change: pause everything when hidden, play
    /// everything (loading sources as needed) when visible again.
    pub fn on_page_visibility(&mut self, page: PageVisibility) -> Vec<UiCommand> {
        debug!(
            hidden = page.hidden,
            videos = self.videos.len(),
            "page visibility changed"
        );
        let mut commands = Vec::with_capacity(self.videos.len() * 2);
        for video in &mut self.videos {
            if page.hidden {
                video.pause(&mut commands);
            } else {
                video.ensure_source(&mut commands);
                video.play(&mut commands);
            }
        }
        commands
    }

    /// A play command issued earlier was rejected by the platform.
    pub fn on_play_rejected(
        &mut self,
        id: VideoId,
        attempt: PlayAttempt,
        error: &PlaybackError,
    ) -> Vec<UiCommand> {
        let Some(video) = self.videos.get_mut(id.0 as usize) else {
            return Vec::new();
        };

        match (error, attempt) {
            (PlaybackError::Aborted, _) => {
                debug!(video = id.0, "play aborted by a later command");
                Vec::new()
            }
            (PlaybackError::Policy, PlayAttempt::Signal) => {
                video.phase = VideoPhase::Paused;
                if video.retry_armed {
                    return Vec::new();
                }
                debug!(video = id.0, "autoplay blocked, waiting for user interaction");
                video.retry_armed = true;
                vec![UiCommand::ArmInteractionRetry]
            }
            (PlaybackError::Policy, PlayAttempt::InteractionRetry) => {
                warn!(video = id.0, "autoplay still blocked after user interaction");
                video.phase = VideoPhase::Paused;
                Vec::new()
            }
            (PlaybackError::Media(message), _) => {
                warn!(video = id.0, reason = %message, "playback failed");
                Self::stop(video)
            }
        }
    }

    /// The media element reported an `error` event.
    pub fn on_media_error(&mut self, id: VideoId, message: &str) -> Vec<UiCommand> {
        let Some(video) = self.videos.get_mut(id.0 as usize) else {
            return Vec::new();
        };
        warn!(video = id.0, reason = message, "media element error");
        Self::stop(video)
    }

    /// First touch or click after an autoplay rejection: retry every armed
    /// video exactly once. Armed videos that have since left the viewport are
    /// disarmed silently; their next `Intersecting` plays them.
    pub fn on_user_interaction(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        for video in self.videos.iter_mut().filter(|v| v.retry_armed) {
            video.retry_armed = false;
            if video.intent != PlaybackIntent::Play {
                debug!(video = video.id.0, "retry dropped, video is off-screen");
                continue;
            }
            video.phase = VideoPhase::Playing;
            commands.push(UiCommand::Play {
                media: video.media(),
                attempt: PlayAttempt::InteractionRetry,
            });
        }
        commands
    }

    fn stop(video: &mut TrackedVideo) -> Vec<UiCommand> {
        video.phase = VideoPhase::Stopped;
        video.retry_armed = false;
        vec![UiCommand::pause(video.media())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(sources: &[&str]) -> MediaManager {
        let mut manager = MediaManager::new();
        for src in sources {
            manager.register(Some((*src).to_string()), false);
        }
        manager
    }

    fn assigns(commands: &[UiCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, UiCommand::AssignSource { .. }))
            .count()
    }

    #[test]
    fn first_intersection_loads_then_plays() {
        let mut manager = manager_with(&["a.mp4"]);
        let commands = manager.on_intersection(
            VideoId(0),
            VisibilityEntry::Intersecting,
            PageVisibility::VISIBLE,
        );
        assert_eq!(
            commands,
            vec![
                UiCommand::AssignSource {
                    media: MediaTarget::Tracked(VideoId(0)),
                    url: "a.mp4".into(),
                },
                UiCommand::play(MediaTarget::Tracked(VideoId(0))),
            ]
        );
        let video = manager.video(VideoId(0)).unwrap();
        assert!(video.has_source());
        assert_eq!(video.phase(), VideoPhase::Playing);
    }

    #[test]
    fn second_intersection_only_plays() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        manager.on_intersection(id, VisibilityEntry::NotIntersecting, PageVisibility::VISIBLE);
        let commands =
            manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        assert_eq!(assigns(&commands), 0);
        assert_eq!(commands, vec![UiCommand::play(MediaTarget::Tracked(VideoId(0)))]);
    }

    #[test]
    fn leaving_viewport_pauses_without_loading() {
        let mut manager = manager_with(&["a.mp4"]);
        for _ in 0..3 {
            let commands = manager.on_intersection(
                VideoId(0),
                VisibilityEntry::NotIntersecting,
                PageVisibility::VISIBLE,
            );
            assert_eq!(commands, vec![UiCommand::pause(MediaTarget::Tracked(VideoId(0)))]);
        }
        let video = manager.video(VideoId(0)).unwrap();
        assert!(!video.has_source());
        assert_eq!(video.phase(), VideoPhase::Idle);
    }

    #[test]
    fn preloaded_video_is_never_reassigned() {
        let mut manager = MediaManager::new();
        let id = manager.register(Some("a.mp4".into()), true);
        let commands =
            manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        assert_eq!(assigns(&commands), 0);
    }

    #[test]
    fn intersection_while_hidden_loads_but_defers_play() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        let commands =
            manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::HIDDEN);
        assert_eq!(assigns(&commands), 1);
        assert!(!commands.iter().any(|c| matches!(c, UiCommand::Play { .. })));
    }

    #[test]
    fn hidden_page_pauses_every_video() {
        let mut manager = manager_with(&["a.mp4", "b.mp4", "c.mp4"]);
        manager.on_intersection(VideoId(1), VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        let commands = manager.on_page_visibility(PageVisibility::HIDDEN);
        let paused: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::Pause { media } => Some(*media),
                _ => None,
            })
            .collect();
        assert_eq!(paused.len(), 3);
        assert_eq!(manager.video(VideoId(1)).unwrap().phase(), VideoPhase::Paused);
    }

    #[test]
    fn visible_page_loads_and_plays_every_video() {
        let mut manager = manager_with(&["a.mp4", "b.mp4"]);
        manager.on_intersection(VideoId(0), VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        let commands = manager.on_page_visibility(PageVisibility::VISIBLE);
        // Only the never-seen video needs a source.
        assert_eq!(assigns(&commands), 1);
        let plays = commands
            .iter()
            .filter(|c| matches!(c, UiCommand::Play { .. }))
            .count();
        assert_eq!(plays, 2);
    }

    #[test]
    fn policy_rejection_arms_one_retry() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);

        let armed = manager.on_play_rejected(id, PlayAttempt::Signal, &PlaybackError::Policy);
        assert_eq!(armed, vec![UiCommand::ArmInteractionRetry]);
        // A second rejection before any interaction does not stack.
        assert!(manager
            .on_play_rejected(id, PlayAttempt::Signal, &PlaybackError::Policy)
            .is_empty());

        let retry = manager.on_user_interaction();
        assert_eq!(
            retry,
            vec![UiCommand::Play {
                media: MediaTarget::Tracked(id),
                attempt: PlayAttempt::InteractionRetry,
            }]
        );
        assert!(manager.on_user_interaction().is_empty());
    }

    #[test]
    fn retry_skips_video_that_left_the_viewport() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        manager.on_play_rejected(id, PlayAttempt::Signal, &PlaybackError::Policy);
        manager.on_intersection(id, VisibilityEntry::NotIntersecting, PageVisibility::VISIBLE);

        let commands = manager.on_user_interaction();
        assert!(!commands.iter().any(|c| matches!(c, UiCommand::Play { .. })));
        let video = manager.video(id).unwrap();
        assert!(!video.retry_armed());
        assert_eq!(video.phase(), VideoPhase::Paused);

        // Scrolling back in plays it through the normal path.
        let commands =
            manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        assert_eq!(commands, vec![UiCommand::play(MediaTarget::Tracked(id))]);
    }

    #[test]
    fn rejected_retry_is_not_rearmed() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        manager.on_play_rejected(id, PlayAttempt::Signal, &PlaybackError::Policy);
        manager.on_user_interaction();
        let commands =
            manager.on_play_rejected(id, PlayAttempt::InteractionRetry, &PlaybackError::Policy);
        assert!(commands.is_empty());
        assert!(!manager.video(id).unwrap().retry_armed());
        assert!(manager.on_user_interaction().is_empty());
    }

    #[test]
    fn decode_failure_stops_until_next_signal() {
        let mut manager = manager_with(&["a.mp4"]);
        let id = VideoId(0);
        manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        let commands = manager.on_play_rejected(
            id,
            PlayAttempt::Signal,
            &PlaybackError::Media("decode".into()),
        );
        assert_eq!(commands, vec![UiCommand::pause(MediaTarget::Tracked(id))]);
        assert_eq!(manager.video(id).unwrap().phase(), VideoPhase::Stopped);
        assert!(manager.on_user_interaction().is_empty());

        let commands =
            manager.on_intersection(id, VisibilityEntry::Intersecting, PageVisibility::VISIBLE);
        assert_eq!(commands, vec![UiCommand::play(MediaTarget::Tracked(id))]);
    }

    #[test]
    fn media_error_event_stops_video() {
        let mut manager = manager_with(&["a.mp4"]);
        let commands = manager.on_media_error(VideoId(0), "MEDIA_ERR_DECODE");
        assert_eq!(commands, vec![UiCommand::pause(MediaTarget::Tracked(VideoId(0)))]);
        assert_eq!(manager.video(VideoId(0)).unwrap().phase(), VideoPhase::Stopped);
    }

    #[test]
    fn aborted_play_is_ignored() {
        let mut manager = manager_with(&["a.mp4"]);
        assert!(manager
            .on_play_rejected(VideoId(0), PlayAttempt::Signal, &PlaybackError::Aborted)
            .is_empty());
        assert!(!manager.video(VideoId(0)).unwrap().retry_armed());
    }

    #[test]
    fn unknown_video_is_ignored() {
        let mut manager = MediaManager::new();
        assert!(manager
            .on_intersection(VideoId(9), VisibilityEntry::Intersecting, PageVisibility::VISIBLE)
            .is_empty());
    }
}
