//! Site configuration.
//!
//! Every field has a default matching the stylesheet's timings, so an empty
//! JSON object (or no config at all) yields a working setup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scroll offset below which the header is always shown.
pub const TOP_LOCK_PX: u32 = 10;
/// Minimum scroll delta considered a deliberate direction change.
pub const SCROLL_THRESHOLD_PX: u32 = 12;
/// Duration of the header's slide-out animation.
pub const ANIM_OUT_MS: u32 = 320;
/// Duration of the header's slide-in animation.
pub const REVEAL_MS: u32 = 450;
/// Slack added to animation timers so the class outlives the CSS transition.
pub const ANIM_SAFETY_MARGIN_MS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub header: HeaderConfig,
    pub media: MediaConfig,
    pub reveal: RevealConfig,
    pub shell: ShellConfig,
    /// `tracing` filter directives for the browser console.
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            media: MediaConfig::default(),
            reveal: RevealConfig::default(),
            shell: ShellConfig::default(),
            log_filter: "warn".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("media.threshold", self.media.threshold)?;
        check_ratio("reveal.threshold", self.reveal.threshold)?;
        Ok(())
    }
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "between 0 and 1",
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    pub top_lock_px: u32,
    pub threshold_px: u32,
    pub anim_out_ms: u32,
    pub reveal_ms: u32,
    pub safety_margin_ms: u32,
    /// Skip the slide animations when the visitor prefers reduced motion.
    /// Off by default: the header motion is part of the site's design.
    pub respect_reduced_motion: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: "header".to_string(),
            top_lock_px: TOP_LOCK_PX,
            threshold_px: SCROLL_THRESHOLD_PX,
            anim_out_ms: ANIM_OUT_MS,
            reveal_ms: REVEAL_MS,
            safety_margin_ms: ANIM_SAFETY_MARGIN_MS,
            respect_reduced_motion: false,
        }
    }
}

impl HeaderConfig {
    pub fn exit_clear_delay_ms(&self) -> u32 {
        self.anim_out_ms.saturating_add(self.safety_margin_ms)
    }

    pub fn reveal_clear_delay_ms(&self) -> u32 {
        self.reveal_ms.saturating_add(self.safety_margin_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Selector for the lazily loaded background videos.
    pub selector: String,
    /// Attribute holding the deferred source URL.
    pub source_attribute: String,
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            selector: "video.marquee-video".to_string(),
            source_attribute: "data-src".to_string(),
            root_margin: "200px 0px".to_string(),
            threshold: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            threshold: 0.15,
        }
    }
}

/// Selectors for the page furniture around the header and media
/// controllers. Each one resolves to the first match unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub hamburger: String,
    pub nav_links: String,
    pub modal: String,
    pub modal_video: String,
    pub modal_close: String,
    pub modal_overlay: String,
    /// All matches open the modal on click.
    pub modal_triggers: String,
    /// All matches open the modal on click and on Enter/Space.
    pub video_cards: String,
    /// All matches get their children duplicated once.
    pub marquee_tracks: String,
    pub hero_video: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            hamburger: ".hamburger".to_string(),
            nav_links: ".nav-links".to_string(),
            modal: "#video-modal".to_string(),
            modal_video: "#modal-video".to_string(),
            modal_close: ".modal-close".to_string(),
            modal_overlay: ".modal-overlay".to_string(),
            modal_triggers: ".showreel-trigger".to_string(),
            video_cards: ".video-card".to_string(),
            marquee_tracks: ".marquee-track".to_string(),
            hero_video: ".hero-video".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.header.exit_clear_delay_ms(), 360);
        assert_eq!(config.header.reveal_clear_delay_ms(), 490);
        assert_eq!(config.media.root_margin, "200px 0px");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            SiteConfig::from_json(r#"{"header": {"respect_reduced_motion": true}}"#).unwrap();
        assert!(config.header.respect_reduced_motion);
        assert_eq!(config.header.top_lock_px, TOP_LOCK_PX);
        assert_eq!(config.reveal.threshold, 0.15);
    }

    #[test]
    fn shell_selectors_can_be_overridden() {
        let config =
            SiteConfig::from_json(r#"{"shell": {"marquee_tracks": ".ticker"}}"#).unwrap();
        assert_eq!(config.shell.marquee_tracks, ".ticker");
        assert_eq!(config.shell.modal, "#video-modal");
        assert_eq!(config.shell.hero_video, ".hero-video");
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = SiteConfig::from_json(r#"{"media": {"threshold": 1.5}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "media.threshold",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SiteConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
