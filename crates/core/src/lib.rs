//! State machines behind the showreel site's scroll and media behaviour.
//!
//! Nothing in this crate touches the DOM. Each controller consumes plain
//! event values and returns a `Vec<UiCommand>` for a sink to apply, which
//! keeps every transition testable without a browser.

pub mod config;
pub mod error;
pub mod header;
pub mod media;
pub mod shell;

pub use config::{ShellConfig, SiteConfig};
pub use error::{ConfigError, PlaybackError};
pub use header::{HeaderController, HeaderState};
pub use media::{MediaManager, PageVisibility, VisibilityEntry};
