use serde::{Deserialize, Serialize};

/// Presentational CSS classes toggled by the controllers.
///
/// The core only ever talks in tokens; the sink resolves them to the class
/// names the site's stylesheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassToken {
    // Header
    HeaderHidden,
    HeaderExiting,
    HeaderRevealing,

    // Navigation / modal
    Open,

    // Reveal-on-scroll
    Visible,
}

impl ClassToken {
    pub fn class_name(self) -> &'static str {
        match self {
            ClassToken::HeaderHidden => "header--hidden",
            ClassToken::HeaderExiting => "header--exiting",
            ClassToken::HeaderRevealing => "header--revealing",
            ClassToken::Open => "open",
            ClassToken::Visible => "visible",
        }
    }
}
