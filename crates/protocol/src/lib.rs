pub mod class_token;
pub mod commands;
pub mod types;

pub use class_token::ClassToken;
pub use commands::{AriaAttribute, UiCommand};
pub use types::{
    HeaderAnimation, MediaTarget, PlayAttempt, RevealId, ScrollSample, Target, TimerToken,
    VideoId,
};
