//! Page shell: the small, nearly stateless interactions around the two
//! controllers (navigation menu, video modal, reveal-on-scroll, hero video).

pub mod hero;
pub mod interaction;
pub mod menu;
pub mod modal;
pub mod reveal;

pub use hero::HeroVideo;
pub use interaction::InteractionLatch;
pub use menu::MenuToggle;
pub use modal::VideoModal;
pub use reveal::RevealTracker;
