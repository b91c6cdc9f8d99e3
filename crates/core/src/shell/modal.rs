use showreel_protocol::{AriaAttribute, ClassToken, MediaTarget, Target, UiCommand};

/// Whether a key press on a focusable video card should open the modal.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// The single video-preview modal.
#[derive(Debug)]
pub struct VideoModal {
    open: bool,
    has_video: bool,
}

impl VideoModal {
    /// `has_video` is false when the modal markup has no `<video>`; the
    /// modal still opens and closes, it just has nothing to play.
    pub fn new(has_video: bool) -> Self {
        Self {
            open: false,
            has_video,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the modal and play its video from the start.
    pub fn open(&mut self) -> Vec<UiCommand> {
        if self.open {
            return Vec::new();
        }
        self.open = true;
        let mut commands = vec![
            UiCommand::add(Target::Modal, ClassToken::Open),
            UiCommand::SetAria {
                target: Target::Modal,
                attribute: AriaAttribute::Hidden,
                value: false,
            },
        ];
        if self.has_video {
            commands.push(UiCommand::Rewind {
                media: MediaTarget::Modal,
            });
            commands.push(UiCommand::play(MediaTarget::Modal));
        }
        commands
    }

    pub fn close(&mut self) -> Vec<UiCommand> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        let mut commands = vec![
            UiCommand::remove(Target::Modal, ClassToken::Open),
            UiCommand::SetAria {
                target: Target::Modal,
                attribute: AriaAttribute::Hidden,
                value: true,
            },
        ];
        if self.has_video {
            commands.push(UiCommand::pause(MediaTarget::Modal));
        }
        commands
    }

    /// Document-level key handler. Escape closes an open modal.
    pub fn on_key(&mut self, key: &str) -> Vec<UiCommand> {
        if key == "Escape" && self.open {
            self.close()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rewinds_and_plays() {
        let mut modal = VideoModal::new(true);
        let commands = modal.open();
        assert!(modal.is_open());
        assert_eq!(
            &commands[2..],
            &[
                UiCommand::Rewind {
                    media: MediaTarget::Modal
                },
                UiCommand::play(MediaTarget::Modal),
            ]
        );
        assert!(modal.open().is_empty());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut modal = VideoModal::new(true);
        assert!(modal.on_key("Escape").is_empty());
        modal.open();
        assert!(modal.on_key("a").is_empty());
        let commands = modal.on_key("Escape");
        assert!(!modal.is_open());
        assert!(commands.contains(&UiCommand::pause(MediaTarget::Modal)));
        assert!(commands.contains(&UiCommand::SetAria {
            target: Target::Modal,
            attribute: AriaAttribute::Hidden,
            value: true,
        }));
    }

    #[test]
    fn modal_without_video_only_toggles_markup() {
        let mut modal = VideoModal::new(false);
        assert_eq!(modal.open().len(), 2);
        assert_eq!(modal.close().len(), 2);
    }

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
    }
}
