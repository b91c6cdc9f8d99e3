use showreel_protocol::{ClassToken, RevealId, Target, UiCommand};

use crate::media::VisibilityEntry;

/// One-shot reveal-on-scroll: an element gets `visible` the first time it
/// intersects and is then dropped from the observer.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> RevealId {
        self.revealed.push(false);
        RevealId(self.revealed.len() as u32 - 1)
    }

    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.revealed.get(id.0 as usize).copied().unwrap_or(false)
    }

    pub fn on_intersection(&mut self, id: RevealId, entry: VisibilityEntry) -> Vec<UiCommand> {
        if entry != VisibilityEntry::Intersecting {
            return Vec::new();
        }
        let Some(revealed) = self.revealed.get_mut(id.0 as usize) else {
            return Vec::new();
        };
        if *revealed {
            return Vec::new();
        }
        *revealed = true;
        let target = Target::Reveal(id);
        vec![
            UiCommand::add(target, ClassToken::Visible),
            UiCommand::Unobserve { target },
        ]
    }
}
