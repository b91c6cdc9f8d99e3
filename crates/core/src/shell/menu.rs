use showreel_protocol::{AriaAttribute, ClassToken, Target, UiCommand};

/// Mobile navigation toggle.
#[derive(Debug, Default)]
pub struct MenuToggle {
    expanded: bool,
}

impl MenuToggle {
    /// `expanded` is the hamburger's initial `aria-expanded` value.
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) -> Vec<UiCommand> {
        self.expanded = !self.expanded;
        let links = if self.expanded {
            UiCommand::add(Target::NavLinks, ClassToken::Open)
        } else {
            UiCommand::remove(Target::NavLinks, ClassToken::Open)
        };
        vec![
            UiCommand::SetAria {
                target: Target::Hamburger,
                attribute: AriaAttribute::Expanded,
                value: self.expanded,
            },
            links,
        ]
    }
}
