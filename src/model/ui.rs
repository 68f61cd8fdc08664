//! UI state - presentation state separate from domain data

/// Which main panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Selection,
    Results,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Selection => Focus::Results,
            Focus::Results => Focus::Selection,
        }
    }
}
