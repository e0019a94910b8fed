use serde::{Deserialize, Serialize};

/// User-facing commands, each bindable to a key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Add the current file to the list
    Add,
    /// Remove the current file from the list
    Remove,
    /// Empty the list
    Clear,
    Next,
    Prev,
    First,
    Last,
    /// Render the status overlay
    Show,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Add,
        Action::Remove,
        Action::Clear,
        Action::Next,
        Action::Prev,
        Action::First,
        Action::Last,
        Action::Show,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Clear => "clear",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::First => "first",
            Action::Last => "last",
            Action::Show => "show",
        }
    }
}
