//! Key bindings for plugin actions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::plugin::Action;

/// Key notation: `<Name>` tokens and single printable characters, e.g. `<leader>aa`, `]a`, `<C-n>`
static KEY_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:<[A-Za-z0-9][A-Za-z0-9_-]*>|[^\s<])+$").expect("valid key notation regex")
});

pub fn is_valid_key_notation(keys: &str) -> bool {
    KEY_NOTATION.is_match(keys)
}

/// One key sequence bound to an action, as sent to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub keys: String,
    pub action: Action,
}

/// Key sequence per action. An empty string leaves the action unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keymaps {
    pub add: String,
    pub remove: String,
    pub clear: String,
    pub next: String,
    pub prev: String,
    pub first: String,
    pub last: String,
    pub show: String,
}

impl Default for Keymaps {
    fn default() -> Self {
        Self {
            add: "<leader>aa".to_string(),
            remove: "<leader>ad".to_string(),
            clear: "<leader>ac".to_string(),
            next: "]a".to_string(),
            prev: "[a".to_string(),
            first: "[A".to_string(),
            last: "]A".to_string(),
            show: "<leader>as".to_string(),
        }
    }
}

impl Keymaps {
    pub fn keys(&self, action: Action) -> &str {
        match action {
            Action::Add => &self.add,
            Action::Remove => &self.remove,
            Action::Clear => &self.clear,
            Action::Next => &self.next,
            Action::Prev => &self.prev,
            Action::First => &self.first,
            Action::Last => &self.last,
            Action::Show => &self.show,
        }
    }

    fn keys_mut(&mut self, action: Action) -> &mut String {
        match action {
            Action::Add => &mut self.add,
            Action::Remove => &mut self.remove,
            Action::Clear => &mut self.clear,
            Action::Next => &mut self.next,
            Action::Prev => &mut self.prev,
            Action::First => &mut self.first,
            Action::Last => &mut self.last,
            Action::Show => &mut self.show,
        }
    }

    /// Bound actions, in [`Action::ALL`] order
    pub fn bindings(&self) -> Vec<Binding> {
        Action::ALL
            .iter()
            .filter(|action| !self.keys(**action).is_empty())
            .map(|action| Binding {
                keys: self.keys(*action).to_string(),
                action: *action,
            })
            .collect()
    }

    /// Action bound to `keys`. When two actions share keys the first in [`Action::ALL`] wins.
    pub fn action_for(&self, keys: &str) -> Option<Action> {
        if keys.is_empty() {
            return None;
        }
        Action::ALL
            .iter()
            .copied()
            .find(|action| self.keys(*action) == keys)
    }

    /// Unbind every action whose keys are not valid notation; returns what was dropped.
    pub(crate) fn drop_invalid(&mut self) -> Vec<(Action, String)> {
        let mut dropped = Vec::new();
        for action in Action::ALL {
            let keys = self.keys_mut(action);
            if !keys.is_empty() && !is_valid_key_notation(keys) {
                dropped.push((action, std::mem::take(keys)));
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_notation() {
        for keys in ["]a", "<leader>aa", "<C-n>", "<Space>x", "gA", "ä"] {
            assert!(is_valid_key_notation(keys), "{keys}");
        }
        for keys in ["", "<", "<>", "a b", "<leader", "<le ader>"] {
            assert!(!is_valid_key_notation(keys), "{keys}");
        }
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let bindings = Keymaps::default().bindings();
        assert_eq!(bindings.len(), Action::ALL.len());
        assert_eq!(bindings[0].action, Action::Add);
        assert_eq!(bindings[0].keys, "<leader>aa");
    }

    #[test]
    fn empty_keys_are_unbound() {
        let keymaps = Keymaps {
            clear: String::new(),
            ..Keymaps::default()
        };
        assert!(keymaps.bindings().iter().all(|b| b.action != Action::Clear));
        assert_eq!(keymaps.action_for(""), None);
    }

    #[test]
    fn lookup_by_keys() {
        let keymaps = Keymaps::default();
        assert_eq!(keymaps.action_for("]A"), Some(Action::Last));
        assert_eq!(keymaps.action_for("]b"), None);
    }

    #[test]
    fn drop_invalid_reports_dropped() {
        let mut keymaps = Keymaps {
            next: "<bad".to_string(),
            ..Keymaps::default()
        };
        let dropped = keymaps.drop_invalid();
        assert_eq!(dropped, vec![(Action::Next, "<bad".to_string())]);
        assert!(keymaps.next.is_empty());
    }
}
