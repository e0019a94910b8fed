//! Argument List Model
//!
//! Snapshots of the editor's argument list and the primitive commands that mutate it.
//! The editor owns the real list; hosts that mirror it locally replay commands
//! through [`ArgList::apply`] so the mirror follows the editor's semantics.

pub mod watcher;

pub use watcher::{ListListener, ListWatcher, SubscriptionId};

use serde::{Deserialize, Serialize};

/// Snapshot of the argument list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgList {
    pub paths: Vec<String>,
    /// Index of the current entry
    #[serde(default)]
    pub current: usize,
}

/// Primitive list operations understood by the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCommand {
    /// Add a path at the end of the list
    Append { path: String },
    /// Remove the first entry equal to the path
    Remove { path: String },
    /// Remove every entry
    Clear,
    /// Make the entry at `index` current and edit it
    Goto { index: usize },
}

impl ArgList {
    pub fn new(paths: Vec<String>, current: usize) -> Self {
        let mut list = Self { paths, current };
        list.clamp_current();
        list
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of the current entry
    pub fn current_path(&self) -> Option<&str> {
        self.paths.get(self.current).map(String::as_str)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.paths.iter().position(|entry| entry == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    /// True when both snapshots hold the same entries in the same order.
    ///
    /// The current index is ignored: moving through the list is not a change.
    pub fn same_entries(&self, other: &ArgList) -> bool {
        self.paths.len() == other.paths.len()
            && self.paths.iter().zip(&other.paths).all(|(a, b)| a == b)
    }

    /// Replay a host command on this snapshot
    pub fn apply(&mut self, command: &HostCommand) {
        match command {
            HostCommand::Append { path } => {
                self.paths.push(path.clone());
            }
            HostCommand::Remove { path } => {
                if let Some(idx) = self.position(path) {
                    self.paths.remove(idx);
                    if idx < self.current {
                        self.current -= 1;
                    }
                }
            }
            HostCommand::Clear => {
                self.paths.clear();
            }
            HostCommand::Goto { index } => {
                if *index < self.paths.len() {
                    self.current = *index;
                }
            }
        }
        self.clamp_current();
    }

    fn clamp_current(&mut self) {
        self.current = self.current.min(self.paths.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(paths: &[&str], current: usize) -> ArgList {
        ArgList::new(paths.iter().map(|p| p.to_string()).collect(), current)
    }

    fn append(path: &str) -> HostCommand {
        HostCommand::Append {
            path: path.to_string(),
        }
    }

    fn remove(path: &str) -> HostCommand {
        HostCommand::Remove {
            path: path.to_string(),
        }
    }

    #[test]
    fn append_to_empty_list() {
        let mut args = ArgList::default();
        args.apply(&append("a.txt"));
        assert_eq!(args, list(&["a.txt"], 0));
        assert_eq!(args.current_path(), Some("a.txt"));
    }

    #[test]
    fn remove_before_current_shifts_index() {
        let mut args = list(&["a", "b", "c"], 2);
        args.apply(&remove("a"));
        assert_eq!(args, list(&["b", "c"], 1));
        assert_eq!(args.current_path(), Some("c"));
    }

    #[test]
    fn remove_current_at_end_clamps() {
        let mut args = list(&["a", "b", "c"], 2);
        args.apply(&remove("c"));
        assert_eq!(args.current, 1);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut args = list(&["a", "b"], 1);
        args.apply(&remove("zzz"));
        assert_eq!(args, list(&["a", "b"], 1));
    }

    #[test]
    fn clear_resets_index() {
        let mut args = list(&["a", "b"], 1);
        args.apply(&HostCommand::Clear);
        assert!(args.is_empty());
        assert_eq!(args.current, 0);
        assert_eq!(args.current_path(), None);
    }

    #[test]
    fn goto_ignores_out_of_range() {
        let mut args = list(&["a", "b"], 0);
        args.apply(&HostCommand::Goto { index: 1 });
        assert_eq!(args.current, 1);
        args.apply(&HostCommand::Goto { index: 5 });
        assert_eq!(args.current, 1);
    }

    #[test]
    fn same_entries_ignores_position() {
        let a = list(&["a", "b"], 0);
        let b = list(&["a", "b"], 1);
        let c = list(&["b", "a"], 0);
        let d = list(&["a"], 0);
        assert!(a.same_entries(&b));
        assert!(!a.same_entries(&c));
        assert!(!a.same_entries(&d));
    }

    #[test]
    fn command_wire_format() {
        let json = serde_json::to_value(append("x.rs")).expect("serialize");
        assert_eq!(json, serde_json::json!({"kind": "append", "path": "x.rs"}));

        let json = serde_json::to_value(HostCommand::Clear).expect("serialize");
        assert_eq!(json, serde_json::json!({"kind": "clear"}));

        let command: HostCommand =
            serde_json::from_str(r#"{"kind":"goto","index":3}"#).expect("deserialize");
        assert_eq!(command, HostCommand::Goto { index: 3 });
    }
}
