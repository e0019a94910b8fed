//! List Change Detection
//!
//! Keeps the last-seen snapshot and tells subscribers when the entries change.

use super::ArgList;

/// Callback invoked with the new snapshot after a change
pub type ListListener = Box<dyn Fn(&ArgList) + Send + Sync>;

/// Handle returned by [`ListWatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Detects list changes by comparing snapshots and fans them out to listeners
#[derive(Default)]
pub struct ListWatcher {
    last_seen: Option<ArgList>,
    listeners: Vec<(SubscriptionId, ListListener)>,
    next_id: u64,
}

impl std::fmt::Debug for ListWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListWatcher")
            .field("last_seen", &self.last_seen)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ListWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: ListListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn last_seen(&self) -> Option<&ArgList> {
        self.last_seen.as_ref()
    }

    /// Record `snapshot` and report whether its entries differ from the last one.
    ///
    /// Listeners run synchronously before this returns. The very first snapshot
    /// is only recorded.
    pub fn observe(&mut self, snapshot: &ArgList) -> bool {
        let changed = match &self.last_seen {
            Some(previous) => !previous.same_entries(snapshot),
            None => false,
        };
        self.last_seen = Some(snapshot.clone());

        if changed {
            for (_, listener) in &self.listeners {
                listener(snapshot);
            }
        }
        changed
    }
}
