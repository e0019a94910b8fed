//! Plugin State
//!
//! [`ArgStatus`] is the single owned state object of the plugin: configuration,
//! the last-seen list snapshot, the active overlay and the pending timers.
//! Hosts drive it by calling its async methods from their event loop.

pub mod action;
mod commands;
mod display;

pub use action::Action;

use std::sync::{Arc, Weak};

use anyhow::Result;
use tokio::sync::Mutex;

use crate::arglist::{ArgList, ListWatcher, SubscriptionId};
use crate::config::Config;
use crate::host::{Host, OverlayId};
use crate::timer::DelayedTask;

pub(crate) const EMPTY_NOTICE: &str = "Arglist is empty";

/// Handle to the plugin state. Clones share the same state.
pub struct ArgStatus<H: Host> {
    inner: Arc<Mutex<Inner<H>>>,
}

impl<H: Host> Clone for ArgStatus<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Weak handle given to timer tasks so they never keep the state alive
type Shared<H> = Weak<Mutex<Inner<H>>>;

struct Inner<H: Host> {
    host: H,
    config: Config,
    watcher: ListWatcher,
    display: Option<Display>,
    debounce: DelayedTask,
}

/// The overlay currently on screen and the task that will close it
struct Display {
    overlay: OverlayId,
    close: DelayedTask,
}

impl<H: Host> ArgStatus<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                host,
                config,
                watcher: ListWatcher::new(),
                display: None,
                debounce: DelayedTask::new(),
            })),
        }
    }

    fn shared(&self) -> Shared<H> {
        Arc::downgrade(&self.inner)
    }

    pub async fn config(&self) -> Config {
        self.inner.lock().await.config.clone()
    }

    /// Swap in a new configuration and re-register its key bindings
    pub async fn set_config(&self, config: Config) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.config = config;
        let bindings = inner.config.keymaps.bindings();
        inner.host.register_keymaps(&bindings)?;
        log::info!("Configuration applied ({} key bindings)", bindings.len());
        Ok(())
    }

    pub async fn register_keymaps(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let bindings = inner.config.keymaps.bindings();
        inner.host.register_keymaps(&bindings)
    }

    pub async fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.inner.lock().await.host)
    }

    pub async fn with_host_mut<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.lock().await.host)
    }

    /// Call `listener` with the new snapshot whenever the list entries change
    pub async fn on_list_changed<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ArgList) + Send + Sync + 'static,
    {
        self.inner.lock().await.watcher.subscribe(Box::new(listener))
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.lock().await.watcher.unsubscribe(id)
    }

    /// Check the host's list for changes.
    ///
    /// Hosts call this whenever the list may have changed. A change notifies
    /// listeners and, with `auto_refresh`, schedules a render once changes settle.
    pub async fn refresh(&self) {
        let shared = self.shared();
        let mut inner = self.inner.lock().await;
        let snapshot = inner.host.arglist();
        if !inner.watcher.observe(&snapshot) {
            return;
        }

        log::debug!("Arglist changed ({} entries)", snapshot.len());
        if inner.config.auto_refresh {
            inner.schedule_render(&shared);
        }
    }

    /// Run an action. User-facing problems become notices, not errors.
    pub async fn run(&self, action: Action) -> Result<()> {
        let shared = self.shared();
        let mut inner = self.inner.lock().await;
        log::debug!("Running action '{}'", action.name());

        // catch up with changes made behind our back before acting
        let before = inner.host.arglist();
        inner.watcher.observe(&before);

        let changed = match action {
            Action::Show => return inner.render(&shared),
            Action::Add => inner.add_current()?,
            Action::Remove => inner.remove_current()?,
            Action::Clear => inner.clear()?,
            Action::Next => inner.navigate(commands::Step::Next)?,
            Action::Prev => inner.navigate(commands::Step::Prev)?,
            Action::First => inner.navigate(commands::Step::First)?,
            Action::Last => inner.navigate(commands::Step::Last)?,
        };

        if changed {
            inner.after_change(&shared)?;
        }
        Ok(())
    }

    /// Run the action bound to `keys`. Returns false when nothing is bound.
    pub async fn run_key(&self, keys: &str) -> Result<bool> {
        let action = self.inner.lock().await.config.keymaps.action_for(keys);
        match action {
            Some(action) => {
                self.run(action).await?;
                Ok(true)
            }
            None => {
                log::debug!("No action bound to '{}'", keys);
                Ok(false)
            }
        }
    }

    /// Render the status overlay now
    pub async fn show(&self) -> Result<()> {
        self.run(Action::Show).await
    }

    /// Replace the list with a fuzzy-finder multi-selection, keeping its order
    pub async fn replace_with_selection(&self, paths: Vec<String>) -> Result<()> {
        let shared = self.shared();
        let mut inner = self.inner.lock().await;

        let before = inner.host.arglist();
        inner.watcher.observe(&before);

        if inner.replace(paths)? {
            inner.after_change(&shared)?;
        }
        Ok(())
    }

    /// Close the overlay if one is showing
    pub async fn close(&self) -> Result<()> {
        self.inner.lock().await.close_display()
    }

    pub async fn is_showing(&self) -> bool {
        self.inner.lock().await.display.is_some()
    }

    /// Cancel pending timers and close the overlay
    pub async fn shutdown(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.debounce.cancel();
        inner.close_display()
    }
}
