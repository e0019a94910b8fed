//! List commands wrapped with precondition checks.
//!
//! Each returns `Ok(true)` when it issued a host command and the status should
//! follow, `Ok(false)` when it only produced a notice.

use std::path::Path;

use anyhow::Result;

use super::{Inner, Shared, EMPTY_NOTICE};
use crate::arglist::HostCommand;
use crate::host::{Host, Level};

const NO_FILE_NOTICE: &str = "No file in the current buffer";
const FIRST_NOTICE: &str = "Already at the first entry";
const LAST_NOTICE: &str = "Already at the last entry";
const CLEARED_NOTICE: &str = "Arglist cleared";
const NOTHING_SELECTED_NOTICE: &str = "Nothing selected";

/// Navigation target. Boundaries clamp with a notice; there is no wrap-around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Next,
    Prev,
    First,
    Last,
}

/// Short name of a path for notices
fn display_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

impl<H: Host> Inner<H> {
    pub(super) fn add_current(&mut self) -> Result<bool> {
        let Some(file) = self.host.current_file() else {
            self.host.notify(Level::Warn, NO_FILE_NOTICE);
            return Ok(false);
        };

        if self.host.arglist().contains(&file) {
            let message = format!("{} is already in the arglist", display_name(&file));
            self.host.notify(Level::Info, &message);
            return Ok(false);
        }

        log::debug!("Adding {} to the arglist", file);
        self.host.execute(HostCommand::Append { path: file })?;
        Ok(true)
    }

    pub(super) fn remove_current(&mut self) -> Result<bool> {
        let list = self.host.arglist();
        if list.is_empty() {
            self.host.notify(Level::Info, EMPTY_NOTICE);
            return Ok(false);
        }

        let Some(file) = self.host.current_file() else {
            self.host.notify(Level::Warn, NO_FILE_NOTICE);
            return Ok(false);
        };

        if !list.contains(&file) {
            let message = format!("{} is not in the arglist", display_name(&file));
            self.host.notify(Level::Warn, &message);
            return Ok(false);
        }

        log::debug!("Removing {} from the arglist", file);
        self.host.execute(HostCommand::Remove { path: file })?;
        Ok(true)
    }

    pub(super) fn clear(&mut self) -> Result<bool> {
        if self.host.arglist().is_empty() {
            self.host.notify(Level::Info, EMPTY_NOTICE);
            return Ok(false);
        }

        self.host.execute(HostCommand::Clear)?;
        self.host.notify(Level::Info, CLEARED_NOTICE);
        Ok(true)
    }

    pub(super) fn navigate(&mut self, step: Step) -> Result<bool> {
        let list = self.host.arglist();
        if list.is_empty() {
            self.host.notify(Level::Info, EMPTY_NOTICE);
            return Ok(false);
        }

        let last = list.len() - 1;
        let index = match step {
            Step::Next if list.current >= last => {
                self.host.notify(Level::Warn, LAST_NOTICE);
                return Ok(false);
            }
            Step::Prev if list.current == 0 => {
                self.host.notify(Level::Warn, FIRST_NOTICE);
                return Ok(false);
            }
            Step::Next => list.current + 1,
            Step::Prev => list.current - 1,
            Step::First => 0,
            Step::Last => last,
        };

        self.host.execute(HostCommand::Goto { index })?;
        Ok(true)
    }

    /// Clear the list, then append each selection in order.
    pub(super) fn replace(&mut self, paths: Vec<String>) -> Result<bool> {
        if paths.is_empty() {
            self.host.notify(Level::Info, NOTHING_SELECTED_NOTICE);
            return Ok(false);
        }

        log::info!("Replacing arglist with {} selected files", paths.len());
        self.host.execute(HostCommand::Clear)?;
        for path in paths {
            self.host.execute(HostCommand::Append { path })?;
        }
        Ok(true)
    }

    /// Bookkeeping after a command went through: record the snapshot, then
    /// show the result or close the overlay when nothing is left to show.
    pub(super) fn after_change(&mut self, shared: &Shared<H>) -> Result<()> {
        let snapshot = self.host.arglist();
        self.watcher.observe(&snapshot);

        if snapshot.is_empty() {
            self.debounce.cancel();
            return self.close_display();
        }
        if self.config.show_on_action {
            self.render(shared)?;
        }
        Ok(())
    }
}
