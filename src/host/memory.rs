//! In-process host that keeps the editor state in memory.
//!
//! Records everything the plugin asks of it, which makes it the host of choice
//! for tests and for embedding the plugin without an editor.

use anyhow::Result;

use super::{Host, Level, Overlay, OverlayId};
use crate::arglist::{ArgList, HostCommand};
use crate::config::Binding;

#[derive(Debug)]
pub struct MemoryHost {
    list: ArgList,
    current_file: Option<String>,
    columns: usize,
    next_overlay: u64,
    open: Vec<(OverlayId, Overlay)>,
    closed: Vec<OverlayId>,
    executed: Vec<HostCommand>,
    bindings: Vec<Binding>,
    notices: Vec<(Level, String)>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(120)
    }
}

impl MemoryHost {
    pub fn new(columns: usize) -> Self {
        Self {
            list: ArgList::default(),
            current_file: None,
            columns,
            next_overlay: 1,
            open: Vec::new(),
            closed: Vec::new(),
            executed: Vec::new(),
            bindings: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Start with `paths` in the list, the first one current and open.
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list = ArgList::new(paths.into_iter().map(Into::into).collect(), 0);
        self.current_file = self.list.current_path().map(str::to_string);
        self
    }

    pub fn set_current_file(&mut self, file: Option<&str>) {
        self.current_file = file.map(str::to_string);
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns;
    }

    /// Direct access to the list, bypassing the command log
    pub fn list_mut(&mut self) -> &mut ArgList {
        &mut self.list
    }

    pub fn open_overlays(&self) -> &[(OverlayId, Overlay)] {
        &self.open
    }

    pub fn closed_overlays(&self) -> &[OverlayId] {
        &self.closed
    }

    /// Overlays opened so far, open or closed
    pub fn overlays_opened(&self) -> u64 {
        self.next_overlay - 1
    }

    pub fn executed(&self) -> &[HostCommand] {
        &self.executed
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn notices(&self) -> &[(Level, String)] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&(Level, String)> {
        self.notices.last()
    }
}

impl Host for MemoryHost {
    fn arglist(&self) -> ArgList {
        self.list.clone()
    }

    fn current_file(&self) -> Option<String> {
        self.current_file.clone()
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn execute(&mut self, command: HostCommand) -> Result<()> {
        self.list.apply(&command);
        if let HostCommand::Goto { .. } = command {
            self.current_file = self.list.current_path().map(str::to_string);
        }
        self.executed.push(command);
        Ok(())
    }

    fn open_overlay(&mut self, overlay: &Overlay) -> Result<OverlayId> {
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        self.open.push((id, overlay.clone()));
        Ok(id)
    }

    fn close_overlay(&mut self, id: OverlayId) -> Result<()> {
        let before = self.open.len();
        self.open.retain(|(open, _)| *open != id);
        if self.open.len() == before {
            anyhow::bail!("overlay {} is not open", id.0);
        }
        self.closed.push(id);
        Ok(())
    }

    fn register_keymaps(&mut self, bindings: &[Binding]) -> Result<()> {
        self.bindings = bindings.to_vec();
        Ok(())
    }

    fn notify(&mut self, level: Level, message: &str) {
        self.notices.push((level, message.to_string()));
    }
}
