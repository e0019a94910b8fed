//! Host backed by an editor on the other end of the stdio protocol.
//!
//! Editor state arrives as events and is kept in a local mirror. Requests go out
//! through a channel drained by the server's writer task. List commands are also
//! applied to the mirror right away, so a render issued in the same turn already
//! sees the result; the next `state` event from the editor reconciles any drift.

use anyhow::{Context, Result};
use tokio::sync::mpsc::UnboundedSender;

use super::{Host, Level, Overlay, OverlayId};
use crate::arglist::{ArgList, HostCommand};
use crate::config::Binding;
use crate::server::protocol::{OpenOverlayParams, Outgoing};

#[derive(Debug)]
pub struct RpcHost {
    list: ArgList,
    current_file: Option<String>,
    columns: usize,
    next_overlay: u64,
    outgoing: UnboundedSender<Outgoing>,
}

impl RpcHost {
    pub fn new(outgoing: UnboundedSender<Outgoing>) -> Self {
        Self {
            list: ArgList::default(),
            current_file: None,
            columns: 80,
            next_overlay: 1,
            outgoing,
        }
    }

    /// Replace the mirrored editor state
    pub fn sync(&mut self, list: ArgList, current_file: Option<String>) {
        self.list = list;
        self.current_file = current_file;
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns;
    }

    fn send(&self, message: Outgoing) -> Result<()> {
        self.outgoing
            .send(message)
            .ok()
            .context("editor connection closed")
    }
}

impl Host for RpcHost {
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
        self.send(Outgoing::Execute { command })
    }

    fn open_overlay(&mut self, overlay: &Overlay) -> Result<OverlayId> {
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        self.send(Outgoing::OpenOverlay(OpenOverlayParams {
            id,
            overlay: overlay.clone(),
        }))?;
        Ok(id)
    }

    fn close_overlay(&mut self, id: OverlayId) -> Result<()> {
        self.send(Outgoing::CloseOverlay { id })
    }

    fn register_keymaps(&mut self, bindings: &[Binding]) -> Result<()> {
        self.send(Outgoing::RegisterKeymaps {
            bindings: bindings.to_vec(),
        })
    }

    fn notify(&mut self, level: Level, message: &str) {
        let sent = self.send(Outgoing::Notify {
            level,
            message: message.to_string(),
        });
        if let Err(e) = sent {
            log::warn!("Dropped notice '{}': {}", message, e);
        }
    }
}
