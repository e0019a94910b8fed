//! Overlay lifecycle: render, supersede, auto-close.

use anyhow::Result;

use super::{Display, Inner, Shared, EMPTY_NOTICE};
use crate::host::{Host, Level, Overlay, OverlayId};
use crate::layout::render_window;
use crate::timer::DelayedTask;

/// Columns kept free around the overlay for its border
const OVERLAY_MARGIN: usize = 4;

impl<H: Host> Inner<H> {
    pub(super) fn available_width(&self) -> usize {
        self.config
            .max_width
            .min(self.host.columns().saturating_sub(OVERLAY_MARGIN))
            .max(1)
    }

    /// Replace whatever is on screen with a fresh rendering of the list.
    pub(super) fn render(&mut self, shared: &Shared<H>) -> Result<()> {
        self.debounce.cancel();

        let list = self.host.arglist();
        let width = self.available_width();
        let options = self.config.render_options();
        let Some(line) = render_window(&list.paths, list.current, width, &options) else {
            self.close_display()?;
            self.host.notify(Level::Info, EMPTY_NOTICE);
            return Ok(());
        };

        self.close_display()?;
        let overlay = Overlay::new(&line, &self.config.highlights, self.config.placement);
        let id = self.host.open_overlay(&overlay)?;
        log::debug!("Opened overlay {}: {}", id.0, line.text);

        let weak = shared.clone();
        let mut close = DelayedTask::new();
        close.schedule(self.config.timeout(), async move {
            if let Some(state) = weak.upgrade() {
                state.lock().await.expire_display(id);
            }
        });
        self.display = Some(Display { overlay: id, close });
        Ok(())
    }

    /// Render once list changes have been quiet for the debounce period.
    pub(super) fn schedule_render(&mut self, shared: &Shared<H>) {
        let weak = shared.clone();
        self.debounce.schedule(self.config.debounce(), async move {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut inner = state.lock().await;
            inner.debounce.detach();
            if let Err(e) = inner.render(&weak) {
                log::error!("Failed to render arglist status: {:#}", e);
            }
        });
    }

    pub(super) fn close_display(&mut self) -> Result<()> {
        if let Some(mut display) = self.display.take() {
            display.close.cancel();
            self.host.close_overlay(display.overlay)?;
            log::debug!("Closed overlay {}", display.overlay.0);
        }
        Ok(())
    }

    /// Auto-close callback. Only closes the overlay it was scheduled for.
    fn expire_display(&mut self, id: OverlayId) {
        match self.display.take() {
            Some(mut display) if display.overlay == id => {
                display.close.detach();
                if let Err(e) = self.host.close_overlay(id) {
                    log::warn!("Failed to close overlay {}: {:#}", id.0, e);
                }
            }
            other => self.display = other,
        }
    }
}
