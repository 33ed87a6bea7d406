//! Wireless event dispatch
//!
//! Maps each event drained from the wireless stack to its reaction:
//!
//! - stack on / peer disconnected: restart advertising
//! - write command: render the payload as text and update the display
//! - anything else: ignored
//!
//! Advertising restarts are not deduplicated; the stack accepts repeated
//! requests.

use crate::canvas::Canvas;
use crate::config::{Anchor, Config};
use crate::display::Display;
use crate::error::{DispatchError, Error};
use crate::panel::{PanelDriver, UpdateMode};
use crate::wireless::{AdvertisingParams, AttributeWrite, WirelessEvent, WirelessStack};

/// Reaction taken for one event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Advertising was (re)started
    Advertising,
    /// Payload text was drawn and the display updated
    Rendered,
    /// Write carried no text; nothing was drawn
    Empty,
    /// Event kind has no reaction
    Ignored,
}

/// Wireless event dispatcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatcher {
    update_mode: UpdateMode,
    anchor: Anchor,
    advertising: AdvertisingParams,
}

impl Dispatcher {
    /// Create a dispatcher from the node configuration
    pub fn new(config: &Config) -> Self {
        Self {
            update_mode: config.text_update_mode,
            anchor: config.text_anchor,
            advertising: config.advertising,
        }
    }

    /// React to one event
    ///
    /// The event borrows the receive buffer, so the payload is fully consumed
    /// when this returns.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Advertising` if the stack refuses to advertise,
    /// or `DispatchError::Display` if the triggered update fails.
    pub fn dispatch<P, G, B, W>(
        &self,
        event: WirelessEvent<'_>,
        display: &mut Display<P, G, B>,
        stack: &mut W,
    ) -> Result<Dispatch, DispatchError<P, W>>
    where
        P: PanelDriver,
        G: Canvas,
        B: AsRef<[u8]> + AsMut<[u8]>,
        W: WirelessStack,
    {
        match event {
            WirelessEvent::StackOn | WirelessEvent::Disconnected => {
                self.advertise(stack)
                    .map_err(DispatchError::<P, W>::Advertising)?;
                Ok(Dispatch::Advertising)
            }
            WirelessEvent::WriteCommand(write) => self
                .render(&write, display)
                .map_err(DispatchError::Display),
            other => {
                log::trace!("ignoring {:?}", other);
                Ok(Dispatch::Ignored)
            }
        }
    }

    fn advertise<W: WirelessStack>(&self, stack: &mut W) -> Result<(), W::Error> {
        let AdvertisingParams { interval, profile } = self.advertising;
        stack.start_advertising(interval, profile)?;
        log::info!("advertising ({:?}, profile {})", interval, profile);
        Ok(())
    }

    fn render<P, G, B>(
        &self,
        write: &AttributeWrite<'_>,
        display: &mut Display<P, G, B>,
    ) -> Result<Dispatch, Error<P>>
    where
        P: PanelDriver,
        G: Canvas,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        if write.is_truncated() {
            log::warn!(
                "write to {:#06x} declared {} bytes, received {}",
                write.handle,
                write.declared_len,
                write.value.len()
            );
        }

        let Some(text) = write.text() else {
            log::debug!("write to {:#06x} carries no text", write.handle);
            return Ok(Dispatch::Empty);
        };

        log::debug!("rendering {} bytes from {:#06x}", text.len(), write.handle);
        display.show_text(text, self.anchor, self.update_mode)?;
        Ok(Dispatch::Rendered)
    }
}
