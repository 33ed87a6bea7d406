//! Wireless stack contract
//!
//! The stack is polled from the main loop. Each inbound value is copied into
//! a receive buffer owned by the caller, and the returned event borrows that
//! buffer: it cannot outlive the next poll, so every payload is consumed
//! before the loop moves on.

use core::fmt::Debug;

/// Largest attribute value the node accepts, in bytes
pub const MAX_ATTRIBUTE_LEN: usize = 512;

/// Advertising interval profile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvertisingInterval {
    /// Short interval, quick discovery
    Fast,
    /// Long interval, low duty cycle
    #[default]
    Slow,
}

/// Advertising settings handed to the stack
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvertisingParams {
    /// Interval profile
    pub interval: AdvertisingInterval,
    /// Peripheral configuration index
    pub profile: u8,
}

/// An inbound attribute write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeWrite<'a> {
    /// Attribute handle written by the peer
    pub handle: u16,
    /// Received bytes
    pub value: &'a [u8],
    /// Length declared by the peer
    pub declared_len: u16,
}

impl<'a> AttributeWrite<'a> {
    /// Create a write whose declared length matches the received bytes
    pub fn new(handle: u16, value: &'a [u8]) -> Self {
        Self {
            handle,
            value,
            declared_len: u16::try_from(value.len()).unwrap_or(u16::MAX),
        }
    }

    /// Usable length: the declared length clamped to the received bytes
    pub fn len(&self) -> usize {
        usize::from(self.declared_len).min(self.value.len())
    }

    /// Whether the write carries no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the peer declared more bytes than arrived
    pub fn is_truncated(&self) -> bool {
        usize::from(self.declared_len) > self.value.len()
    }

    /// The payload read as text
    ///
    /// The last byte is a sentinel and never part of the text. The text also
    /// ends at the first NUL. Invalid UTF-8 cuts the text at the last valid
    /// character. Returns `None` when nothing printable remains, including
    /// for payloads of zero or one byte.
    pub fn text(&self) -> Option<&'a str> {
        let content_len = self.len().checked_sub(1)?;
        let content = self.value.get(..content_len)?;
        let content = match content.iter().position(|b| *b == 0) {
            Some(nul) => content.get(..nul)?,
            None => content,
        };

        let text = match core::str::from_utf8(content) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(content.get(..e.valid_up_to())?).ok()?,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Events delivered by the wireless stack
///
/// The set is open: stacks may report kinds this crate does not act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum WirelessEvent<'a> {
    /// Stack finished starting
    StackOn,
    /// A peer connected
    Connected,
    /// The peer disconnected
    Disconnected,
    /// Write without response
    WriteCommand(AttributeWrite<'a>),
    /// Write with response
    WriteRequest(AttributeWrite<'a>),
    /// Queued (prepared) write being executed
    ExecuteWrite,
    /// Any other stack event, by its stack-specific code
    Other(u32),
}

/// Trait for the wireless stack
pub trait WirelessStack {
    /// Error type for stack operations
    type Error: Debug;

    /// Start the stack
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Take the next pending event
    ///
    /// Inbound values are copied into `rx` and the event borrows it. Returns
    /// `Ok(None)` once no events are pending.
    fn poll_event<'a>(&mut self, rx: &'a mut [u8])
    -> Result<Option<WirelessEvent<'a>>, Self::Error>;

    /// (Re)start advertising
    fn start_advertising(
        &mut self,
        interval: AdvertisingInterval,
        profile: u8,
    ) -> Result<(), Self::Error>;
}
