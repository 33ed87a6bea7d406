//! Panel driver contract
//!
//! The electrical refresh waveforms belong to the panel driver. This crate
//! only hands it the previous and the next frame and waits for it to finish.

use core::fmt::Debug;

/// Refresh mode for display updates
///
/// Selection is always the caller's decision; nothing here diffs frames to
/// pick one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Multi-stage refresh (slow, flickers, clears ghosting)
    #[default]
    Full,
    /// Only changed regions are driven (fast, ghosting accumulates)
    Partial,
}

/// Trait for the e-paper panel driver
///
/// Every frame argument is exactly one frame long. All calls block until the
/// driver is done; a full refresh takes on the order of a second.
pub trait PanelDriver {
    /// Error type for driver operations
    type Error: Debug;

    /// Bring up the panel interface
    ///
    /// `timeout` is passed through to the driver untouched.
    fn start(&mut self, timeout: u8) -> Result<(), Self::Error>;

    /// Switch the panel supply on or off
    fn set_power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Drive the panel from `old_frame` to `new_frame`
    ///
    /// When `power_cycle` is set the driver cycles the analog supply before
    /// refreshing. The driver either completes the refresh or reports the
    /// failure; it is never interrupted or retried from outside.
    fn refresh(
        &mut self,
        old_frame: &[u8],
        new_frame: &[u8],
        mode: UpdateMode,
        power_cycle: bool,
    ) -> Result<(), Self::Error>;
}
