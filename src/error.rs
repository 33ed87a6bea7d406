//! Error types for the coordinator
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`FrameSizeMismatch`] - Buffers that do not match the frame size
//! - [`Error`] - Display update errors, generic over the panel driver
//! - [`PowerError`] - Power domain transition errors
//! - [`DispatchError`] - Errors raised while reacting to a wireless event
//! - [`NodeError`] - Anything that stops the main control loop
//!
//! ## Example
//!
//! ```
//! use eink_node::{BuilderError, Dimensions};
//!
//! let result = Dimensions::new(176, 263);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//! ```

use core::fmt::Debug;

use crate::panel::PanelDriver;
use crate::power::{ControlPins, ControlSignal, PowerState};
use crate::wireless::WirelessStack;

/// A buffer whose length differs from the frame size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSizeMismatch {
    /// Frame size in bytes
    pub expected: usize,
    /// Length of the offending buffer
    pub provided: usize,
}

impl core::fmt::Display for FrameSizeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Frame size mismatch: expected {} bytes, provided {}",
            self.expected, self.provided
        )
    }
}

impl core::error::Error for FrameSizeMismatch {}

/// Errors that can occur while updating the display
///
/// Generic over the panel driver to preserve its error type.
pub enum Error<P: PanelDriver> {
    /// The panel driver reported a failure
    ///
    /// Content on the glass is undefined and the cache buffer was not
    /// refreshed.
    Panel(P::Error),
    /// Canvas and frame buffers disagree on the frame size
    FrameSize(FrameSizeMismatch),
}

impl<P: PanelDriver> Debug for Error<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Panel(e) => f.debug_tuple("Panel").field(e).finish(),
            Self::FrameSize(e) => f.debug_tuple("FrameSize").field(e).finish(),
        }
    }
}

impl<P: PanelDriver> core::fmt::Display for Error<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Panel(e) => write!(f, "Panel error: {e:?}"),
            Self::FrameSize(e) => write!(f, "{e}"),
        }
    }
}

impl<P: PanelDriver> core::error::Error for Error<P> {}

impl<P: PanelDriver> From<FrameSizeMismatch> for Error<P> {
    fn from(e: FrameSizeMismatch) -> Self {
        Self::FrameSize(e)
    }
}

/// Errors raised by the power state controller
///
/// These are configuration faults, not runtime conditions.
#[derive(Debug)]
pub enum PowerError<E> {
    /// A control signal rejected a drive mode change or output clear
    Pin {
        /// Signal that failed
        signal: ControlSignal,
        /// Underlying GPIO error
        source: E,
    },
    /// Enter/exit called out of order
    InvalidTransition {
        /// State the controller was in
        from: PowerState,
    },
}

impl<E: Debug> core::fmt::Display for PowerError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin { signal, source } => write!(f, "Pin error on {signal:?}: {source:?}"),
            Self::InvalidTransition { from } => {
                write!(f, "Invalid power transition from {from:?}")
            }
        }
    }
}

impl<E: Debug> core::error::Error for PowerError<E> {}

/// Errors raised while reacting to a wireless event
pub enum DispatchError<P: PanelDriver, W: WirelessStack> {
    /// The triggered display update failed
    Display(Error<P>),
    /// The stack refused to start advertising
    Advertising(W::Error),
}

impl<P: PanelDriver, W: WirelessStack> Debug for DispatchError<P, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => f.debug_tuple("Display").field(e).finish(),
            Self::Advertising(e) => f.debug_tuple("Advertising").field(e).finish(),
        }
    }
}

impl<P: PanelDriver, W: WirelessStack> core::fmt::Display for DispatchError<P, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => write!(f, "Display update failed: {e}"),
            Self::Advertising(e) => write!(f, "Advertising failed: {e:?}"),
        }
    }
}

impl<P: PanelDriver, W: WirelessStack> core::error::Error for DispatchError<P, W> {}

impl<P: PanelDriver, W: WirelessStack> From<Error<P>> for DispatchError<P, W> {
    fn from(e: Error<P>) -> Self {
        Self::Display(e)
    }
}

/// Errors that stop the main control loop
pub enum NodeError<P: PanelDriver, W: WirelessStack, C: ControlPins> {
    /// Display update failed during boot
    Display(Error<P>),
    /// The display power domain could not be switched
    Power(PowerError<C::Error>),
    /// The wireless stack failed to start or to deliver events
    Wireless(W::Error),
}

impl<P: PanelDriver, W: WirelessStack, C: ControlPins> Debug for NodeError<P, W, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => f.debug_tuple("Display").field(e).finish(),
            Self::Power(e) => f.debug_tuple("Power").field(e).finish(),
            Self::Wireless(e) => f.debug_tuple("Wireless").field(e).finish(),
        }
    }
}

impl<P: PanelDriver, W: WirelessStack, C: ControlPins> core::fmt::Display for NodeError<P, W, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => write!(f, "{e}"),
            Self::Power(e) => write!(f, "{e}"),
            Self::Wireless(e) => write!(f, "Wireless error: {e:?}"),
        }
    }
}

impl<P: PanelDriver, W: WirelessStack, C: ControlPins> core::error::Error for NodeError<P, W, C> {}

impl<P: PanelDriver, W: WirelessStack, C: ControlPins> From<Error<P>> for NodeError<P, W, C> {
    fn from(e: Error<P>) -> Self {
        Self::Display(e)
    }
}

impl<P: PanelDriver, W: WirelessStack, C: ControlPins> From<PowerError<C::Error>>
    for NodeError<P, W, C>
{
    fn from(e: PowerError<C::Error>) -> Self {
        Self::Power(e)
    }
}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Text anchor lies outside the panel
    AnchorOutOfBounds {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (both non-zero, cols must be multiple of 8)"
            ),
            Self::AnchorOutOfBounds { x, y } => {
                write!(f, "Text anchor ({x}, {y}) is outside the panel")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
