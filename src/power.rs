//! Display power domain gating
//!
//! Before the CPU sleeps, the display interface clock, the refresh timer and
//! the SPI master are stopped, then the six panel control signals are
//! parked: high impedance first, output latch cleared second. On wake the
//! same peripherals restart and the signals get their strong drive back.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use eink_node::{DriveMode, DriveModePin, PeripheralId, Peripherals, PinBank, PowerController};
//!
//! struct Pin;
//! impl ErrorType for Pin { type Error = Infallible; }
//! impl OutputPin for Pin {
//!     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//!     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! }
//! impl DriveModePin for Pin {
//!     fn set_drive_mode(&mut self, _mode: DriveMode) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! struct Blocks;
//! impl Peripherals for Blocks {
//!     fn enable(&mut self, _id: PeripheralId) {}
//!     fn disable(&mut self, _id: PeripheralId) {}
//! }
//!
//! let pins = PinBank::new([Pin, Pin, Pin, Pin, Pin, Pin]);
//! let mut power = PowerController::new(Blocks, pins, DriveMode::StrongInputOff);
//! let _ = power.enter_low_power();
//! // wait for interrupt
//! let _ = power.exit_low_power();
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

use crate::error::PowerError;

type PowerResult<E> = core::result::Result<(), PowerError<E>>;

/// State of the display power domain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Peripherals enabled, control signals strongly driven
    #[default]
    Active,
    /// Peripherals disabled, control signals parked low at high impedance
    LowPower,
}

/// Peripheral blocks feeding the panel interface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeripheralId {
    /// Display interface clock
    Clock,
    /// Refresh timing timer
    Timer,
    /// SPI master talking to the panel
    SerialMaster,
}

impl PeripheralId {
    /// Every peripheral, in the order they are gated
    pub const ALL: [Self; 3] = [Self::Clock, Self::Timer, Self::SerialMaster];
}

/// Panel control signals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ControlSignal {
    /// Panel reset
    Reset = 0,
    /// Panel enable
    Enable = 1,
    /// Discharge
    Discharge = 2,
    /// Border control
    Border = 3,
    /// IO level shifter enable
    IoEnable = 4,
    /// SPI chip select
    ChipSelect = 5,
}

impl ControlSignal {
    /// Number of control signals
    pub const COUNT: usize = 6;

    /// Every signal, in the order they are parked and restored
    pub const ALL: [Self; Self::COUNT] = [
        Self::Reset,
        Self::Enable,
        Self::Discharge,
        Self::Border,
        Self::IoEnable,
        Self::ChipSelect,
    ];
}

/// GPIO drive modes used on the control signals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriveMode {
    /// Output and input buffers off
    HighZ,
    /// Strong push-pull output with input buffer enabled
    Strong,
    /// Strong push-pull output with input buffer disabled
    #[default]
    StrongInputOff,
}

/// Peripheral enable control
///
/// Enabling or disabling a correctly configured block cannot fail.
pub trait Peripherals {
    /// Start a peripheral block
    fn enable(&mut self, id: PeripheralId);

    /// Stop a peripheral block
    fn disable(&mut self, id: PeripheralId);
}

/// An output pin whose drive mode can be changed at runtime
pub trait DriveModePin: OutputPin {
    /// Reconfigure the pad drive mode
    fn set_drive_mode(&mut self, mode: DriveMode) -> Result<(), Self::Error>;
}

/// The six panel control signals
pub trait ControlPins {
    /// Error type for pin operations
    type Error: Debug;

    /// Reconfigure one signal's drive mode
    fn set_drive_mode(&mut self, signal: ControlSignal, mode: DriveMode)
    -> Result<(), Self::Error>;

    /// Clear one signal's output latch
    fn clear(&mut self, signal: ControlSignal) -> Result<(), Self::Error>;
}

/// Six pins of one type, indexed by [`ControlSignal`]
///
/// Pins are given in [`ControlSignal::ALL`] order.
pub struct PinBank<P> {
    pins: [P; ControlSignal::COUNT],
}

impl<P: DriveModePin> PinBank<P> {
    /// Create a bank from pins in [`ControlSignal::ALL`] order
    pub fn new(pins: [P; ControlSignal::COUNT]) -> Self {
        Self { pins }
    }

    /// Release the pins
    pub fn release(self) -> [P; ControlSignal::COUNT] {
        self.pins
    }

    fn pin(&mut self, signal: ControlSignal) -> &mut P {
        &mut self.pins[signal as usize]
    }
}

impl<P: DriveModePin> ControlPins for PinBank<P> {
    type Error = P::Error;

    fn set_drive_mode(
        &mut self,
        signal: ControlSignal,
        mode: DriveMode,
    ) -> Result<(), Self::Error> {
        self.pin(signal).set_drive_mode(mode)
    }

    fn clear(&mut self, signal: ControlSignal) -> Result<(), Self::Error> {
        self.pin(signal).set_low()
    }
}

/// Power state controller for the display interface
///
/// Enter and exit are called as a matched pair once per loop iteration.
pub struct PowerController<X, C> {
    peripherals: X,
    pins: C,
    active_mode: DriveMode,
    state: PowerState,
}

impl<X, C> PowerController<X, C>
where
    X: Peripherals,
    C: ControlPins,
{
    /// Create a controller for an interface that is currently active
    ///
    /// `active_mode` is the drive mode restored on every control signal when
    /// leaving low power.
    pub fn new(peripherals: X, pins: C, active_mode: DriveMode) -> Self {
        Self {
            peripherals,
            pins,
            active_mode,
            state: PowerState::Active,
        }
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Gate the display interface ahead of CPU sleep
    ///
    /// Peripherals feeding the signals stop before any drive mode changes.
    ///
    /// # Errors
    ///
    /// Returns `PowerError::InvalidTransition` when already in low power, or
    /// `PowerError::Pin` if a control signal rejects the change. Once the
    /// peripherals are off the state is `LowPower`, even when a signal then
    /// fails, so [`exit_low_power`](Self::exit_low_power) can restart them.
    pub fn enter_low_power(&mut self) -> PowerResult<C::Error> {
        if self.state != PowerState::Active {
            return Err(PowerError::InvalidTransition { from: self.state });
        }

        for id in PeripheralId::ALL {
            self.peripherals.disable(id);
        }
        // From here on only exit_low_power can bring the peripherals back.
        self.state = PowerState::LowPower;

        for signal in ControlSignal::ALL {
            self.pins
                .set_drive_mode(signal, DriveMode::HighZ)
                .map_err(|source| PowerError::Pin { signal, source })?;
        }
        for signal in ControlSignal::ALL {
            self.pins
                .clear(signal)
                .map_err(|source| PowerError::Pin { signal, source })?;
        }

        log::debug!("display interface gated");
        Ok(())
    }

    /// Restore the display interface after CPU wake
    ///
    /// Signal levels are left for the panel driver to set up again.
    ///
    /// # Errors
    ///
    /// Returns `PowerError::InvalidTransition` when not in low power, or
    /// `PowerError::Pin` if a control signal rejects the change. The state is
    /// `Active` as soon as the peripherals are back on.
    pub fn exit_low_power(&mut self) -> PowerResult<C::Error> {
        if self.state != PowerState::LowPower {
            return Err(PowerError::InvalidTransition { from: self.state });
        }

        for id in PeripheralId::ALL {
            self.peripherals.enable(id);
        }
        self.state = PowerState::Active;

        for signal in ControlSignal::ALL {
            self.pins
                .set_drive_mode(signal, self.active_mode)
                .map_err(|source| PowerError::Pin { signal, source })?;
        }

        log::debug!("display interface restored");
        Ok(())
    }

    /// Access the control pins
    pub fn pins(&self) -> &C {
        &self.pins
    }

    /// Access the peripherals
    pub fn peripherals(&self) -> &X {
        &self.peripherals
    }
}
