//! E-Paper Node Coordinator
//!
//! The control core of a battery-powered e-paper display node. It sequences
//! frame-buffer transfers, panel refresh cycles, deep-sleep power gating and
//! incoming wireless text commands on a single embedded core.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support for the panel control signals
//! - `embedded-graphics` backed canvas (with `graphics` feature)
//! - Dual frame buffers (working + cache) for old/new frame refreshes
//! - Full and partial refresh modes with optional panel power-cycle
//! - Peripheral and GPIO gating around CPU deep sleep
//!
//! The panel driver, the graphics library, the wireless stack and the
//! register-level peripherals are collaborators. They are reached through the
//! [`PanelDriver`], [`Canvas`], [`WirelessStack`], [`Peripherals`],
//! [`ControlPins`], [`WakeSource`] and [`Sleep`] traits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use eink_node::{
//!     Builder, Display, FRAME_SIZE, FrameBuffers, MonoCanvas, Node, PinBank, PowerController,
//!     WakeButton, WakeSignal,
//! };
//! # use eink_node::{
//! #     AdvertisingInterval, DriveMode, DriveModePin, Edge, PanelDriver, PeripheralId,
//! #     Peripherals, Sleep, UpdateMode, WakeSource, WirelessEvent, WirelessStack,
//! # };
//! # struct MockPanel;
//! # impl PanelDriver for MockPanel {
//! #     type Error = Infallible;
//! #     fn start(&mut self, _timeout: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_power(&mut self, _on: bool) -> Result<(), Self::Error> { Ok(()) }
//! #     fn refresh(
//! #         &mut self,
//! #         _old_frame: &[u8],
//! #         _new_frame: &[u8],
//! #         _mode: UpdateMode,
//! #         _power_cycle: bool,
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockRadio;
//! # impl WirelessStack for MockRadio {
//! #     type Error = Infallible;
//! #     fn start(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn poll_event<'a>(
//! #         &mut self,
//! #         _rx: &'a mut [u8],
//! #     ) -> Result<Option<WirelessEvent<'a>>, Self::Error> {
//! #         Ok(None)
//! #     }
//! #     fn start_advertising(
//! #         &mut self,
//! #         _interval: AdvertisingInterval,
//! #         _profile: u8,
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl DriveModePin for MockPin {
//! #     fn set_drive_mode(&mut self, _mode: DriveMode) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockBlocks;
//! # impl Peripherals for MockBlocks {
//! #     fn enable(&mut self, _id: PeripheralId) {}
//! #     fn disable(&mut self, _id: PeripheralId) {}
//! # }
//! # struct MockButton;
//! # impl WakeSource for MockButton {
//! #     fn set_interrupt_mask(&mut self, _enabled: bool) {}
//! #     fn set_interrupt_edge(&mut self, _edge: Edge) {}
//! #     fn enable_interrupt(&mut self) {}
//! #     fn is_interrupt_pending(&self) -> bool { false }
//! #     fn clear_interrupt(&mut self) {}
//! # }
//! # struct MockCpu;
//! # impl Sleep for MockCpu { fn wait_for_interrupt(&mut self) {} }
//! static WAKE: WakeSignal = WakeSignal::new();
//!
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let canvas = match MonoCanvas::new([0u8; FRAME_SIZE], config.dimensions) {
//!     Ok(canvas) => canvas,
//!     Err(_) => return,
//! };
//! let display = match Display::new(MockPanel, canvas, FrameBuffers::<[u8; FRAME_SIZE]>::blank()) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let pins = PinBank::new([MockPin, MockPin, MockPin, MockPin, MockPin, MockPin]);
//! let power = PowerController::new(MockBlocks, pins, config.active_drive_mode);
//! let mut button = WakeButton::new(MockButton, &WAKE);
//!
//! let mut node = match Node::new(config, MockRadio, display, power, MockCpu, &WAKE) {
//!     Ok(node) => node,
//!     Err(_) => return,
//! };
//! if node.boot(&mut button).is_err() {
//!     return;
//! }
//! // the wake interrupt vector calls `button.on_interrupt()`
//! let _ = node.run();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Graphics collaborator contract and text styling
pub mod canvas;
/// Monochrome colors
pub mod color;
/// Node configuration types and builder
pub mod config;
/// Wireless event dispatch
pub mod dispatch;
/// Display update orchestration
pub mod display;
/// Error types
pub mod error;
/// Working and cache frame buffers
pub mod framebuffer;
/// Main control loop
pub mod node;
/// Panel driver collaborator contract
pub mod panel;
/// Display power domain gating
pub mod power;
/// Wake interrupt handling
pub mod wake;
/// Wireless stack collaborator contract
pub mod wireless;

/// Canvas backed by embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use canvas::{Canvas, TextAlign, TextMode, TextStyle};
pub use color::Color;
pub use config::{Anchor, Builder, Config, Dimensions, FRAME_SIZE};
pub use dispatch::{Dispatch, Dispatcher};
pub use display::Display;
pub use error::{BuilderError, DispatchError, Error, FrameSizeMismatch, NodeError, PowerError};
pub use framebuffer::{Frame, FrameBuffers};
pub use node::{Node, Sleep, StepReport};
pub use panel::{PanelDriver, UpdateMode};
pub use power::{
    ControlPins, ControlSignal, DriveMode, DriveModePin, PeripheralId, Peripherals, PinBank,
    PowerController, PowerState,
};
pub use wake::{Edge, WakeButton, WakeSignal, WakeSource};
pub use wireless::{
    AdvertisingInterval, AdvertisingParams, AttributeWrite, MAX_ATTRIBUTE_LEN, WirelessEvent,
    WirelessStack,
};

#[cfg(feature = "graphics")]
pub use graphics::{Font, MonoCanvas};
