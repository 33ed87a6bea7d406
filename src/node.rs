//! Main control loop
//!
//! [`Node`] ties the display, the power controller, the wireless stack and
//! the CPU sleep together. After [`Node::boot`], each [`Node::step`]:
//!
//! 1. drains and dispatches every pending wireless event
//! 2. gates the display interface
//! 3. sleeps until an interrupt fires
//! 4. restores the display interface
//!
//! Events, including any display update they trigger, are finished before
//! the interface is gated. The wake handler only clears its pending flag and
//! raises the [`WakeSignal`]; nothing here runs in interrupt context.

use core::convert::Infallible;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::display::Display;
use crate::error::{DispatchError, FrameSizeMismatch, NodeError};
use crate::panel::PanelDriver;
use crate::power::{ControlPins, Peripherals, PowerController};
use crate::wake::{WakeButton, WakeSignal, WakeSource};
use crate::wireless::{MAX_ATTRIBUTE_LEN, WirelessStack};

/// CPU low-power wait
pub trait Sleep {
    /// Block until any enabled interrupt fires
    fn wait_for_interrupt(&mut self);
}

/// What one loop iteration did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Events drained from the wireless stack
    pub events: usize,
    /// Display updates that completed
    pub updates: usize,
    /// Display updates the panel driver rejected
    pub failed_updates: usize,
    /// Advertising requests the stack rejected
    pub failed_advertising: usize,
    /// Whether the wake button ended the sleep
    pub woken_by_button: bool,
}

/// The e-paper node
///
/// ## Type Parameters
///
/// * `W` - Wireless stack
/// * `P` - Panel driver
/// * `G` - Canvas
/// * `B` - Frame buffer storage
/// * `X` - Peripheral enable control
/// * `C` - Panel control pins
/// * `S` - CPU sleep
pub struct Node<'a, W, P, G, B, X, C, S> {
    config: Config,
    stack: W,
    display: Display<P, G, B>,
    power: PowerController<X, C>,
    sleep: S,
    wake: &'a WakeSignal,
    dispatcher: Dispatcher,
    rx: [u8; MAX_ATTRIBUTE_LEN],
}

type NodeResult<T, P, W, C> = core::result::Result<T, NodeError<P, W, C>>;

impl<'a, W, P, G, B, X, C, S> Node<'a, W, P, G, B, X, C, S>
where
    W: WirelessStack,
    P: PanelDriver,
    G: Canvas,
    B: AsRef<[u8]> + AsMut<[u8]>,
    X: Peripherals,
    C: ControlPins,
    S: Sleep,
{
    /// Assemble a node from its collaborators
    ///
    /// `wake` is the signal raised by the wake button's interrupt handler.
    ///
    /// # Errors
    ///
    /// Returns [`FrameSizeMismatch`] if the configured panel dimensions do
    /// not describe the display's frame buffers.
    pub fn new(
        config: Config,
        stack: W,
        display: Display<P, G, B>,
        power: PowerController<X, C>,
        sleep: S,
        wake: &'a WakeSignal,
    ) -> Result<Self, FrameSizeMismatch> {
        let expected = config.dimensions.buffer_size();
        let provided = display.frames().frame_size();
        if expected != provided {
            return Err(FrameSizeMismatch { expected, provided });
        }

        let dispatcher = Dispatcher::new(&config);
        Ok(Self {
            config,
            stack,
            display,
            power,
            sleep,
            wake,
            dispatcher,
            rx: [0; MAX_ATTRIBUTE_LEN],
        })
    }

    /// Bring the node up
    ///
    /// Starts the wireless stack, arms the wake interrupt, starts and powers
    /// the panel, blanks the screen, then applies the configured text style.
    pub fn boot<K: WakeSource>(
        &mut self,
        button: &mut WakeButton<'_, K>,
    ) -> NodeResult<(), P, W, C> {
        self.stack.start().map_err(NodeError::<P, W, C>::Wireless)?;
        button.configure(self.config.wake_edge);

        self.display.start(self.config.panel_start_timeout)?;
        self.display.clear_screen()?;
        self.display.apply_style(&self.config.text_style);

        log::info!(
            "node up: {}x{} panel, text updates {:?}",
            self.config.dimensions.cols,
            self.config.dimensions.rows,
            self.config.text_update_mode
        );
        Ok(())
    }

    /// Run one loop iteration
    ///
    /// # Errors
    ///
    /// Returns `NodeError::Wireless` if the stack fails to deliver events and
    /// `NodeError::Power` if the display interface cannot be switched. A
    /// failed display update is counted in the report, not returned.
    pub fn step(&mut self) -> NodeResult<StepReport, P, W, C> {
        let mut report = StepReport::default();
        self.drain_events(&mut report)?;

        if let Err(e) = self.power.enter_low_power() {
            log::error!("cannot gate display interface: {}", e);
            return Err(e.into());
        }

        self.sleep.wait_for_interrupt();

        if let Err(e) = self.power.exit_low_power() {
            log::error!("cannot restore display interface: {}", e);
            return Err(e.into());
        }

        report.woken_by_button = self.wake.take();
        Ok(report)
    }

    /// Loop forever
    ///
    /// Only returns on a fault that [`step`](Self::step) reports.
    pub fn run(&mut self) -> NodeResult<Infallible, P, W, C> {
        loop {
            self.step()?;
        }
    }

    fn drain_events(&mut self, report: &mut StepReport) -> NodeResult<(), P, W, C> {
        while let Some(event) = self
            .stack
            .poll_event(&mut self.rx)
            .map_err(NodeError::<P, W, C>::Wireless)?
        {
            report.events += 1;
            log::debug!("wireless event {:?}", event);

            match self
                .dispatcher
                .dispatch(event, &mut self.display, &mut self.stack)
            {
                Ok(Dispatch::Rendered) => report.updates += 1,
                Ok(_) => {}
                Err(DispatchError::Display(e)) => {
                    log::warn!("display update failed: {}", e);
                    report.failed_updates += 1;
                }
                Err(DispatchError::Advertising(e)) => {
                    log::warn!("advertising failed: {:?}", e);
                    report.failed_advertising += 1;
                }
            }
        }
        Ok(())
    }

    /// Node configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the display orchestrator
    pub fn display(&self) -> &Display<P, G, B> {
        &self.display
    }

    /// Access the display orchestrator mutably
    pub fn display_mut(&mut self) -> &mut Display<P, G, B> {
        &mut self.display
    }

    /// Access the power controller
    pub fn power(&self) -> &PowerController<X, C> {
        &self.power
    }

    /// Access the wireless stack
    pub fn stack(&self) -> &W {
        &self.stack
    }

    /// Access the wireless stack mutably
    pub fn stack_mut(&mut self) -> &mut W {
        &mut self.stack
    }
}
