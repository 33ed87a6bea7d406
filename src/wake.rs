//! Wake interrupt handling
//!
//! A single edge-triggered button ends the CPU's wait-for-interrupt sleep.
//! The handler runs in interrupt context: it clears the pin's pending flag
//! and raises a [`WakeSignal`] for the main loop. It touches nothing else.

use core::sync::atomic::{AtomicBool, Ordering};

/// Edge that raises the interrupt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Edge {
    /// Low to high
    #[default]
    Rising,
    /// High to low
    Falling,
    /// Either transition
    Both,
}

/// Interrupt control of the wake pin
pub trait WakeSource {
    /// Unmask or mask the pin interrupt
    fn set_interrupt_mask(&mut self, enabled: bool);

    /// Select the triggering edge
    fn set_interrupt_edge(&mut self, edge: Edge);

    /// Route and enable the pin interrupt at the interrupt controller
    fn enable_interrupt(&mut self);

    /// Whether the pin's masked interrupt status is set
    fn is_interrupt_pending(&self) -> bool;

    /// Clear the pin's interrupt status
    fn clear_interrupt(&mut self);
}

/// Flag handed from the wake handler to the main loop
///
/// Only plain loads and stores are used, so it works on cores without
/// atomic read-modify-write.
#[derive(Debug, Default)]
pub struct WakeSignal {
    raised: AtomicBool,
}

impl WakeSignal {
    /// A lowered signal, usable in a `static`
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the signal (interrupt context)
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Whether the signal is raised, without lowering it
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Lower the signal, returning whether it was raised
    pub fn take(&self) -> bool {
        let raised = self.raised.load(Ordering::Acquire);
        if raised {
            self.raised.store(false, Ordering::Release);
        }
        raised
    }
}

/// The wake button and the signal it raises
pub struct WakeButton<'a, K> {
    source: K,
    signal: &'a WakeSignal,
}

impl<'a, K: WakeSource> WakeButton<'a, K> {
    /// Pair a wake pin with the signal read by the main loop
    pub fn new(source: K, signal: &'a WakeSignal) -> Self {
        Self { source, signal }
    }

    /// Unmask the pin, select `edge` and enable the interrupt
    pub fn configure(&mut self, edge: Edge) {
        self.source.set_interrupt_mask(true);
        self.source.set_interrupt_edge(edge);
        self.source.enable_interrupt();
        log::debug!("wake interrupt armed on {:?} edge", edge);
    }

    /// Interrupt handler body
    ///
    /// Clears the pending flag if it is set and returns whether it was. Runs
    /// in bounded time and never blocks.
    pub fn on_interrupt(&mut self) -> bool {
        if !self.source.is_interrupt_pending() {
            return false;
        }
        self.source.clear_interrupt();
        self.signal.raise();
        true
    }

    /// Access the wake pin
    pub fn source(&self) -> &K {
        &self.source
    }

    /// Release the wake pin
    pub fn release(self) -> K {
        self.source
    }
}
