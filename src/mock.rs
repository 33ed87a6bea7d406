//! Recording collaborators for unit tests
//!
//! Every mock appends to one shared [`Log`] so tests can assert the order of
//! calls across collaborators.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use crate::canvas::{Canvas, TextAlign, TextMode};
use crate::color::Color;
use crate::node::Sleep;
use crate::panel::{PanelDriver, UpdateMode};
use crate::power::{ControlPins, ControlSignal, DriveMode, PeripheralId, Peripherals};
use crate::wake::{Edge, WakeSignal, WakeSource};
use crate::wireless::{AdvertisingInterval, AttributeWrite, WirelessEvent, WirelessStack};

/// A collaborator call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    // canvas
    CanvasInit,
    SetColor(Color),
    SetBackground(Color),
    SetFont,
    SetTextMode(TextMode),
    SetTextAlign(TextAlign),
    Clear,
    DrawText(String, i32, i32),
    CopyCanvas,
    // panel
    PanelStart(u8),
    PanelPower(bool),
    Refresh { mode: UpdateMode, power_cycle: bool },
    // power
    Enable(PeripheralId),
    Disable(PeripheralId),
    DriveMode(ControlSignal, DriveMode),
    ClearPin(ControlSignal),
    // wake
    WakeMask(bool),
    WakeEdge(Edge),
    WakeEnable,
    WakeClear,
    // wireless
    StackStart,
    Advertise(AdvertisingInterval, u8),
    // cpu
    Sleep,
}

pub type Log = Rc<RefCell<Vec<Call>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

pub struct MockCanvas {
    log: Log,
    pixels: Vec<u8>,
    background: Color,
}

impl MockCanvas {
    pub fn new(log: &Log, size: usize) -> Self {
        Self {
            log: log.clone(),
            pixels: vec![0; size],
            background: Color::White,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, size: usize) {
        self.pixels.resize(size, 0);
    }
}

impl Canvas for MockCanvas {
    type Font = ();

    fn init(&mut self) {
        self.pixels.fill(0);
        self.log.borrow_mut().push(Call::CanvasInit);
    }

    fn set_color(&mut self, color: Color) {
        self.log.borrow_mut().push(Call::SetColor(color));
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = color;
        self.log.borrow_mut().push(Call::SetBackground(color));
    }

    fn set_font(&mut self, _font: ()) {
        self.log.borrow_mut().push(Call::SetFont);
    }

    fn set_text_mode(&mut self, mode: TextMode) {
        self.log.borrow_mut().push(Call::SetTextMode(mode));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.log.borrow_mut().push(Call::SetTextAlign(align));
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background.byte());
        self.log.borrow_mut().push(Call::Clear);
    }

    // Text bytes are stamped into the frame so each string leaves a distinct
    // pattern.
    fn draw_text_at(&mut self, text: &str, x: i32, y: i32) {
        let len = self.pixels.len();
        if len > 0 {
            let start = x.unsigned_abs() as usize;
            for (i, b) in text.bytes().enumerate() {
                self.pixels[(start + i) % len] = b;
            }
        }
        self.log
            .borrow_mut()
            .push(Call::DrawText(text.into(), x, y));
    }

    fn frame_size(&self) -> usize {
        self.pixels.len()
    }

    fn copy_canvas_into(&self, buffer: &mut [u8]) {
        buffer.copy_from_slice(&self.pixels);
        self.log.borrow_mut().push(Call::CopyCanvas);
    }
}

pub struct MockPanel {
    log: Log,
    fail_refresh: bool,
    old_frame: Vec<u8>,
    new_frame: Vec<u8>,
}

impl MockPanel {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_refresh: false,
            old_frame: Vec::new(),
            new_frame: Vec::new(),
        }
    }

    pub fn fail_refresh(&mut self, fail: bool) {
        self.fail_refresh = fail;
    }

    pub fn last_old_frame(&self) -> &[u8] {
        &self.old_frame
    }

    pub fn last_new_frame(&self) -> &[u8] {
        &self.new_frame
    }
}

impl PanelDriver for MockPanel {
    type Error = MockError;

    fn start(&mut self, timeout: u8) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::PanelStart(timeout));
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::PanelPower(on));
        Ok(())
    }

    fn refresh(
        &mut self,
        old_frame: &[u8],
        new_frame: &[u8],
        mode: UpdateMode,
        power_cycle: bool,
    ) -> Result<(), Self::Error> {
        self.log
            .borrow_mut()
            .push(Call::Refresh { mode, power_cycle });
        if self.fail_refresh {
            return Err(MockError);
        }
        self.old_frame = old_frame.to_vec();
        self.new_frame = new_frame.to_vec();
        Ok(())
    }
}

pub struct MockPeripherals {
    log: Log,
    enabled: [bool; 3],
}

impl MockPeripherals {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            enabled: [true; 3],
        }
    }

    pub fn enabled(&self) -> [bool; 3] {
        self.enabled
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled.iter().any(|on| *on)
    }

    fn index(id: PeripheralId) -> usize {
        match id {
            PeripheralId::Clock => 0,
            PeripheralId::Timer => 1,
            PeripheralId::SerialMaster => 2,
        }
    }
}

impl Peripherals for MockPeripherals {
    fn enable(&mut self, id: PeripheralId) {
        self.enabled[Self::index(id)] = true;
        self.log.borrow_mut().push(Call::Enable(id));
    }

    fn disable(&mut self, id: PeripheralId) {
        self.enabled[Self::index(id)] = false;
        self.log.borrow_mut().push(Call::Disable(id));
    }
}

pub struct MockPins {
    log: Log,
    modes: [DriveMode; ControlSignal::COUNT],
    high: [bool; ControlSignal::COUNT],
}

impl MockPins {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            modes: [DriveMode::StrongInputOff; ControlSignal::COUNT],
            high: [true; ControlSignal::COUNT],
        }
    }

    pub fn mode(&self, signal: ControlSignal) -> DriveMode {
        self.modes[signal as usize]
    }

    pub fn is_high(&self, signal: ControlSignal) -> bool {
        self.high[signal as usize]
    }
}

impl ControlPins for MockPins {
    type Error = Infallible;

    fn set_drive_mode(
        &mut self,
        signal: ControlSignal,
        mode: DriveMode,
    ) -> Result<(), Self::Error> {
        self.modes[signal as usize] = mode;
        self.log.borrow_mut().push(Call::DriveMode(signal, mode));
        Ok(())
    }

    fn clear(&mut self, signal: ControlSignal) -> Result<(), Self::Error> {
        self.high[signal as usize] = false;
        self.log.borrow_mut().push(Call::ClearPin(signal));
        Ok(())
    }
}

pub struct MockWake {
    log: Log,
    pending: bool,
}

impl MockWake {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            pending: false,
        }
    }

    pub fn press(&mut self) {
        self.pending = true;
    }
}

impl WakeSource for MockWake {
    fn set_interrupt_mask(&mut self, enabled: bool) {
        self.log.borrow_mut().push(Call::WakeMask(enabled));
    }

    fn set_interrupt_edge(&mut self, edge: Edge) {
        self.log.borrow_mut().push(Call::WakeEdge(edge));
    }

    fn enable_interrupt(&mut self) {
        self.log.borrow_mut().push(Call::WakeEnable);
    }

    fn is_interrupt_pending(&self) -> bool {
        self.pending
    }

    fn clear_interrupt(&mut self) {
        self.pending = false;
        self.log.borrow_mut().push(Call::WakeClear);
    }
}

/// Owned form of a queued stack event
#[derive(Clone, Debug)]
pub enum Inbound {
    StackOn,
    Connected,
    Disconnected,
    WriteCommand { handle: u16, value: Vec<u8>, declared_len: u16 },
    WriteRequest { handle: u16, value: Vec<u8> },
    Other(u32),
    Fail,
}

impl Inbound {
    pub fn write(value: &[u8]) -> Self {
        Self::WriteCommand {
            handle: 0x0012,
            value: value.to_vec(),
            declared_len: value.len() as u16,
        }
    }
}

pub struct MockStack {
    log: Log,
    queue: VecDeque<Inbound>,
    fail_advertising: bool,
}

impl MockStack {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            queue: VecDeque::new(),
            fail_advertising: false,
        }
    }

    pub fn push(&mut self, event: Inbound) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn fail_advertising(&mut self, fail: bool) {
        self.fail_advertising = fail;
    }
}

fn copy_in<'a>(rx: &'a mut [u8], value: &[u8]) -> &'a [u8] {
    let n = value.len().min(rx.len());
    rx[..n].copy_from_slice(&value[..n]);
    &rx[..n]
}

impl WirelessStack for MockStack {
    type Error = MockError;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Call::StackStart);
        Ok(())
    }

    fn poll_event<'a>(
        &mut self,
        rx: &'a mut [u8],
    ) -> Result<Option<WirelessEvent<'a>>, Self::Error> {
        let Some(inbound) = self.queue.pop_front() else {
            return Ok(None);
        };
        let event = match inbound {
            Inbound::StackOn => WirelessEvent::StackOn,
            Inbound::Connected => WirelessEvent::Connected,
            Inbound::Disconnected => WirelessEvent::Disconnected,
            Inbound::WriteCommand {
                handle,
                value,
                declared_len,
            } => WirelessEvent::WriteCommand(AttributeWrite {
                handle,
                value: copy_in(rx, &value),
                declared_len,
            }),
            Inbound::WriteRequest { handle, value } => {
                WirelessEvent::WriteRequest(AttributeWrite::new(handle, copy_in(rx, &value)))
            }
            Inbound::Other(code) => WirelessEvent::Other(code),
            Inbound::Fail => return Err(MockError),
        };
        Ok(Some(event))
    }

    fn start_advertising(
        &mut self,
        interval: AdvertisingInterval,
        profile: u8,
    ) -> Result<(), Self::Error> {
        self.log
            .borrow_mut()
            .push(Call::Advertise(interval, profile));
        if self.fail_advertising {
            return Err(MockError);
        }
        Ok(())
    }
}

/// CPU sleep that optionally plays the wake button while asleep
pub struct MockSleep<'a> {
    log: Log,
    press: Option<&'a WakeSignal>,
}

impl<'a> MockSleep<'a> {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            press: None,
        }
    }

    pub fn pressing(log: &Log, signal: &'a WakeSignal) -> Self {
        Self {
            log: log.clone(),
            press: Some(signal),
        }
    }
}

impl Sleep for MockSleep<'_> {
    fn wait_for_interrupt(&mut self) {
        self.log.borrow_mut().push(Call::Sleep);
        if let Some(signal) = self.press {
            signal.raise();
        }
    }
}
