//! Display update orchestration
//!
//! [`Display`] owns the panel driver, the canvas and both frame buffers. An
//! update always runs the same three steps, each finished before the next:
//!
//! 1. copy the canvas into the working buffer
//! 2. refresh the panel from the cache (old) to the working buffer (new)
//! 3. copy the working buffer into the cache
//!
//! After a successful update the cache equals the working buffer and matches
//! the glass. After a failed refresh the cache is left alone.

use crate::canvas::{Canvas, TextStyle};
use crate::color::Color;
use crate::config::Anchor;
use crate::error::{Error, FrameSizeMismatch};
use crate::framebuffer::FrameBuffers;
use crate::panel::{PanelDriver, UpdateMode};

type DisplayResult<P> = core::result::Result<(), Error<P>>;

/// Display update orchestrator
///
/// ## Type Parameters
///
/// * `P` - Panel driver implementing [`PanelDriver`]
/// * `G` - Canvas implementing [`Canvas`]
/// * `B` - Frame buffer storage
pub struct Display<P, G, B> {
    panel: P,
    canvas: G,
    frames: FrameBuffers<B>,
}

impl<P, G, B> Display<P, G, B>
where
    P: PanelDriver,
    G: Canvas,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display
    ///
    /// # Errors
    ///
    /// Returns `Error::FrameSize` if the canvas frame size differs from the
    /// frame buffers.
    pub fn new(panel: P, canvas: G, frames: FrameBuffers<B>) -> Result<Self, Error<P>> {
        let expected = frames.frame_size();
        let provided = canvas.frame_size();
        if expected != provided {
            return Err(FrameSizeMismatch { expected, provided }.into());
        }
        Ok(Self {
            panel,
            canvas,
            frames,
        })
    }

    /// Initialize the canvas, start the panel interface and power the panel
    pub fn start(&mut self, timeout: u8) -> DisplayResult<P> {
        self.canvas.init();
        self.panel.start(timeout).map_err(Error::<P>::Panel)?;
        self.set_panel_power(true)
    }

    /// Switch the panel supply
    pub fn set_panel_power(&mut self, on: bool) -> DisplayResult<P> {
        self.panel.set_power(on).map_err(Error::Panel)
    }

    /// Push the current canvas to the panel
    ///
    /// Blocks until the panel driver finishes; a full refresh takes around a
    /// second. There is no retry: a driver failure is returned as is.
    pub fn update(&mut self, mode: UpdateMode, power_cycle: bool) -> DisplayResult<P> {
        self.frames.load_canvas(&self.canvas)?;

        let (old_frame, new_frame) = self.frames.frames();
        if let Err(e) = self
            .panel
            .refresh(old_frame, new_frame, mode, power_cycle)
        {
            log::warn!("panel refresh failed ({:?}): {:?}", mode, e);
            return Err(Error::Panel(e));
        }

        self.frames.snapshot();
        log::debug!("panel refreshed ({:?}, power cycle {})", mode, power_cycle);
        Ok(())
    }

    /// Blank the canvas and push it with a power-cycled full refresh
    pub fn clear_screen(&mut self) -> DisplayResult<P> {
        self.canvas.set_color(Color::Black);
        self.canvas.set_background_color(Color::White);
        self.canvas.clear();
        self.update(UpdateMode::Full, true)
    }

    /// Draw `text` at `anchor` and push it with a power-cycled refresh
    pub fn show_text(&mut self, text: &str, anchor: Anchor, mode: UpdateMode) -> DisplayResult<P> {
        self.canvas
            .draw_text_at(text, i32::from(anchor.x), i32::from(anchor.y));
        self.update(mode, true)
    }

    /// Apply drawing defaults to the canvas
    pub fn apply_style(&mut self, style: &TextStyle) {
        style.apply(&mut self.canvas);
    }

    /// Access the frame buffers
    pub fn frames(&self) -> &FrameBuffers<B> {
        &self.frames
    }

    /// Access the canvas
    pub fn canvas(&self) -> &G {
        &self.canvas
    }

    /// Access the canvas mutably, to draw before the next update
    pub fn canvas_mut(&mut self) -> &mut G {
        &mut self.canvas
    }

    /// Access the panel driver
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Access the panel driver mutably
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Release the collaborators and buffers
    pub fn release(self) -> (P, G, FrameBuffers<B>) {
        (self.panel, self.canvas, self.frames)
    }
}
