//! Graphics collaborator contract
//!
//! The canvas renders text into its own 1-bit frame. The display orchestrator
//! never reads canvas memory directly; it asks for a copy with
//! [`Canvas::copy_canvas_into`] right before each refresh.
//!
//! With the `graphics` feature, [`MonoCanvas`](crate::graphics::MonoCanvas)
//! implements this trait on top of embedded-graphics.

use crate::color::Color;

/// How glyph backgrounds are painted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextMode {
    /// Glyph cells are filled with the background color
    #[default]
    Normal,
    /// Only glyph pixels are drawn
    Transparent,
    /// Foreground and background swapped
    Reverse,
}

/// Horizontal alignment relative to the anchor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the left edge of the text
    #[default]
    Left,
    /// Anchor is the horizontal center of the text
    Center,
    /// Anchor is the right edge of the text
    Right,
}

/// Drawing defaults applied to the canvas at boot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Foreground color
    pub color: Color,
    /// Background color, also the clear color
    pub background: Color,
    /// Background painting mode
    pub mode: TextMode,
    /// Horizontal alignment
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::Black,
            background: Color::White,
            mode: TextMode::Normal,
            align: TextAlign::Left,
        }
    }
}

impl TextStyle {
    /// Push every setting in this style to `canvas`, with its default font
    pub fn apply<G: Canvas>(&self, canvas: &mut G) {
        canvas.set_font(G::Font::default());
        canvas.set_color(self.color);
        canvas.set_background_color(self.background);
        canvas.set_text_mode(self.mode);
        canvas.set_text_align(self.align);
    }
}

/// Trait for the graphics library that owns the canvas
///
/// Drawing is synchronous and infallible: every call has finished mutating
/// canvas memory when it returns.
pub trait Canvas {
    /// Font handle understood by this canvas
    type Font: Copy + Default;

    /// Reset the canvas to its power-on state
    fn init(&mut self);

    /// Set the foreground color
    fn set_color(&mut self, color: Color);

    /// Set the background color
    fn set_background_color(&mut self, color: Color);

    /// Select the font used by [`draw_text_at`](Self::draw_text_at)
    fn set_font(&mut self, font: Self::Font);

    /// Select how glyph backgrounds are painted
    fn set_text_mode(&mut self, mode: TextMode);

    /// Select horizontal alignment
    fn set_text_align(&mut self, align: TextAlign);

    /// Fill the whole canvas with the background color
    fn clear(&mut self);

    /// Draw `text` with its anchor at `(x, y)`
    fn draw_text_at(&mut self, text: &str, x: i32, y: i32);

    /// Size in bytes of the packed canvas
    fn frame_size(&self) -> usize;

    /// Copy the packed canvas into `buffer`
    ///
    /// Callers pass a buffer of exactly [`frame_size`](Self::frame_size) bytes;
    /// [`FrameBuffers::load_canvas`](crate::FrameBuffers::load_canvas) checks
    /// this before calling. Partial copies are not supported.
    fn copy_canvas_into(&self, buffer: &mut [u8]);
}
