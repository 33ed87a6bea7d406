//! Canvas backed by embedded-graphics
//!
//! This module provides [`MonoCanvas`], a packed 1-bit frame that implements
//! both [`Canvas`] and the [`DrawTarget`] trait from the embedded-graphics
//! ecosystem, so any embedded-graphics primitive can be drawn onto the node's
//! screen before the next update.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use eink_node::{Canvas, Color, Dimensions, MonoCanvas, FRAME_SIZE};
//!
//! let mut canvas = match MonoCanvas::new([0u8; FRAME_SIZE], Dimensions::PANEL_264X176) {
//!     Ok(canvas) => canvas,
//!     Err(_) => return,
//! };
//!
//! canvas.draw_text_at("Hello, E-Paper!", 0, 0);
//!
//! let _ = Rectangle::new(Point::new(10, 40), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Black))
//!     .draw(&mut canvas);
//! ```

use core::convert::Infallible;
use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyleBuilder, ascii::FONT_7X13_BOLD},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::canvas::{Canvas, TextAlign, TextMode};
use crate::color::Color;
use crate::config::Dimensions;
use crate::error::FrameSizeMismatch;

/// Monospace font handle
///
/// Defaults to a 13 pixel bold face.
#[derive(Clone, Copy)]
pub struct Font(pub &'static MonoFont<'static>);

impl Default for Font {
    fn default() -> Self {
        Self(&FONT_7X13_BOLD)
    }
}

impl From<TextAlign> for Alignment {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Self::Left,
            TextAlign::Center => Self::Center,
            TextAlign::Right => Self::Right,
        }
    }
}

/// Packed 1-bit canvas
///
/// Rows are stored top to bottom, eight pixels per byte, MSB first.
///
/// ## Type Parameters
///
/// * `B` - Buffer type implementing `AsRef<[u8]>` and `AsMut<[u8]>`
pub struct MonoCanvas<B> {
    buffer: B,
    dimensions: Dimensions,
    font: Font,
    color: Color,
    background: Color,
    mode: TextMode,
    align: TextAlign,
}

impl<B> MonoCanvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a canvas over `buffer`, cleared to white
    ///
    /// # Errors
    ///
    /// Returns [`FrameSizeMismatch`] if `buffer` is not exactly
    /// `dimensions.buffer_size()` bytes.
    pub fn new(buffer: B, dimensions: Dimensions) -> Result<Self, FrameSizeMismatch> {
        let expected = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided != expected {
            return Err(FrameSizeMismatch { expected, provided });
        }
        let mut canvas = Self {
            buffer,
            dimensions,
            font: Font::default(),
            color: Color::Black,
            background: Color::White,
            mode: TextMode::Normal,
            align: TextAlign::Left,
        };
        canvas.init();
        Ok(canvas)
    }

    /// Canvas dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Packed canvas contents
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Read back a single pixel
    ///
    /// Returns `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (index, bit) = self.locate(x, y)?;
        let byte = self.buffer.as_ref().get(index)?;
        Some(if byte & bit != 0 {
            Color::Black
        } else {
            Color::White
        })
    }

    /// Byte index and bit mask of a pixel
    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.dimensions.cols as u32 || y >= self.dimensions.rows as u32 {
            return None;
        }
        let index = y as usize * self.dimensions.row_bytes() + x as usize / 8;
        let bit = 0x80 >> (x % 8);
        Some((index, bit))
    }

    /// Set a single pixel to a color
    ///
    /// Internal method used by the [`DrawTarget`] implementation.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let Some((index, bit)) = self.locate(x, y) else {
            return;
        };
        let Some(byte) = self.buffer.as_mut().get_mut(index) else {
            return;
        };
        if color.is_ink() {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }
}

impl<B> Canvas for MonoCanvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Font = Font;

    fn init(&mut self) {
        self.font = Font::default();
        self.color = Color::Black;
        self.background = Color::White;
        self.mode = TextMode::Normal;
        self.align = TextAlign::Left;
        Canvas::clear(self);
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_mode(&mut self, mode: TextMode) {
        self.mode = mode;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn clear(&mut self) {
        self.buffer.as_mut().fill(self.background.byte());
    }

    fn draw_text_at(&mut self, text: &str, x: i32, y: i32) {
        let (foreground, background) = match self.mode {
            TextMode::Normal => (self.color, Some(self.background)),
            TextMode::Transparent => (self.color, None),
            TextMode::Reverse => (self.background, Some(self.color)),
        };

        let mut builder = MonoTextStyleBuilder::new()
            .font(self.font.0)
            .text_color(foreground);
        if let Some(background) = background {
            builder = builder.background_color(background);
        }
        let character_style = builder.build();
        let text_style = TextStyleBuilder::new()
            .alignment(self.align.into())
            .baseline(Baseline::Top)
            .build();

        let _ = Text::with_text_style(text, Point::new(x, y), character_style, text_style)
            .draw(self);
    }

    fn frame_size(&self) -> usize {
        self.buffer.as_ref().len()
    }

    fn copy_canvas_into(&self, buffer: &mut [u8]) {
        let src = self.buffer.as_ref();
        debug_assert_eq!(
            src.len(),
            buffer.len(),
            "canvas copies are whole frames only"
        );
        let len = src.len().min(buffer.len());
        buffer[..len].copy_from_slice(&src[..len]);
    }
}

impl<B> DrawTarget for MonoCanvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.set_pixel(x as u32, y as u32, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.as_mut().fill(color.byte());
        Ok(())
    }
}

impl<B> OriginDimensions for MonoCanvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.dimensions.cols as u32, self.dimensions.rows as u32)
    }
}
