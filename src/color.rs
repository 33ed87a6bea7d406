//! Colors for monochrome e-paper canvases
//!
//! Frames are packed one bit per pixel, MSB first. A set bit is ink (black)
//! and a cleared bit is paper (white), so a zero-initialized frame is blank.
//!
//! | Color | Bit | Packed byte |
//! |-------|-----|-------------|
//! | Black | 1   | 0xFF        |
//! | White | 0   | 0x00        |
//!
//! ## Example
//!
//! ```
//! use eink_node::Color;
//!
//! assert_eq!(Color::Black.byte(), 0xFF);
//! assert_eq!(Color::White.byte(), 0x00);
//! assert_eq!(Color::Black.inverted(), Color::White);
//! ```

/// Colors supported by a monochrome panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Ink
    Black,
    /// Paper
    #[default]
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

impl Color {
    /// Byte value of eight packed pixels of this color
    pub fn byte(self) -> u8 {
        match self {
            Self::Black => 0xFF,
            Self::White => 0x00,
        }
    }

    /// Whether this color sets its bit in the packed frame
    pub fn is_ink(self) -> bool {
        self == Self::Black
    }

    /// The opposite color
    pub fn inverted(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}
