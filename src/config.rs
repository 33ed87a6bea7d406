//! Node configuration types and builder

pub use crate::error::BuilderError;

use crate::canvas::TextStyle;
use crate::panel::UpdateMode;
use crate::power::DriveMode;
use crate::wake::Edge;
use crate::wireless::{AdvertisingInterval, AdvertisingParams};

/// Frame size in bytes of the default 264x176 panel
pub const FRAME_SIZE: usize = Dimensions::PANEL_264X176.buffer_size();

/// Panel start parameter used by the reference node
pub const DEFAULT_PANEL_START_TIMEOUT: u8 = 20;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of rows (height in pixels)
    pub rows: u16,
    /// Number of columns (width in pixels)
    pub cols: u16,
}

impl Dimensions {
    /// 2.7" panel, 264 columns by 176 rows
    pub const PANEL_264X176: Self = Self {
        rows: 176,
        cols: 264,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0
    /// - cols == 0
    /// - cols % 8 != 0 (rows must be byte-packed)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || cols == 0 || cols % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Bytes per packed row
    pub const fn row_bytes(&self) -> usize {
        self.cols as usize / 8
    }

    /// Calculate required buffer size in bytes
    pub const fn buffer_size(&self) -> usize {
        (self.rows as usize * self.cols as usize) / 8
    }

    /// Whether a pixel position lies on the panel
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x < self.cols && y < self.rows
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::PANEL_264X176
    }
}

/// Screen position where inbound text is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    /// X coordinate in pixels
    pub x: u16,
    /// Y coordinate in pixels
    pub y: u16,
}

impl Anchor {
    /// Create a new anchor
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Node configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Update mode used when rendering inbound text
    pub text_update_mode: UpdateMode,
    /// Where inbound text is drawn
    pub text_anchor: Anchor,
    /// Advertising profile restarted on stack-on and disconnect
    pub advertising: AdvertisingParams,
    /// Parameter handed to the panel driver's `start`
    pub panel_start_timeout: u8,
    /// Canvas drawing defaults applied at boot
    pub text_style: TextStyle,
    /// Edge that raises the wake interrupt
    pub wake_edge: Edge,
    /// Drive mode restored on the control signals when leaving low power
    pub active_drive_mode: DriveMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::PANEL_264X176,
            text_update_mode: UpdateMode::Full,
            text_anchor: Anchor::default(),
            advertising: AdvertisingParams {
                interval: AdvertisingInterval::Slow,
                profile: 0,
            },
            panel_start_timeout: DEFAULT_PANEL_START_TIMEOUT,
            text_style: TextStyle::default(),
            wake_edge: Edge::Rising,
            active_drive_mode: DriveMode::StrongInputOff,
        }
    }
}

/// Builder for constructing node configuration
///
/// # Example
///
/// ```
/// use eink_node::{Builder, Dimensions, UpdateMode};
///
/// let config = match Builder::new()
///     .dimensions(Dimensions::PANEL_264X176)
///     .text_update_mode(UpdateMode::Partial)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.text_update_mode, UpdateMode::Partial);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set the update mode used for inbound text
    pub fn text_update_mode(mut self, mode: UpdateMode) -> Self {
        self.config.text_update_mode = mode;
        self
    }

    /// Set where inbound text is drawn
    pub fn text_anchor(mut self, anchor: Anchor) -> Self {
        self.config.text_anchor = anchor;
        self
    }

    /// Set the advertising profile
    pub fn advertising(mut self, interval: AdvertisingInterval, profile: u8) -> Self {
        self.config.advertising = AdvertisingParams { interval, profile };
        self
    }

    /// Set the panel start parameter
    pub fn panel_start_timeout(mut self, value: u8) -> Self {
        self.config.panel_start_timeout = value;
        self
    }

    /// Set the canvas drawing defaults
    pub fn text_style(mut self, style: TextStyle) -> Self {
        self.config.text_style = style;
        self
    }

    /// Set the wake interrupt edge
    pub fn wake_edge(mut self, edge: Edge) -> Self {
        self.config.wake_edge = edge;
        self
    }

    /// Set the drive mode restored on wake
    pub fn active_drive_mode(mut self, mode: DriveMode) -> Self {
        self.config.active_drive_mode = mode;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if the dimensions were
    /// constructed by hand and violate [`Dimensions::new`] constraints, or
    /// `BuilderError::AnchorOutOfBounds` if the text anchor is off-panel.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dims = self.config.dimensions;
        Dimensions::new(dims.rows, dims.cols)?;

        let anchor = self.config.text_anchor;
        if !dims.contains(anchor.x, anchor.y) {
            return Err(BuilderError::AnchorOutOfBounds {
                x: anchor.x,
                y: anchor.y,
            });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_matches_panel() {
        assert_eq!(FRAME_SIZE, 264 * 176 / 8);
        assert_eq!(Dimensions::default().row_bytes(), 33);
    }

    #[test]
    fn test_dimensions_reject_unpacked_columns() {
        assert!(matches!(
            Dimensions::new(176, 260),
            Err(BuilderError::InvalidDimensions {
                rows: 176,
                cols: 260
            })
        ));
        assert!(Dimensions::new(0, 264).is_err());
        assert!(Dimensions::new(176, 0).is_err());
    }

    #[test]
    fn test_builder_defaults_match_reference_node() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.text_update_mode, UpdateMode::Full);
        assert_eq!(config.text_anchor, Anchor::new(0, 0));
        assert_eq!(config.advertising.interval, AdvertisingInterval::Slow);
        assert_eq!(config.advertising.profile, 0);
        assert_eq!(config.panel_start_timeout, 20);
        assert_eq!(config.wake_edge, Edge::Rising);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_rejects_off_panel_anchor() {
        let result = Builder::new().text_anchor(Anchor::new(264, 0)).build();
        assert!(matches!(
            result,
            Err(BuilderError::AnchorOutOfBounds { x: 264, y: 0 })
        ));
    }

    #[test]
    fn test_builder_rejects_hand_built_dimensions() {
        let result = Builder::new()
            .dimensions(Dimensions { rows: 10, cols: 12 })
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
    }
}
