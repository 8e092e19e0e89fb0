//! Per-image descriptors and gallery layout configuration.
//!
//! An [`ImageDescriptor`] carries the only fact the layout engine needs about
//! an image: its aspect ratio. A [`LayoutConfig`] carries the target row
//! height and the gap between items.
//!
//! # Example
//!
//! ```
//! use zenjustify::{ImageDescriptor, LayoutConfig};
//!
//! let image = ImageDescriptor::from_dimensions(1600, 900).unwrap();
//! assert!((image.aspect_ratio() - 16.0 / 9.0).abs() < 1e-12);
//!
//! let config = LayoutConfig::new(240.0).gap(4);
//! assert_eq!(config.gap, 4);
//! ```

/// Default target row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 300.0;

/// Default gap between items (and between rows) in pixels.
pub const DEFAULT_GAP: u32 = 8;

/// Aspect ratio of a single image for one layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageDescriptor {
    aspect_ratio: f64,
}

impl ImageDescriptor {
    /// Descriptor from a known aspect ratio (`width / height`).
    ///
    /// The ratio must be finite and strictly positive.
    pub fn new(aspect_ratio: f64) -> Result<Self, LayoutError> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(LayoutError::InvalidAspectRatio);
        }
        Ok(Self { aspect_ratio })
    }

    /// Descriptor from declared pixel dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::ZeroDimension);
        }
        Ok(Self {
            aspect_ratio: width as f64 / height as f64,
        })
    }

    /// `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Width of this image when scaled to exactly `row_height`.
    pub fn natural_width(&self, row_height: f64) -> f64 {
        self.aspect_ratio * row_height
    }
}

/// Row height and spacing for a gallery.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Target row height. Rows are scaled to fit the container, so the
    /// final height of a row only approximates this.
    pub row_height: f64,
    /// Pixels between adjacent items, also used as the vertical spacing
    /// between rows.
    pub gap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            gap: DEFAULT_GAP,
        }
    }
}

impl LayoutConfig {
    /// Config with the given target row height and the default gap.
    pub fn new(row_height: f64) -> Self {
        Self {
            row_height,
            ..Self::default()
        }
    }

    /// Set the gap between items.
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Check the config is usable by the layout engine.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(LayoutError::InvalidRowHeight);
        }
        Ok(())
    }
}

/// Layout computation error.
///
/// All variants are caller precondition violations. A container that simply
/// has no width yet is not an error; the reflow controller retries it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Container width is zero.
    #[error("container width must be positive")]
    ZeroContainerWidth,
    /// Row height is zero, negative, or not finite.
    #[error("row height must be a positive finite number")]
    InvalidRowHeight,
    /// Declared image width or height is zero.
    #[error("image dimensions must be positive")]
    ZeroDimension,
    /// Aspect ratio is zero, negative, or not finite.
    #[error("aspect ratio must be a positive finite number")]
    InvalidAspectRatio,
    /// A row passed to the distributor has no images.
    #[error("row has no images")]
    EmptyRow,
    /// The gaps inside a row leave no room for the images themselves.
    #[error("gaps leave no width for the images in the row")]
    GapsExceedWidth,
    /// A row height or offset does not fit in `u32` pixels.
    #[error("layout geometry exceeds u32 pixels")]
    Overflow,
}
