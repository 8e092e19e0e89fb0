//! Pixel-exact width distribution for one row.
//!
//! Scales a row so its images, plus the gaps between them, span the
//! container exactly. Widths are floored to whole pixels and the pixels lost
//! to flooring all go to the last image, so the sum is exact by construction.

use alloc::vec::Vec;

use num_traits::Float;

use crate::descriptor::{ImageDescriptor, LayoutError};

/// Integer geometry for one justified row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowWidths {
    /// Height shared by every image in the row, `round(scale)`.
    pub height: u32,
    /// Unrounded scale factor: pixels of width per unit of aspect ratio.
    pub scale: f64,
    /// Per-image widths, in row order.
    pub widths: Vec<u32>,
}

impl RowWidths {
    /// Sum of the image widths, excluding gaps.
    pub fn total_width(&self) -> u64 {
        self.widths.iter().map(|&w| w as u64).sum()
    }
}

/// Distribute `container_width` across `row`, leaving `gap` pixels between
/// neighbours.
///
/// Guarantees `sum(widths) + gap * (n - 1) == container_width`.
///
/// ```
/// use zenjustify::{ImageDescriptor, distribute};
///
/// let square = ImageDescriptor::new(1.0).unwrap();
/// let row = distribute(&[square; 3], 100, 0).unwrap();
/// assert_eq!(row.widths, [33, 33, 34]);
/// assert_eq!(row.height, 33);
/// ```
pub fn distribute(
    row: &[ImageDescriptor],
    container_width: u32,
    gap: u32,
) -> Result<RowWidths, LayoutError> {
    if row.is_empty() {
        return Err(LayoutError::EmptyRow);
    }
    if container_width == 0 {
        return Err(LayoutError::ZeroContainerWidth);
    }

    let gaps = gap as u64 * (row.len() as u64 - 1);
    if gaps >= container_width as u64 {
        return Err(LayoutError::GapsExceedWidth);
    }
    let available = container_width as u64 - gaps;

    let total_ratio: f64 = row.iter().map(ImageDescriptor::aspect_ratio).sum();
    let scale = available as f64 / total_ratio;
    let height = Float::round(scale);
    if height > u32::MAX as f64 {
        return Err(LayoutError::Overflow);
    }
    let height = height as u32;

    let mut widths: Vec<u32> = row
        .iter()
        .map(|image| Float::floor(image.aspect_ratio() * scale) as u32)
        .collect();

    // Floating error can push a floored width one pixel past its exact
    // value, so the remainder is signed.
    let floored: i64 = widths.iter().map(|&w| w as i64).sum();
    let leftover = available as i64 - floored;
    if let Some(last) = widths.last_mut() {
        *last = u32::try_from(*last as i64 + leftover).unwrap_or(0);
    }

    Ok(RowWidths {
        height,
        scale,
        widths,
    })
}
