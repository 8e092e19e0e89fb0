//! Full gallery planning: packing, distribution, and offsets.
//!
//! [`plan`] is the single entry point a host calls per layout pass. It packs
//! the images into rows, distributes each row across the container, and
//! records where every image sits so a caller can position items absolutely
//! instead of relying on flow wrapping.

use alloc::vec::Vec;

use crate::descriptor::{ImageDescriptor, LayoutConfig, LayoutError};
use crate::distribute::distribute;
use crate::pack::pack;

/// One image placed inside a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacedItem {
    /// Width in pixels.
    pub width: u32,
    /// Left edge, relative to the container's left edge.
    pub x: u32,
}

/// Geometry of one justified row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowPlan {
    /// Index of the row's first image in the planned slice.
    pub start: usize,
    /// Top edge, relative to the container's top edge.
    pub top: u32,
    /// Height shared by every image in the row.
    pub height: u32,
    /// Images in row order.
    pub items: Vec<PlacedItem>,
}

impl RowPlan {
    /// Number of images in the row.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` for rows produced by [`plan`].
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Range of image indices covered by this row.
    pub fn indices(&self) -> core::ops::Range<usize> {
        self.start..self.start + self.items.len()
    }

    /// Bottom edge of the row (exclusive of the row gap).
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Layout of a whole gallery for one container width.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GalleryPlan {
    /// Container width the plan was computed for.
    pub container_width: u32,
    /// Gap between items and between rows.
    pub gap: u32,
    /// Rows, top to bottom.
    pub rows: Vec<RowPlan>,
}

impl GalleryPlan {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when there were no images to lay out.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of images placed.
    pub fn image_count(&self) -> usize {
        self.rows.iter().map(RowPlan::len).sum()
    }

    /// Bottom edge of the last row, or 0 for an empty plan.
    pub fn content_height(&self) -> u32 {
        self.rows.last().map_or(0, RowPlan::bottom)
    }

    /// Every placed image as `(image_index, row, item)`, in input order.
    pub fn items(&self) -> impl Iterator<Item = (usize, &RowPlan, &PlacedItem)> + '_ {
        self.rows.iter().flat_map(|row| {
            row.items
                .iter()
                .enumerate()
                .map(move |(i, item)| (row.start + i, row, item))
        })
    }
}

/// Lay out `images` in justified rows across a container `container_width`
/// pixels wide.
///
/// Either every row is planned or an error is returned; there are no
/// partial plans. An empty slice gives an empty plan. Geometry that would
/// not fit in `u32` pixels is [`LayoutError::Overflow`].
///
/// ```
/// use zenjustify::{ImageDescriptor, LayoutConfig, plan};
///
/// let images = [
///     ImageDescriptor::from_dimensions(1500, 1000).unwrap(),
///     ImageDescriptor::from_dimensions(1000, 1000).unwrap(),
///     ImageDescriptor::from_dimensions(1000, 1000).unwrap(),
/// ];
/// let gallery = plan(&images, 1000, &LayoutConfig::new(280.0).gap(10)).unwrap();
///
/// assert_eq!(gallery.len(), 1);
/// let row = &gallery.rows[0];
/// assert_eq!(row.height, 280);
/// let xs: Vec<u32> = row.items.iter().map(|item| item.x).collect();
/// assert_eq!(xs, [0, 430, 720]);
/// ```
pub fn plan(
    images: &[ImageDescriptor],
    container_width: u32,
    config: &LayoutConfig,
) -> Result<GalleryPlan, LayoutError> {
    let packed = pack(images, container_width, config)?;
    let mut rows = Vec::with_capacity(packed.len());
    let mut bottom = 0u32;

    for row in &packed {
        let dist = distribute(row.images, container_width, config.gap)?;

        let mut items = Vec::with_capacity(dist.widths.len());
        let mut x = 0u32;
        for (i, &width) in dist.widths.iter().enumerate() {
            if i > 0 {
                x = checked(x, config.gap)?;
            }
            items.push(PlacedItem { width, x });
            x = checked(x, width)?;
        }

        let top = if rows.is_empty() {
            0
        } else {
            checked(bottom, config.gap)?
        };
        bottom = checked(top, dist.height)?;
        rows.push(RowPlan {
            start: row.start,
            top,
            height: dist.height,
            items,
        });
    }

    Ok(GalleryPlan {
        container_width,
        gap: config.gap,
        rows,
    })
}

fn checked(a: u32, b: u32) -> Result<u32, LayoutError> {
    a.checked_add(b).ok_or(LayoutError::Overflow)
}
