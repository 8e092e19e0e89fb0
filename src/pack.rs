//! Greedy row packing.
//!
//! Walks the images left to right, accumulating each image's width at the
//! target row height. A row is closed as soon as the next image (plus one
//! gap) would push it past the container width. Decisions are never
//! revisited and images are never reordered.

use alloc::vec::Vec;

use crate::descriptor::{ImageDescriptor, LayoutConfig, LayoutError};

/// A contiguous run of images that share one justified row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Row<'a> {
    /// Index of the first image of this row in the packed slice.
    pub start: usize,
    /// The images in this row. Never empty.
    pub images: &'a [ImageDescriptor],
}

impl Row<'_> {
    /// Number of images in the row.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always `false` for rows produced by [`pack`].
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// One past the index of the last image in the row.
    pub fn end(&self) -> usize {
        self.start + self.images.len()
    }
}

/// Partition `images` into rows for a container `container_width` pixels wide.
///
/// An image wider than the container on its own still gets a row. The last
/// row may be under-filled.
pub fn pack<'a>(
    images: &'a [ImageDescriptor],
    container_width: u32,
    config: &LayoutConfig,
) -> Result<Vec<Row<'a>>, LayoutError> {
    if container_width == 0 {
        return Err(LayoutError::ZeroContainerWidth);
    }
    config.validate()?;

    let limit = container_width as f64;
    let gap = config.gap as f64;
    let mut rows = Vec::new();
    let mut start = 0;
    let mut running = 0.0;

    for (i, image) in images.iter().enumerate() {
        let natural = image.natural_width(config.row_height);
        let non_empty = i > start;
        let projected = running + natural + if non_empty { gap } else { 0.0 };

        if non_empty && projected > limit {
            rows.push(Row {
                start,
                images: &images[start..i],
            });
            start = i;
            running = natural;
        } else {
            running = projected;
        }
    }

    if start < images.len() {
        rows.push(Row {
            start,
            images: &images[start..],
        });
    }

    Ok(rows)
}
