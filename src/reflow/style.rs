//! Inline styling computed from a gallery plan.
//!
//! The container becomes a wrapping flex box and every image gets an exact
//! pixel width and height, with right and bottom margins standing in for the
//! gap. Each record renders to an inline CSS declaration list via `Display`.
//! Styling is a pure function of the plan, so re-applying an unchanged pass
//! writes identical declarations.

use alloc::vec::Vec;
use core::fmt;

use crate::plan::GalleryPlan;

use super::markup::ValidItem;

/// Styling for the gallery container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContainerStyle;

impl fmt::Display for ContainerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("display: flex; flex-wrap: wrap; align-items: flex-start;")
    }
}

/// Styling for each item link.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinkStyle;

impl fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("display: block; line-height: 0;")
    }
}

/// Styling for one image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemStyle {
    /// Position of the item among the container's markup candidates.
    pub item: usize,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels, shared across the row.
    pub height: u32,
    /// Gap to the next image, 0 for the last image of a row.
    pub margin_right: u32,
    /// Gap to the next row.
    pub margin_bottom: u32,
}

impl fmt::Display for ItemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "object-fit: cover; display: block; width: {}px; height: {}px; \
             margin-right: {}px; margin-bottom: {}px; box-sizing: border-box;",
            self.width, self.height, self.margin_right, self.margin_bottom
        )
    }
}

/// Everything written to a container for one layout pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GalleryStyle {
    /// Container declarations.
    pub container: ContainerStyle,
    /// Link declarations, identical for every item.
    pub link: LinkStyle,
    /// Per-image declarations, in document order. Items that failed
    /// validation are absent.
    pub items: Vec<ItemStyle>,
}

impl GalleryStyle {
    /// Build styling for `plan`, whose image indices refer to `items`.
    ///
    /// # Panics
    ///
    /// If `plan` references an image index outside `items`.
    pub fn from_plan(plan: &GalleryPlan, items: &[ValidItem]) -> Self {
        let mut styles = Vec::with_capacity(plan.image_count());
        for row in &plan.rows {
            let last = row.len().saturating_sub(1);
            for (i, placed) in row.items.iter().enumerate() {
                styles.push(ItemStyle {
                    item: items[row.start + i].index,
                    width: placed.width,
                    height: row.height,
                    margin_right: if i == last { 0 } else { plan.gap },
                    margin_bottom: plan.gap,
                });
            }
        }
        Self {
            container: ContainerStyle,
            link: LinkStyle,
            items: styles,
        }
    }

    /// Styling for the markup candidate at `item`, if it was laid out.
    pub fn item(&self, item: usize) -> Option<&ItemStyle> {
        self.items.iter().find(|style| style.item == item)
    }
}
