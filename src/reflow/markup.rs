//! Gallery markup validation.
//!
//! A gallery container holds item links, each wrapping one image that
//! declares its pixel dimensions. Items that break the structure or lack
//! usable dimensions are skipped with a [`MarkupWarning`]; the rest become
//! [`ImageDescriptor`]s for the layout engine.

use alloc::string::String;
use alloc::vec::Vec;

use crate::descriptor::ImageDescriptor;

/// One gallery-item candidate (a link) as seen in the host document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMarkup {
    /// The link is a direct child of the container.
    pub direct_child: bool,
    /// The first image found inside the link, if any.
    pub image: Option<ImageMarkup>,
}

impl ItemMarkup {
    /// A link directly inside the container, wrapping `image`.
    pub fn direct(image: ImageMarkup) -> Self {
        Self {
            direct_child: true,
            image: Some(image),
        }
    }
}

/// The image inside a gallery item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageMarkup {
    /// The image is a direct child of its link.
    pub direct_child: bool,
    /// Raw `width` attribute.
    pub width: Option<String>,
    /// Raw `height` attribute.
    pub height: Option<String>,
}

impl ImageMarkup {
    /// An image directly inside its link with the given raw attributes.
    pub fn direct(width: &str, height: &str) -> Self {
        Self {
            direct_child: true,
            width: Some(String::from(width)),
            height: Some(String::from(height)),
        }
    }
}

/// Non-fatal problem with one gallery item. The item is left out of the
/// layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkupWarning {
    /// The item link is nested deeper than the container's direct children.
    #[error("gallery item {index} is not a direct child of container")]
    NotDirectChild { index: usize },
    /// The link has no image, or the image is not its direct child.
    #[error("gallery item {index} missing direct img child")]
    MissingImage { index: usize },
    /// The image lacks positive integer `width`/`height` attributes.
    #[error("image {index} missing valid width/height attributes")]
    InvalidDimensions { index: usize },
}

impl MarkupWarning {
    /// Position of the offending item among the container's candidates.
    pub fn index(&self) -> usize {
        match *self {
            Self::NotDirectChild { index }
            | Self::MissingImage { index }
            | Self::InvalidDimensions { index } => index,
        }
    }
}

/// An item that passed validation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ValidItem {
    /// Position among the container's item candidates.
    pub index: usize,
    /// Parsed declared width.
    pub width: u32,
    /// Parsed declared height.
    pub height: u32,
    /// Aspect ratio for the layout engine.
    pub descriptor: ImageDescriptor,
}

/// Result of validating a container's items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Validation {
    /// Items usable for layout, in document order.
    pub items: Vec<ValidItem>,
    /// One warning per skipped item.
    pub warnings: Vec<MarkupWarning>,
}

impl Validation {
    /// Descriptors of the valid items, in order.
    pub fn descriptors(&self) -> Vec<ImageDescriptor> {
        self.items.iter().map(|item| item.descriptor).collect()
    }
}

/// Validate every candidate and collect the usable ones.
pub fn validate(items: &[ItemMarkup]) -> Validation {
    let mut out = Validation::default();
    for (index, item) in items.iter().enumerate() {
        match validate_item(index, item) {
            Ok(valid) => out.items.push(valid),
            Err(warning) => out.warnings.push(warning),
        }
    }
    out
}

fn validate_item(index: usize, item: &ItemMarkup) -> Result<ValidItem, MarkupWarning> {
    if !item.direct_child {
        return Err(MarkupWarning::NotDirectChild { index });
    }
    let image = match &item.image {
        Some(image) if image.direct_child => image,
        _ => return Err(MarkupWarning::MissingImage { index }),
    };

    let dimension = |attr: &Option<String>| {
        attr.as_deref()
            .and_then(parse_dimension)
            .ok_or(MarkupWarning::InvalidDimensions { index })
    };
    let width = dimension(&image.width)?;
    let height = dimension(&image.height)?;
    let descriptor = ImageDescriptor::from_dimensions(width, height)
        .map_err(|_| MarkupWarning::InvalidDimensions { index })?;

    Ok(ValidItem {
        index,
        width,
        height,
        descriptor,
    })
}

/// Parse a dimension attribute leniently, the way HTML integer attributes
/// are read by browsers' script `parseInt`.
///
/// Leading whitespace and an optional sign are accepted, a `0x` prefix
/// switches to hexadecimal, and digits are consumed up to the first
/// non-digit (`"300px"` → 300, `"1.5"` → 1). Returns `None` unless the
/// result is a positive value that fits in `u32`.
pub fn parse_dimension(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: u64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        any = true;
        value = value.saturating_mul(radix as u64).saturating_add(d as u64);
    }

    if !any || negative || value == 0 {
        return None;
    }
    u32::try_from(value).ok()
}
