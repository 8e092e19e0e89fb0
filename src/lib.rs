//! Justified image gallery layout.
//!
//! Packs fixed-aspect-ratio images into rows that fill a container's width
//! exactly, with a fixed gap, while approximating a target row height.
//! The engine is pure geometry, `no_std` + `alloc` compatible.
//!
//! # Modules
//!
//! - [`descriptor`] — Image aspect ratios, layout config, errors
//! - [`pack`] — Greedy row packing
//! - [`distribute`] — Pixel-exact width distribution within a row
//! - [`plan`] — Full gallery plan with per-image offsets
//! - `reflow` — Host-agnostic controller: markup validation, styling,
//!   zero-width retry, resize throttling, registration (feature `reflow`)
//! - `svg` — SVG visualization of a gallery plan (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod descriptor;
pub mod distribute;
pub mod pack;
pub mod plan;

#[cfg(feature = "reflow")]
pub mod reflow;

#[cfg(feature = "svg")]
pub mod svg;

pub use descriptor::{DEFAULT_GAP, DEFAULT_ROW_HEIGHT, ImageDescriptor, LayoutConfig, LayoutError};
pub use distribute::{RowWidths, distribute};
pub use pack::{Row, pack};
pub use plan::{GalleryPlan, PlacedItem, RowPlan, plan};
