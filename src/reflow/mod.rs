//! Reflow control: deciding when to lay out a gallery and applying the result.
//!
//! The layout engine is pure; this module is the stateful adapter around it.
//! It validates gallery markup, turns a [`GalleryPlan`](crate::GalleryPlan)
//! into inline styling, retries containers that have no width yet, throttles
//! resize signals, and keeps the selector → config registrations.
//!
//! The host document is abstracted behind [`Document`], so the controller
//! runs the same against a browser binding, a native toolkit, or a test
//! double. Timestamps are supplied by the caller in milliseconds.
//!
//! # Example
//!
//! ```
//! use zenjustify::LayoutConfig;
//! use zenjustify::reflow::{
//!     Document, GalleryStyle, ImageMarkup, ItemMarkup, Reflow, Registration,
//! };
//!
//! /// One container, 600px wide, holding two 3:2 images.
//! #[derive(Default)]
//! struct Page {
//!     applied: Option<GalleryStyle>,
//! }
//!
//! impl Document for Page {
//!     type Container = u32;
//!
//!     fn query(&self, selector: &str) -> Vec<u32> {
//!         if selector == ".gallery" { vec![0] } else { vec![] }
//!     }
//!     fn matches(&self, _: &u32, selector: &str) -> bool {
//!         selector == ".gallery"
//!     }
//!     fn measure_width(&self, _: &u32) -> f64 {
//!         600.0
//!     }
//!     fn items(&self, _: &u32) -> Vec<ItemMarkup> {
//!         vec![ItemMarkup::direct(ImageMarkup::direct("300", "200")); 2]
//!     }
//!     fn apply(&mut self, _: &u32, style: &GalleryStyle) {
//!         self.applied = Some(style.clone());
//!     }
//!     fn clear(&mut self, _: &u32) {
//!         self.applied = None;
//!     }
//! }
//!
//! let mut page = Page::default();
//! let mut reflow = Reflow::new();
//! let summary = reflow
//!     .init(&mut page, Registration::new(".gallery", LayoutConfig::new(200.0).gap(0)))
//!     .unwrap();
//!
//! assert_eq!(summary.applied, 1);
//! let style = page.applied.unwrap();
//! assert_eq!(style.items[0].width, 300);
//! assert_eq!(style.items[0].height, 200);
//! ```

mod controller;
pub mod markup;
mod registry;
pub mod style;
pub mod throttle;

pub use controller::{ContainerState, PassOutcome, Reflow, ReflowSummary};
pub use markup::{ImageMarkup, ItemMarkup, MarkupWarning, ValidItem, Validation, validate};
pub use registry::{DEFAULT_SELECTOR, GalleryOptions, Registration, Registry};
pub use style::{ContainerStyle, GalleryStyle, ItemStyle, LinkStyle};
pub use throttle::{RESIZE_THROTTLE_MS, Signal, Throttle};

use alloc::vec::Vec;
use core::fmt::Debug;

/// The host document a gallery lives in.
///
/// Implementations answer queries about containers and write styling back.
/// `apply` followed by `clear` must restore the container's original look.
pub trait Document {
    /// Handle to one gallery container. Used as a map key by the controller.
    type Container: Clone + Ord + Debug;

    /// All containers matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<Self::Container>;

    /// Whether `container` matches `selector`.
    fn matches(&self, container: &Self::Container, selector: &str) -> bool;

    /// Current rendered width of `container` in CSS pixels. May be zero or
    /// negative before the container is laid out.
    fn measure_width(&self, container: &Self::Container) -> f64;

    /// Gallery-item candidates inside `container`, in document order.
    fn items(&self, container: &Self::Container) -> Vec<ItemMarkup>;

    /// Write computed styling to `container` and its items.
    fn apply(&mut self, container: &Self::Container, style: &GalleryStyle);

    /// Remove all styling previously written by [`apply`](Self::apply).
    fn clear(&mut self, container: &Self::Container);
}
