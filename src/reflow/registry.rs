//! Selector → layout config registrations.

use alloc::string::String;
use alloc::vec::Vec;

use crate::descriptor::{LayoutConfig, LayoutError};

use super::Document;

/// Selector used when neither the caller nor the controller defaults name one.
pub const DEFAULT_SELECTOR: &str = ".jgs-gallery";

/// Layout config for every container matching one selector.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    /// Selector identifying the gallery containers.
    pub selector: String,
    /// Layout config applied to them.
    pub config: LayoutConfig,
}

impl Registration {
    /// Registration for `selector` with `config`.
    pub fn new(selector: impl Into<String>, config: LayoutConfig) -> Self {
        Self {
            selector: selector.into(),
            config,
        }
    }
}

impl Default for Registration {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTOR, LayoutConfig::default())
    }
}

/// A registration with any field left open.
///
/// Unset fields are filled from a full [`Registration`] of defaults when the
/// controller resolves it, so callers only spell out what differs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryOptions {
    /// Container selector.
    pub selector: Option<String>,
    /// Target row height.
    pub row_height: Option<f64>,
    /// Gap between items and rows.
    pub gap: Option<u32>,
}

impl GalleryOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container selector.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the target row height.
    pub fn row_height(mut self, row_height: f64) -> Self {
        self.row_height = Some(row_height);
        self
    }

    /// Set the gap.
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Full registration, taking unset fields from `defaults`.
    pub fn resolve(self, defaults: &Registration) -> Registration {
        Registration {
            selector: self.selector.unwrap_or_else(|| defaults.selector.clone()),
            config: LayoutConfig {
                row_height: self.row_height.unwrap_or(defaults.config.row_height),
                gap: self.gap.unwrap_or(defaults.config.gap),
            },
        }
    }
}

impl From<Registration> for GalleryOptions {
    fn from(registration: Registration) -> Self {
        Self {
            selector: Some(registration.selector),
            row_height: Some(registration.config.row_height),
            gap: Some(registration.config.gap),
        }
    }
}

/// Ordered set of registrations, unique by selector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration, replacing any existing one for the same selector
    /// in place. Returns the previous config if one was replaced.
    pub fn register(
        &mut self,
        registration: Registration,
    ) -> Result<Option<LayoutConfig>, LayoutError> {
        registration.config.validate()?;
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.selector == registration.selector)
        {
            Some(entry) => Ok(Some(core::mem::replace(
                &mut entry.config,
                registration.config,
            ))),
            None => {
                self.entries.push(registration);
                Ok(None)
            }
        }
    }

    /// Config registered for exactly `selector`.
    pub fn get(&self, selector: &str) -> Option<&LayoutConfig> {
        self.entries
            .iter()
            .find(|entry| entry.selector == selector)
            .map(|entry| &entry.config)
    }

    /// First registration, in registration order, whose selector matches
    /// `container`.
    pub fn find_for<D: Document>(
        &self,
        doc: &D,
        container: &D::Container,
    ) -> Option<&Registration> {
        self.entries
            .iter()
            .find(|entry| doc.matches(container, &entry.selector))
    }

    /// Registrations in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, Registration> {
        self.entries.iter()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Registration;
    type IntoIter = core::slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
