//! Per-container pass decisions, retries, resets, and resize handling.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::{debug, error, info, warn};

use crate::descriptor::{LayoutConfig, LayoutError};
use crate::plan::plan;

use super::markup::validate;
use super::registry::{GalleryOptions, Registration, Registry};
use super::style::GalleryStyle;
use super::throttle::{Signal, Throttle};
use super::Document;

/// What the controller knows about one container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContainerState {
    /// A plan is currently applied.
    pub processed: bool,
    /// Bumped whenever the container is unmarked or a pass starts. A retry
    /// scheduled under an older generation is stale.
    pub generation: u64,
}

/// Result of one layout pass over one container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PassOutcome {
    /// Already processed and not forced; nothing was touched.
    Skipped,
    /// Container had no usable width; a retry is queued for the next frame.
    Deferred,
    /// No item passed validation; the container is left unstyled.
    Empty,
    /// A plan was computed and applied.
    Applied {
        /// Rows in the plan.
        rows: usize,
        /// Images laid out.
        images: usize,
    },
}

/// Tally of pass outcomes across containers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReflowSummary {
    /// Containers that received a fresh plan.
    pub applied: usize,
    /// Containers queued for a next-frame retry.
    pub deferred: usize,
    /// Containers with no valid images.
    pub empty: usize,
    /// Containers already processed.
    pub skipped: usize,
    /// Containers whose pass returned an error.
    pub failed: usize,
}

impl ReflowSummary {
    fn record(&mut self, outcome: Result<PassOutcome, LayoutError>) {
        match outcome {
            Ok(PassOutcome::Skipped) => self.skipped += 1,
            Ok(PassOutcome::Deferred) => self.deferred += 1,
            Ok(PassOutcome::Empty) => self.empty += 1,
            Ok(PassOutcome::Applied { .. }) => self.applied += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Containers visited.
    pub fn total(&self) -> usize {
        self.applied + self.deferred + self.empty + self.skipped + self.failed
    }
}

#[derive(Clone, Debug)]
struct Retry<C> {
    container: C,
    generation: u64,
    config: LayoutConfig,
}

/// Gallery reflow controller.
///
/// Owns the registrations and the defaults they are resolved against,
/// per-container state, pending zero-width retries, and the resize throttle. Every mutating call takes `&mut self`, so passes
/// over one container never interleave. Dropping the controller tears all of
/// it down; several controllers can coexist.
#[derive(Clone, Debug)]
pub struct Reflow<C> {
    registry: Registry,
    defaults: Registration,
    states: BTreeMap<C, ContainerState>,
    retries: Vec<Retry<C>>,
    resize: Throttle,
    listening: bool,
}

impl<C: Clone + Ord + Debug> Default for Reflow<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone + Ord + Debug> Reflow<C> {
    /// Controller with the default resize throttle.
    pub fn new() -> Self {
        Self::with_resize_delay(super::throttle::RESIZE_THROTTLE_MS)
    }

    /// Controller reacting to resize at most once per `delay_ms`.
    pub fn with_resize_delay(delay_ms: u64) -> Self {
        Self {
            registry: Registry::new(),
            defaults: Registration::default(),
            states: BTreeMap::new(),
            retries: Vec::new(),
            resize: Throttle::new(delay_ms),
            listening: false,
        }
    }

    /// Current registrations.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Selector and config that fill fields left unset by
    /// [`init`](Self::init).
    pub fn defaults(&self) -> &Registration {
        &self.defaults
    }

    /// Replace the defaults used by later [`init`](Self::init) calls.
    /// Existing registrations keep the config they were resolved with.
    pub fn set_defaults(&mut self, defaults: Registration) -> Result<(), LayoutError> {
        defaults.config.validate()?;
        self.defaults = defaults;
        Ok(())
    }

    /// State of `container`, if the controller has seen it.
    pub fn state(&self, container: &C) -> Option<ContainerState> {
        self.states.get(container).copied()
    }

    /// Whether a plan is currently applied to `container`.
    pub fn is_processed(&self, container: &C) -> bool {
        self.states.get(container).is_some_and(|s| s.processed)
    }

    /// Number of zero-width retries waiting for [`on_frame`](Self::on_frame).
    pub fn pending_retries(&self) -> usize {
        self.retries.len()
    }

    /// When a throttled resize refresh is due, if one is pending. The host
    /// should call [`poll`](Self::poll) at or after this time.
    pub fn resize_deadline(&self) -> Option<u64> {
        self.resize.deadline()
    }

    /// Whether resize signals are being handled. Starts after the first
    /// [`init`](Self::init) that finds a container.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Register `options`, resolved against [`defaults`](Self::defaults)
    /// and replacing any config for the same selector, then lay out every
    /// matching container that is not already processed.
    ///
    /// A full [`Registration`] converts into options with every field set.
    pub fn init<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        options: impl Into<GalleryOptions>,
    ) -> Result<ReflowSummary, LayoutError> {
        let registration = options.into().resolve(&self.defaults);
        let selector = registration.selector.clone();
        let config = registration.config;
        self.registry.register(registration)?;

        let mut summary = ReflowSummary::default();
        let containers = doc.query(&selector);
        if containers.is_empty() {
            warn!(selector = %selector, "no containers found");
            return Ok(summary);
        }

        for container in &containers {
            summary.record(self.pass(doc, container, &config, false));
        }

        if !self.listening {
            self.listening = true;
            debug!("handling resize signals");
        }

        info!(selector = %selector, galleries = containers.len(), "initialized galleries");
        Ok(summary)
    }

    /// Run one layout pass over `container`.
    ///
    /// Skips containers already processed unless `force` is set. Clears
    /// existing styling before a fresh pass. A container narrower than one
    /// pixel is not planned; a retry is queued for the next frame instead.
    pub fn process<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        container: &C,
        config: &LayoutConfig,
        force: bool,
    ) -> Result<PassOutcome, LayoutError> {
        let state = self.states.entry(container.clone()).or_default();
        if state.processed && !force {
            return Ok(PassOutcome::Skipped);
        }
        if force {
            doc.clear(container);
        }
        state.processed = false;
        state.generation += 1;
        let generation = state.generation;

        // `as` truncates and saturates: NaN and anything under a pixel become 0.
        let width = doc.measure_width(container) as u32;
        if width == 0 {
            warn!(container = ?container, "container has zero width, retrying next frame");
            self.retries.push(Retry {
                container: container.clone(),
                generation,
                config: *config,
            });
            return Ok(PassOutcome::Deferred);
        }

        let validation = validate(&doc.items(container));
        for warning in &validation.warnings {
            warn!(container = ?container, index = warning.index(), "{warning}");
        }
        if validation.items.is_empty() {
            warn!(container = ?container, "no valid images found");
            return Ok(PassOutcome::Empty);
        }

        let gallery = plan(&validation.descriptors(), width, config)?;
        let style = GalleryStyle::from_plan(&gallery, &validation.items);
        doc.apply(container, &style);

        if let Some(state) = self.states.get_mut(container) {
            state.processed = true;
        }
        Ok(PassOutcome::Applied {
            rows: gallery.len(),
            images: gallery.image_count(),
        })
    }

    /// Force a fresh layout of one processed container using the first
    /// registration that matches it. Unprocessed containers are skipped.
    pub fn reset<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        container: &C,
    ) -> Result<PassOutcome, LayoutError> {
        if !self.is_processed(container) {
            return Ok(PassOutcome::Skipped);
        }
        doc.clear(container);
        self.unmark(container);

        let Some(config) = self.registry.find_for(&*doc, container).map(|r| r.config) else {
            debug!(container = ?container, "no registration matches, left unstyled");
            return Ok(PassOutcome::Skipped);
        };
        self.pass(doc, container, &config, true)
    }

    /// Clear every registered container, then lay all of them out again.
    pub fn reset_all<D: Document<Container = C>>(&mut self, doc: &mut D) -> ReflowSummary {
        let registrations: Vec<Registration> = self.registry.iter().cloned().collect();
        for registration in &registrations {
            for container in doc.query(&registration.selector) {
                doc.clear(&container);
                self.unmark(&container);
            }
        }

        let mut summary = ReflowSummary::default();
        for registration in &registrations {
            for container in doc.query(&registration.selector) {
                summary.record(self.pass(doc, &container, &registration.config, false));
            }
        }
        summary
    }

    /// Immediately re-plan every registered container with a freshly
    /// measured width, regardless of processed state.
    pub fn refresh_all<D: Document<Container = C>>(&mut self, doc: &mut D) -> ReflowSummary {
        let mut summary = ReflowSummary::default();
        if self.registry.is_empty() {
            warn!("no gallery configs available for refresh");
            return summary;
        }

        let registrations: Vec<Registration> = self.registry.iter().cloned().collect();
        for registration in &registrations {
            for container in doc.query(&registration.selector) {
                doc.clear(&container);
                self.unmark(&container);
                summary.record(self.pass(doc, &container, &registration.config, true));
            }
        }

        info!(
            refreshed = summary.total(),
            configs = registrations.len(),
            "refreshed galleries"
        );
        summary
    }

    /// Handle a window resize signal at `now_ms`.
    ///
    /// Refreshes every gallery immediately if the throttle window has
    /// passed, otherwise schedules one trailing refresh (see
    /// [`resize_deadline`](Self::resize_deadline)). Ignored until a gallery
    /// has been initialized.
    pub fn on_resize<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        now_ms: u64,
    ) -> Option<ReflowSummary> {
        if !self.listening || self.registry.is_empty() {
            return None;
        }
        match self.resize.signal(now_ms) {
            Signal::Fire => Some(self.refresh_all(doc)),
            Signal::Deferred { at } => {
                debug!(at, "resize refresh deferred");
                None
            }
        }
    }

    /// Run the trailing resize refresh if it is due at `now_ms`.
    pub fn poll<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        now_ms: u64,
    ) -> Option<ReflowSummary> {
        if !self.resize.poll(now_ms) || self.registry.is_empty() {
            return None;
        }
        Some(self.refresh_all(doc))
    }

    /// Run the zero-width retries queued before this frame.
    ///
    /// Each retry checks the container's state now: if the container was
    /// reset, refreshed, or re-processed since the retry was queued, the
    /// retry is dropped. Retries queued while this runs wait for the next
    /// frame.
    pub fn on_frame<D: Document<Container = C>>(&mut self, doc: &mut D) -> ReflowSummary {
        let mut summary = ReflowSummary::default();
        for retry in core::mem::take(&mut self.retries) {
            let current = self.states.get(&retry.container).map(|s| s.generation);
            if current != Some(retry.generation) {
                debug!(container = ?retry.container, "dropping stale retry");
                continue;
            }
            self.unmark(&retry.container);
            summary.record(self.pass(doc, &retry.container, &retry.config, true));
        }
        summary
    }

    /// Forget everything known about `container`, including pending
    /// retries. Use when the container leaves the document.
    pub fn forget(&mut self, container: &C) -> Option<ContainerState> {
        self.retries.retain(|retry| retry.container != *container);
        self.states.remove(container)
    }

    fn unmark(&mut self, container: &C) {
        let state = self.states.entry(container.clone()).or_default();
        state.processed = false;
        state.generation += 1;
    }

    fn pass<D: Document<Container = C>>(
        &mut self,
        doc: &mut D,
        container: &C,
        config: &LayoutConfig,
        force: bool,
    ) -> Result<PassOutcome, LayoutError> {
        let outcome = self.process(doc, container, config, force);
        if let Err(e) = &outcome {
            error!(container = ?container, error = %e, "layout pass failed");
        }
        outcome
    }
}
