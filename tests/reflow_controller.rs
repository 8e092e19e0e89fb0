//! Reflow controller behavior against an in-memory document.

#![cfg(feature = "reflow")]

use std::collections::BTreeMap;

use zenjustify::LayoutConfig;
use zenjustify::reflow::{
    DEFAULT_SELECTOR, Document, GalleryOptions, GalleryStyle, ImageMarkup, ItemMarkup,
    PassOutcome, Reflow, Registration,
};

// ---- Test document ----

#[derive(Clone, Debug)]
struct Container {
    classes: Vec<&'static str>,
    width: f64,
    items: Vec<ItemMarkup>,
}

/// A page of gallery containers. Tracks applied styling and how often it
/// was written or cleared.
#[derive(Default)]
struct Page {
    containers: Vec<Container>,
    styles: BTreeMap<usize, GalleryStyle>,
    applies: usize,
    clears: usize,
}

impl Page {
    fn add(&mut self, class: &'static str, width: f64, dims: &[(u32, u32)]) -> usize {
        self.add_with_classes(&[class], width, dims)
    }

    fn add_with_classes(
        &mut self,
        classes: &[&'static str],
        width: f64,
        dims: &[(u32, u32)],
    ) -> usize {
        self.containers.push(Container {
            classes: classes.to_vec(),
            width,
            items: dims
                .iter()
                .map(|(w, h)| {
                    ItemMarkup::direct(ImageMarkup::direct(&w.to_string(), &h.to_string()))
                })
                .collect(),
        });
        self.containers.len() - 1
    }

    fn style(&self, id: usize) -> Option<&GalleryStyle> {
        self.styles.get(&id)
    }

    fn widths(&self, id: usize) -> Vec<u32> {
        self.styles[&id].items.iter().map(|s| s.width).collect()
    }
}

impl Document for Page {
    type Container = usize;

    fn query(&self, selector: &str) -> Vec<usize> {
        let class = selector.trim_start_matches('.');
        (0..self.containers.len())
            .filter(|&i| self.containers[i].classes.iter().any(|c| *c == class))
            .collect()
    }

    fn matches(&self, container: &usize, selector: &str) -> bool {
        let class = selector.trim_start_matches('.');
        self.containers[*container].classes.iter().any(|c| *c == class)
    }

    fn measure_width(&self, container: &usize) -> f64 {
        self.containers[*container].width
    }

    fn items(&self, container: &usize) -> Vec<ItemMarkup> {
        self.containers[*container].items.clone()
    }

    fn apply(&mut self, container: &usize, style: &GalleryStyle) {
        self.applies += 1;
        self.styles.insert(*container, style.clone());
    }

    fn clear(&mut self, container: &usize) {
        self.clears += 1;
        self.styles.remove(container);
    }
}

fn squares(n: usize) -> Vec<(u32, u32)> {
    vec![(100, 100); n]
}

fn config(row_height: f64, gap: u32) -> LayoutConfig {
    LayoutConfig::new(row_height).gap(gap)
}

// ---- init ----

#[test]
fn init_lays_out_matching_containers() {
    let mut page = Page::default();
    let a = page.add("gallery", 300.0, &squares(3));
    let b = page.add("gallery", 208.0, &squares(2));
    let other = page.add("other", 300.0, &squares(2));

    let mut reflow = Reflow::new();
    let summary = reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();

    assert_eq!(summary.applied, 2);
    assert!(reflow.is_processed(&a));
    assert!(reflow.is_processed(&b));
    assert!(!reflow.is_processed(&other));
    assert!(page.style(other).is_none());
    assert_eq!(page.widths(a), [100, 100, 100]);
    assert!(reflow.is_listening());
}

#[test]
fn init_skips_processed_containers() {
    let mut page = Page::default();
    page.add("gallery", 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    let again = reflow
        .init(&mut page, Registration::new(".gallery", config(50.0, 0)))
        .unwrap();

    assert_eq!(again.skipped, 1);
    assert_eq!(page.applies, 1);
    // The registration was still replaced.
    assert_eq!(reflow.registry().len(), 1);
    assert_eq!(reflow.registry().get(".gallery"), Some(&config(50.0, 0)));
}

#[test]
fn init_without_containers_does_not_listen() {
    let mut page = Page::default();
    let mut reflow = Reflow::new();
    let summary = reflow
        .init(&mut page, Registration::new(".missing", LayoutConfig::default()))
        .unwrap();
    assert_eq!(summary.total(), 0);
    assert!(!reflow.is_listening());
    assert_eq!(reflow.registry().len(), 1);
}

#[test]
fn init_rejects_invalid_config() {
    let mut page = Page::default();
    page.add("gallery", 300.0, &squares(1));
    let mut reflow = Reflow::new();
    assert!(
        reflow
            .init(&mut page, Registration::new(".gallery", config(-1.0, 0)))
            .is_err()
    );
    assert!(reflow.registry().is_empty());
    assert_eq!(page.applies, 0);
}

#[test]
fn init_fills_unset_options_from_defaults() {
    let mut page = Page::default();
    let id = page.add(DEFAULT_SELECTOR.trim_start_matches('.'), 300.0, &squares(3));

    let mut reflow = Reflow::new();
    assert_eq!(reflow.defaults(), &Registration::default());
    reflow
        .set_defaults(Registration::new(DEFAULT_SELECTOR, config(100.0, 0)))
        .unwrap();
    let summary = reflow.init(&mut page, GalleryOptions::new()).unwrap();

    assert_eq!(summary.applied, 1);
    assert_eq!(page.widths(id), [100, 100, 100]);
    assert_eq!(reflow.registry().get(DEFAULT_SELECTOR), Some(&config(100.0, 0)));
}

#[test]
fn changed_defaults_change_later_inits() {
    let mut page = Page::default();
    let a = page.add("a", 300.0, &squares(3));
    let b = page.add("b", 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow.set_defaults(Registration::new(".a", config(100.0, 0))).unwrap();
    reflow.init(&mut page, GalleryOptions::new()).unwrap();
    assert_eq!(page.widths(a), [100, 100, 100]);

    // Only the selector is given; the new 300px default row height applies.
    reflow.set_defaults(Registration::new(".a", config(300.0, 0))).unwrap();
    reflow
        .init(&mut page, GalleryOptions::new().selector(".b"))
        .unwrap();
    assert_eq!(page.widths(b), [300, 300, 300]);
    assert_eq!(page.style(b).unwrap().items.len(), 3);
    assert_eq!(page.style(b).unwrap().items[0].height, 300);
    // The earlier registration kept its resolved config.
    assert_eq!(reflow.registry().get(".a"), Some(&config(100.0, 0)));
}

#[test]
fn partial_options_override_defaults() {
    let mut page = Page::default();
    let id = page.add("gallery", 304.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .set_defaults(Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    reflow.init(&mut page, GalleryOptions::new().gap(2)).unwrap();
    assert_eq!(page.widths(id), [100, 100, 100]);
    assert_eq!(page.style(id).unwrap().items[0].margin_right, 2);
}

#[test]
fn invalid_defaults_rejected() {
    let mut reflow: Reflow<usize> = Reflow::new();
    assert!(reflow.set_defaults(Registration::new(".g", config(0.0, 0))).is_err());
    assert_eq!(reflow.defaults(), &Registration::default());
}

// ---- markup and styling ----

#[test]
fn invalid_items_are_left_out() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.0, &squares(2));
    page.containers[id].items.insert(
        1,
        ItemMarkup {
            direct_child: true,
            image: None,
        },
    );

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();

    let style = page.style(id).unwrap();
    let items: Vec<usize> = style.items.iter().map(|s| s.item).collect();
    assert_eq!(items, [0, 2]);
}

#[test]
fn container_without_valid_images_is_left_alone() {
    let mut page = Page::default();
    let empty = page.add("gallery", 300.0, &[]);
    let full = page.add("gallery", 300.0, &squares(1));

    let mut reflow = Reflow::new();
    let summary = reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();

    assert_eq!(summary.empty, 1);
    assert_eq!(summary.applied, 1);
    assert!(page.style(empty).is_none());
    assert!(!reflow.is_processed(&empty));
    assert!(reflow.is_processed(&full));
}

#[test]
fn fractional_width_is_floored() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.9, &squares(3));
    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(page.widths(id).iter().sum::<u32>(), 300);
}

#[test]
fn reapplying_unchanged_inputs_is_identical() {
    let mut page = Page::default();
    let id = page.add("gallery", 777.0, &[(1600, 900), (800, 1200), (1000, 1000), (640, 480)]);
    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(180.0, 6)))
        .unwrap();
    let first = page.style(id).unwrap().clone();

    reflow.refresh_all(&mut page);
    assert_eq!(page.style(id), Some(&first));
    reflow.reset(&mut page, &id).unwrap();
    assert_eq!(page.style(id), Some(&first));
}

// ---- zero-width retry ----

#[test]
fn zero_width_defers_until_next_frame() {
    let mut page = Page::default();
    let id = page.add("gallery", 0.0, &squares(3));

    let mut reflow = Reflow::new();
    let summary = reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(summary.deferred, 1);
    assert_eq!(reflow.pending_retries(), 1);
    assert!(page.style(id).is_none());

    // Still hidden: the retry re-queues itself.
    let frame = reflow.on_frame(&mut page);
    assert_eq!(frame.deferred, 1);
    assert_eq!(reflow.pending_retries(), 1);

    page.containers[id].width = 300.0;
    let frame = reflow.on_frame(&mut page);
    assert_eq!(frame.applied, 1);
    assert_eq!(reflow.pending_retries(), 0);
    assert!(reflow.is_processed(&id));
    assert_eq!(page.widths(id), [100, 100, 100]);
}

#[test]
fn negative_and_subpixel_widths_defer() {
    let mut page = Page::default();
    page.add("gallery", -10.0, &squares(1));
    page.add("gallery", 0.5, &squares(1));
    page.add("gallery", f64::NAN, &squares(1));
    let mut reflow = Reflow::new();
    let summary = reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(summary.deferred, 3);
    assert_eq!(page.applies, 0);
}

#[test]
fn stale_retry_is_dropped() {
    let mut page = Page::default();
    let id = page.add("gallery", 0.0, &squares(2));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(reflow.pending_retries(), 1);

    // The container becomes visible and a refresh lays it out before the
    // retry fires.
    page.containers[id].width = 200.0;
    let refreshed = reflow.refresh_all(&mut page);
    assert_eq!(refreshed.applied, 1);
    let applies = page.applies;

    let frame = reflow.on_frame(&mut page);
    assert_eq!(frame.total(), 0);
    assert_eq!(page.applies, applies);
    assert!(reflow.is_processed(&id));
}

#[test]
fn repeated_deferral_keeps_one_live_retry() {
    let mut page = Page::default();
    let id = page.add("gallery", 0.0, &squares(2));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    reflow.refresh_all(&mut page);
    reflow.refresh_all(&mut page);
    assert_eq!(reflow.pending_retries(), 3);

    page.containers[id].width = 200.0;
    let frame = reflow.on_frame(&mut page);
    // Only the newest retry is live.
    assert_eq!(frame.applied, 1);
    assert_eq!(frame.total(), 1);
    assert_eq!(page.applies, 1);
}

#[test]
fn forget_drops_state_and_retries() {
    let mut page = Page::default();
    let id = page.add("gallery", 0.0, &squares(2));
    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert!(reflow.forget(&id).is_some());
    assert_eq!(reflow.pending_retries(), 0);
    assert_eq!(reflow.state(&id), None);
}

// ---- reset ----

#[test]
fn reset_forces_fresh_plan_with_matching_config() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(page.widths(id), [100, 100, 100]);

    page.containers[id].width = 250.0;
    let outcome = reflow.reset(&mut page, &id).unwrap();
    assert_eq!(outcome, PassOutcome::Applied { rows: 2, images: 3 });
    assert_eq!(page.widths(id), [125, 125, 250]);
}

#[test]
fn reset_ignores_unprocessed_container() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.0, &squares(3));
    let mut reflow: Reflow<usize> = Reflow::new();
    assert_eq!(reflow.reset(&mut page, &id), Ok(PassOutcome::Skipped));
    assert_eq!(page.clears, 0);
}

#[test]
fn reset_uses_first_matching_registration() {
    let mut page = Page::default();
    let id = page.add_with_classes(&["a", "b"], 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".b", config(300.0, 0)))
        .unwrap();
    reflow
        .init(&mut page, Registration::new(".a", config(100.0, 0)))
        .unwrap();
    // Laid out once, by ".b": one square per 300px row.
    assert_eq!(page.widths(id), [300, 300, 300]);

    let outcome = reflow.reset(&mut page, &id).unwrap();
    assert_eq!(outcome, PassOutcome::Applied { rows: 3, images: 3 });
    assert_eq!(page.widths(id), [300, 300, 300]);
}

#[test]
fn reset_without_matching_registration_leaves_container_cleared() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    page.containers[id].classes = vec!["other"];

    assert_eq!(reflow.reset(&mut page, &id), Ok(PassOutcome::Skipped));
    assert!(page.style(id).is_none());
    assert_eq!(page.clears, 1);
    assert!(!reflow.is_processed(&id));
}

#[test]
fn reset_all_lays_out_overlap_with_first_registration() {
    let mut page = Page::default();
    let id = page.add_with_classes(&["a", "b"], 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".a", config(100.0, 0)))
        .unwrap();
    reflow
        .init(&mut page, Registration::new(".b", config(300.0, 0)))
        .unwrap();

    let applies = page.applies;
    let summary = reflow.reset_all(&mut page);
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(page.applies, applies + 1);
    assert_eq!(page.widths(id), [100, 100, 100]);
}

#[test]
fn reset_all_relays_every_registration() {
    let mut page = Page::default();
    let a = page.add("a", 300.0, &squares(3));
    let b = page.add("b", 300.0, &squares(3));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".a", config(100.0, 0)))
        .unwrap();
    reflow
        .init(&mut page, Registration::new(".b", config(300.0, 0)))
        .unwrap();
    assert_eq!(page.widths(b), [300, 300, 300]);

    page.containers[a].width = 600.0;
    page.containers[b].width = 600.0;
    let summary = reflow.reset_all(&mut page);
    assert_eq!(summary.applied, 2);
    assert_eq!(page.widths(a), [200, 200, 200]);
    // 300px target rows: two squares per row at 600px.
    assert_eq!(page.widths(b), [300, 300, 600]);
}

// ---- resize ----

#[test]
fn resize_ignored_before_init() {
    let mut page = Page::default();
    page.add("gallery", 300.0, &squares(1));
    let mut reflow: Reflow<usize> = Reflow::new();
    assert_eq!(reflow.on_resize(&mut page, 1_000), None);
    assert_eq!(page.applies, 0);
}

#[test]
fn resize_burst_refreshes_leading_and_trailing() {
    let mut page = Page::default();
    let id = page.add("gallery", 300.0, &squares(3));

    let mut reflow = Reflow::with_resize_delay(250);
    reflow
        .init(&mut page, Registration::new(".gallery", config(100.0, 0)))
        .unwrap();
    assert_eq!(page.applies, 1);

    page.containers[id].width = 200.0;
    let leading = reflow.on_resize(&mut page, 10_000).unwrap();
    assert_eq!(leading.applied, 1);
    assert_eq!(page.widths(id), [100, 100, 200]);

    for (now, width) in [(10_050, 400.0), (10_120, 150.0), (10_200, 250.0)] {
        page.containers[id].width = width;
        assert_eq!(reflow.on_resize(&mut page, now), None);
    }
    assert_eq!(reflow.resize_deadline(), Some(10_250));
    assert_eq!(reflow.poll(&mut page, 10_249), None);
    assert_eq!(page.applies, 2);

    let trailing = reflow.poll(&mut page, 10_250).unwrap();
    assert_eq!(trailing.applied, 1);
    assert_eq!(page.applies, 3);
    // The trailing refresh saw the last width of the burst.
    assert_eq!(page.widths(id), [125, 125, 250]);
    assert_eq!(reflow.resize_deadline(), None);
}

#[test]
fn resize_reprocesses_with_each_registration_config() {
    let mut page = Page::default();
    let small = page.add("small", 400.0, &squares(4));
    let large = page.add("large", 400.0, &squares(4));

    let mut reflow = Reflow::new();
    reflow
        .init(&mut page, Registration::new(".small", config(100.0, 0)))
        .unwrap();
    reflow
        .init(&mut page, Registration::new(".large", config(200.0, 0)))
        .unwrap();

    page.containers[small].width = 800.0;
    page.containers[large].width = 800.0;
    let summary = reflow.on_resize(&mut page, 5_000).unwrap();
    assert_eq!(summary.applied, 2);
    assert_eq!(page.widths(small), [200, 200, 200, 200]);
    assert_eq!(page.widths(large), [200, 200, 200, 200]);
    assert_eq!(page.style(small).unwrap().items[0].height, 200);
}

#[test]
fn independent_controllers_do_not_share_registrations() {
    let mut page = Page::default();
    page.add("gallery", 300.0, &squares(1));
    let mut first = Reflow::new();
    let second: Reflow<usize> = Reflow::new();
    first
        .init(&mut page, Registration::new(".gallery", LayoutConfig::default()))
        .unwrap();
    assert_eq!(first.registry().len(), 1);
    assert!(second.registry().is_empty());
}
