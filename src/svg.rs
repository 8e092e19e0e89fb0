//! SVG visualization of a gallery plan.
//!
//! Draws the container outline with every placed image as a rectangle,
//! labelled with its pixel size, and a caption per row with its height.
//! Useful for eyeballing packing decisions and for documentation.
//!
//! # Example
//!
//! ```
//! use zenjustify::{ImageDescriptor, LayoutConfig, plan, svg::render_gallery_svg};
//!
//! let images: Vec<_> = [(1600, 900), (800, 1200), (1000, 1000), (1920, 1080)]
//!     .iter()
//!     .map(|&(w, h)| ImageDescriptor::from_dimensions(w, h).unwrap())
//!     .collect();
//! let gallery = plan(&images, 900, &LayoutConfig::new(240.0).gap(8)).unwrap();
//!
//! let svg = render_gallery_svg(&gallery);
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::plan::GalleryPlan;

/// Maximum pixel width of the drawn container; wider plans are scaled down.
const MAX_PANEL_W: f64 = 800.0;
/// Horizontal margin.
const MARGIN_X: f64 = 40.0;
/// Top margin, also used below the drawing.
const MARGIN_TOP: f64 = 30.0;
/// Height of the title text area above the container.
const LABEL_H: f64 = 22.0;
/// Width reserved left of the container for row captions.
const CAPTION_W: f64 = 70.0;

/// Render a complete SVG document showing every row and image of `plan`.
pub fn render_gallery_svg(plan: &GalleryPlan) -> String {
    if plan.container_width == 0 {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let scale = (MAX_PANEL_W / plan.container_width as f64).min(1.0);
    let panel_w = plan.container_width as f64 * scale;
    let panel_h = plan.content_height() as f64 * scale;
    let panel_x = MARGIN_X + CAPTION_W;
    let panel_y = MARGIN_TOP + LABEL_H;
    let total_w = panel_x + panel_w + MARGIN_X;
    let total_h = panel_y + panel_h + MARGIN_TOP;

    let mut svg = String::with_capacity(1024 + plan.image_count() * 256);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .size { font-size: 10px; fill: #fff; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##);

    let title = format!(
        "Gallery  {}px wide, {} rows, {} images, gap {}",
        plan.container_width,
        plan.len(),
        plan.image_count(),
        plan.gap
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label">{}</text>"#,
        panel_x,
        MARGIN_TOP + 14.0,
        escape_xml(&title)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outer" rx="2"/>"#,
        panel_x, panel_y, panel_w, panel_h
    ));
    svg.push('\n');

    for (i, row) in plan.rows.iter().enumerate() {
        let ry = panel_y + row.top as f64 * scale;
        let rh = row.height as f64 * scale;

        svg.push_str(&format!(
            r#"<text x="{}" y="{:.1}" class="annotation">{}</text>"#,
            MARGIN_X,
            ry + rh / 2.0 + 4.0,
            escape_xml(&format!("row {i}  h={}", row.height))
        ));
        svg.push('\n');

        for item in &row.items {
            let ix = panel_x + item.x as f64 * scale;
            let iw = item.width as f64 * scale;
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
                ix, ry, iw, rh
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="size">{}</text>"#,
                ix + 4.0,
                ry + 14.0,
                escape_xml(&format!("{}×{}", item.width, row.height))
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
