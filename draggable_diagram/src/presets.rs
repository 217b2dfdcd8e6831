// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The demonstration page's diagrams, and the formatting their draw callbacks use.
//!
//! [`tutorial_page`] lists the diagrams in figure order; bind it with
//! [`bind_all`](crate::bind_all).

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use draggable_controller::{Bounds, OptionSet};
use draggable_coords::SurfaceKind;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::config::{CapturePolicy, DiagramConfig};

/// Options shared by the presets: the defaults plus button chord checking.
fn chorded() -> OptionSet {
    OptionSet {
        chord_checking: true,
        ..OptionSet::default()
    }
}

/// An SVG element selected by `selector`, dragged along a horizontal track.
fn svg_track(selector: &str) -> DiagramConfig {
    DiagramConfig::new(selector, SurfaceKind::Vector)
        .with_bounds(Bounds::new(-300.0, -20.0, 300.0, 20.0))
        .with_options(OptionSet {
            dragging_class: true,
            ..chorded()
        })
}

/// A `<circle>` inside an SVG.
#[must_use]
pub fn svg_circle() -> DiagramConfig {
    svg_track("svg circle")
}

/// A `<g>` group (shape plus text) inside an SVG.
#[must_use]
pub fn svg_group() -> DiagramConfig {
    svg_track("svg g")
}

/// A canvas painted along the pointer's path; the position snaps to the pointer.
#[must_use]
pub fn canvas_paint() -> DiagramConfig {
    DiagramConfig::new("canvas", SurfaceKind::Raster)
        .with_bounds(Bounds::new(0.0, 0.0, 660.0, 100.0))
        .with_options(OptionSet {
            offset_tracking: false,
            ..chorded()
        })
}

/// A round handle drawn on a canvas; only starts on the handle are accepted.
///
/// Touch scrolling is prevented only over the handle, so the page still
/// scrolls when the canvas is touched elsewhere.
#[must_use]
pub fn canvas_handle() -> DiagramConfig {
    DiagramConfig::new("canvas", SurfaceKind::Raster)
        .with_bounds(Bounds::new(46.0, 46.0, 1000.0 - 46.0, 150.0 - 46.0))
        .with_handle(45.0)
        .with_label("Drag me")
        .with_options(OptionSet {
            pointer_id_tracking: true,
            suppress_scroll: false,
            ..chorded()
        })
}

fn div_in_container() -> DiagramConfig {
    DiagramConfig::new("div.draggable", SurfaceKind::Client)
        .fit_container()
        .with_options(chorded())
}

/// A `<div>` positioned with `left`/`top`.
#[must_use]
pub fn div_positioned() -> DiagramConfig {
    div_in_container()
}

/// A `<div>` moved with a CSS transform.
#[must_use]
pub fn div_transformed() -> DiagramConfig {
    div_in_container()
}

/// A `<div>` containing a link, where dragging wins over following the link.
#[must_use]
pub fn div_link_drag_wins() -> DiagramConfig {
    div_in_container()
}

/// A `<div>` containing a link, where a plain click still follows the link.
#[must_use]
pub fn div_link_click_wins() -> DiagramConfig {
    let config = div_in_container();
    let options = OptionSet {
        pointer_capture: false,
        ..config.options
    };
    config
        .with_options(options)
        .with_capture(CapturePolicy::OnFirstMove)
}

/// A number input whose value is scrubbed by dragging horizontally.
#[must_use]
pub fn scrubbable_number() -> DiagramConfig {
    DiagramConfig::new("#input-scrubbable-number", SurfaceKind::Client)
        .with_bounds(Bounds::new(0.0, 0.0, 1000.0, 0.0))
}

/// All diagrams of the demonstration page, in figure order.
#[must_use]
pub fn tutorial_page() -> Vec<DiagramConfig> {
    vec![
        svg_circle(),
        svg_group(),
        canvas_paint(),
        canvas_handle(),
        div_positioned(),
        div_transformed(),
        div_link_drag_wins(),
        div_link_click_wins(),
        scrubbable_number(),
    ]
}

/// SVG `transform` attribute value placing an element at `p`.
///
/// ```
/// # use draggable_diagram::presets::transform_attr;
/// # use kurbo::Point;
/// assert_eq!(transform_attr(Point::new(10.0, -2.5)), "translate(10, -2.5)");
/// ```
#[must_use]
pub fn transform_attr(p: Point) -> String {
    let p = tidy(p);
    format!("translate({}, {})", p.x, p.y)
}

/// CSS `transform` value placing an element at `p` pixels.
#[must_use]
pub fn css_translate(p: Point) -> String {
    let p = tidy(p);
    format!("translate({}px, {}px)", p.x, p.y)
}

/// CSS `left` and `top` values placing an element at `p` pixels.
#[must_use]
pub fn css_left_top(p: Point) -> (String, String) {
    let p = tidy(p);
    (format!("{}px", p.x), format!("{}px", p.y))
}

/// Value shown by a scrubbable number at horizontal position `x`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "positions are clamped to small bounds before display"
)]
#[must_use]
pub fn scrub_value(x: f64) -> i64 {
    x.round() as i64
}

/// Folds `-0` into `0` so formatted output never shows a negative zero.
fn tidy(p: Point) -> Point {
    Point::new(p.x + 0.0, p.y + 0.0)
}

#[cfg(test)]
mod tests {
    use draggable_coords::SurfaceKind;
    use kurbo::Point;

    use super::*;
    use crate::config::{BoundsRule, StartGate};

    #[test]
    fn page_order_and_surfaces() {
        let page = tutorial_page();
        let selectors: Vec<&str> = page.iter().map(|c| c.selector.as_str()).collect();
        assert_eq!(
            selectors,
            [
                "svg circle",
                "svg g",
                "canvas",
                "canvas",
                "div.draggable",
                "div.draggable",
                "div.draggable",
                "div.draggable",
                "#input-scrubbable-number",
            ]
        );
        assert_eq!(page[0].surface, SurfaceKind::Vector);
        assert_eq!(page[3].surface, SurfaceKind::Raster);
        assert_eq!(page[8].surface, SurfaceKind::Client);
    }

    #[test]
    fn canvas_handle_preset() {
        let config = canvas_handle();
        assert_eq!(config.gate, StartGate::Handle { radius: 45.0 });
        assert!(config.options.pointer_id_tracking);
        assert!(!config.options.suppress_scroll);
        assert!(config.options.chord_checking);
        let BoundsRule::Static(bounds) = config.bounds else {
            panic!("canvas handle has static bounds");
        };
        assert_eq!(bounds.right(), 954.0);
        assert_eq!(bounds.bottom(), 104.0);
    }

    #[test]
    fn link_presets_differ_in_capture() {
        let drag = div_link_drag_wins();
        let click = div_link_click_wins();
        assert!(drag.options.pointer_capture);
        assert_eq!(drag.capture, CapturePolicy::OnStart);
        assert!(!click.options.pointer_capture);
        assert_eq!(click.capture, CapturePolicy::OnFirstMove);
        assert_eq!(click.bounds, BoundsRule::FitContainer);
    }

    #[test]
    fn scrubber_has_default_options() {
        let config = scrubbable_number();
        assert_eq!(config.options, OptionSet::default());
        assert!(!config.options.chord_checking);
    }

    #[test]
    fn formatting() {
        assert_eq!(transform_attr(Point::new(-0.0, 3.0)), "translate(0, 3)");
        assert_eq!(css_translate(Point::new(12.5, 0.0)), "translate(12.5px, 0px)");
        assert_eq!(
            css_left_top(Point::new(4.0, 7.0)),
            (String::from("4px"), String::from("7px"))
        );
        assert_eq!(scrub_value(41.5), 42);
        assert_eq!(scrub_value(999.4), 999);
    }
}
