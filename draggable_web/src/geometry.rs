// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use draggable_coords::SurfaceGeometry;
use kurbo::{Affine, Rect, Size};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, SvgGraphicsElement};

/// Live DOM geometry: every query reads layout afresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomGeometry;

impl SurfaceGeometry<Element> for DomGeometry {
    fn screen_transform(&self, node: &Element) -> Option<Affine> {
        let m = node.dyn_ref::<SvgGraphicsElement>()?.get_screen_ctm()?;
        Some(Affine::new([
            f64::from(m.a()),
            f64::from(m.b()),
            f64::from(m.c()),
            f64::from(m.d()),
            f64::from(m.e()),
            f64::from(m.f()),
        ]))
    }

    fn client_rect(&self, node: &Element) -> Option<Rect> {
        let r = node.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn backing_size(&self, node: &Element) -> Option<Size> {
        let canvas = node.dyn_ref::<HtmlCanvasElement>()?;
        Some(Size::new(
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        ))
    }
}
