// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw callbacks for the demonstration page.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use alloc::{format, vec};
use core::f64::consts::TAU;

use draggable_diagram::presets::{css_left_top, css_translate, scrub_value, transform_attr};
use draggable_diagram::{Binding, DrawState, presets};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::attach::{AttachedDiagram, DomPage, attach_page};
use crate::error::WebError;

type Draw = Box<dyn FnMut(&DrawState)>;

fn context_2d(element: &Element) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let canvas = element.dyn_ref::<HtmlCanvasElement>()?.clone();
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

fn set_transform_attr(element: Element) -> Draw {
    Box::new(move |state: &DrawState| {
        if let Err(err) = element.set_attribute("transform", &transform_attr(state.position)) {
            debug!(?err, "setting transform failed");
        }
    })
}

fn set_style(element: Element, position: fn(&DrawState) -> Vec<(&'static str, String)>) -> Draw {
    Box::new(move |state: &DrawState| {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        for (property, value) in position(state) {
            if let Err(err) = style.set_property(property, &value) {
                debug!(property, ?err, "setting style failed");
            }
        }
    })
}

fn left_top(state: &DrawState) -> Vec<(&'static str, String)> {
    let (left, top) = css_left_top(state.position);
    vec![("left", left), ("top", top)]
}

fn translate(state: &DrawState) -> Vec<(&'static str, String)> {
    vec![("transform", css_translate(state.position))]
}

fn paint_trail(element: &Element) -> Draw {
    let Some((_, ctx)) = context_2d(element) else {
        return Box::new(|_: &DrawState| {});
    };
    Box::new(move |state: &DrawState| {
        if !state.dragging {
            return;
        }
        ctx.set_fill_style_str("hsl(0 50% 50%)");
        ctx.fill_rect(state.position.x - 1.0, state.position.y - 1.0, 3.0, 3.0);
    })
}

fn draw_handle(element: &Element, radius: f64, label: String) -> Draw {
    let Some((canvas, ctx)) = context_2d(element) else {
        return Box::new(|_: &DrawState| {});
    };
    Box::new(move |state: &DrawState| {
        let p = state.position;
        ctx.clear_rect(
            0.0,
            0.0,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );
        ctx.set_fill_style_str(if state.dragging {
            "hsl(200 50% 50%)"
        } else {
            "hsl(0 50% 50%)"
        });
        ctx.set_stroke_style_str("black");
        ctx.begin_path();
        if let Err(err) = ctx.arc(p.x, p.y, radius, 0.0, TAU) {
            debug!(?err, "arc failed");
            return;
        }
        ctx.fill();
        ctx.stroke();
        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font("24px serif");
        if let Err(err) = ctx.fill_text(&label, p.x, p.y + 5.0) {
            debug!(?err, "fill_text failed");
        }
    })
}

fn show_scrub_value(element: Element) -> Draw {
    Box::new(move |state: &DrawState| {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(&format!("{}", scrub_value(state.position.x)));
        }
    })
}

fn draw_for(binding: &Binding<Element, Element>) -> Draw {
    let element = binding.element.clone();
    match binding.index {
        0 | 1 => set_transform_attr(element),
        2 => paint_trail(&element),
        3 => draw_handle(
            &element,
            binding.config.radius().unwrap_or_default(),
            binding.config.label.clone().unwrap_or_default(),
        ),
        5 => set_style(element, translate),
        8 => show_scrub_value(element),
        _ => set_style(element, left_top),
    }
}

/// Attaches the demonstration page's diagrams to the current document.
pub fn attach_tutorial_page() -> Result<Vec<AttachedDiagram>, WebError> {
    attach_page(&DomPage::current()?, presets::tutorial_page(), draw_for)
}
