// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use draggable_controller::{DragHost, EventType, PointerId, PointerInput};
use draggable_coords::{CoordinateMapper, MapError, SurfaceKind};
use draggable_diagram::{ContainerLayout, Cursor, DiagramHost};
use kurbo::{Point, Size};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, EventTarget, HtmlElement, SvgElement};

use crate::geometry::DomGeometry;

/// Document listeners registered for one drag; removed when dropped.
#[derive(Debug)]
pub struct DocumentListeners {
    target: EventTarget,
    registered: Vec<(&'static str, js_sys::Function)>,
}

impl Drop for DocumentListeners {
    fn drop(&mut self) {
        for (name, callback) in &self.registered {
            if let Err(err) = self.target.remove_event_listener_with_callback(name, callback) {
                debug!(name, ?err, "removing document listener failed");
            }
        }
    }
}

/// [`DiagramHost`] for one DOM element.
///
/// SVG elements map into their owner `<svg>`'s user space, canvases into
/// their backing store, everything else stays in client space.
#[derive(Debug)]
pub struct WebHost {
    element: Element,
    mapper: CoordinateMapper<Element>,
    document: EventTarget,
    document_callbacks: Vec<(EventType, js_sys::Function)>,
}

impl WebHost {
    /// Creates a host for `element` with the given surface.
    pub fn new(element: Element, surface: SurfaceKind, document: EventTarget) -> Self {
        let owner = element
            .dyn_ref::<SvgElement>()
            .and_then(SvgElement::owner_svg_element)
            .map(Element::from);
        let mapper = match (surface, owner) {
            (SurfaceKind::Vector, Some(svg)) => CoordinateMapper::with_reference(surface, svg),
            _ => CoordinateMapper::new(surface),
        };
        Self {
            element,
            mapper,
            document,
            document_callbacks: Vec::new(),
        }
    }

    /// The bound element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Sets the callbacks [`DragHost::listen_document`] registers.
    pub(crate) fn set_document_callbacks(&mut self, callbacks: Vec<(EventType, js_sys::Function)>) {
        self.document_callbacks = callbacks;
    }

    /// Adds or removes a class on the element.
    pub(crate) fn set_class(&self, class: &str, on: bool) {
        let list = self.element.class_list();
        let result = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if let Err(err) = result {
            debug!(class, ?err, "class update failed");
        }
    }

    fn style(&self) -> Option<CssStyleDeclaration> {
        if let Some(html) = self.element.dyn_ref::<HtmlElement>() {
            return Some(html.style());
        }
        self.element.dyn_ref::<SvgElement>().map(SvgElement::style)
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(style) = self.style() else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            debug!(property, ?err, "style update failed");
        }
    }
}

impl DragHost for WebHost {
    type Listeners = DocumentListeners;

    fn map_to_local(&self, input: &PointerInput) -> Result<Point, MapError> {
        self.mapper.map(&DomGeometry, &self.element, input.client)
    }

    fn set_pointer_capture(&mut self, id: PointerId) {
        if let Err(err) = self.element.set_pointer_capture(id.0) {
            debug!(pointer = id.0, ?err, "setPointerCapture failed");
        }
    }

    fn release_pointer_capture(&mut self, id: PointerId) {
        if let Err(err) = self.element.release_pointer_capture(id.0) {
            debug!(pointer = id.0, ?err, "releasePointerCapture failed");
        }
    }

    fn set_text_selection(&mut self, enabled: bool) {
        let value = if enabled { "" } else { "none" };
        self.set_style("user-select", value);
        self.set_style("-webkit-user-select", value);
    }

    fn set_dragging_class(&mut self, on: bool) {
        self.set_class("dragging", on);
    }

    fn listen_document(&mut self) -> DocumentListeners {
        let mut registered = Vec::with_capacity(self.document_callbacks.len());
        for (ty, callback) in &self.document_callbacks {
            let name = ty.name();
            match self.document.add_event_listener_with_callback(name, callback) {
                Ok(()) => registered.push((name, callback.clone())),
                Err(err) => debug!(name, ?err, "adding document listener failed"),
            }
        }
        DocumentListeners {
            target: self.document.clone(),
            registered,
        }
    }
}

impl DiagramHost for WebHost {
    fn layout(&self) -> Option<ContainerLayout> {
        let parent = self.element.parent_element()?;
        let size = |e: &Element| {
            let r = e.get_bounding_client_rect();
            Size::new(r.width(), r.height())
        };
        Some(ContainerLayout {
            container: size(&parent),
            element: size(&self.element),
        })
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.set_style("cursor", cursor.css());
    }
}
