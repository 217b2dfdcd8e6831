// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use draggable_controller::{DragEvent, EventResponse, EventType, OptionSet};
use draggable_diagram::{Binding, Diagram, DiagramConfig, DrawState, ElementLookup, bind_all};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget};

use crate::error::WebError;
use crate::events::{apply, raw_events};
use crate::host::{DocumentListeners, WebHost};

type Callback = Closure<dyn FnMut(Event)>;

struct Attached {
    diagram: Diagram<DocumentListeners>,
    host: WebHost,
}

type Owner = Weak<RefCell<Attached>>;

/// An event listener on a DOM target; removed when dropped.
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Callback,
}

impl Listener {
    fn add(target: &EventTarget, name: &'static str, callback: Callback) -> Result<Self, WebError> {
        // Non-passive, so touch handlers may cancel scrolling.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| WebError::js("addEventListener", &err))?;
        Ok(Self {
            target: target.clone(),
            name,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(self.name, callback) {
            debug!(name = self.name, ?err, "removing listener failed");
        }
    }
}

/// A diagram wired to its element.
///
/// Dropping it ends any active drag and removes every listener.
pub struct AttachedDiagram {
    shared: Rc<RefCell<Attached>>,
    listeners: Vec<Listener>,
    // Registered on the document by the host while a drag lasts.
    document_callbacks: Vec<Callback>,
}

impl fmt::Debug for AttachedDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedDiagram")
            .field("listeners", &self.listeners.len())
            .field("document_callbacks", &self.document_callbacks.len())
            .finish_non_exhaustive()
    }
}

impl AttachedDiagram {
    /// Moves the diagram back to its initial position.
    pub fn reset(&self) {
        if let Ok(mut attached) = self.shared.try_borrow_mut() {
            attached.diagram.reset();
        }
    }

    /// Returns `true` while the diagram is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.shared
            .try_borrow()
            .is_ok_and(|attached| attached.diagram.is_dragging())
    }

    /// Adds a listener on `target` that resets the diagram on `click`.
    pub fn reset_on_click(&mut self, target: &EventTarget) -> Result<(), WebError> {
        let owner = Rc::downgrade(&self.shared);
        let callback = Callback::new(move |_: Event| {
            if let Some(shared) = owner.upgrade() {
                if let Ok(mut attached) = shared.try_borrow_mut() {
                    attached.diagram.reset();
                }
            }
        });
        self.listeners.push(Listener::add(target, "click", callback)?);
        Ok(())
    }
}

impl Drop for AttachedDiagram {
    fn drop(&mut self) {
        if let Ok(mut attached) = self.shared.try_borrow_mut() {
            let Attached { diagram, host } = &mut *attached;
            diagram.cancel(host);
        }
    }
}

fn dispatch(owner: &Owner, ty: EventType, event: &Event) {
    let Some(shared) = owner.upgrade() else {
        return;
    };
    let Ok(mut attached) = shared.try_borrow_mut() else {
        trace!(ty = ty.name(), "reentrant event dropped");
        return;
    };
    let Attached { diagram, host } = &mut *attached;
    match ty {
        EventType::GotPointerCapture => host.set_class("captured", true),
        EventType::LostPointerCapture => host.set_class("captured", false),
        _ => {}
    }
    let mut response = EventResponse::empty();
    for raw in raw_events(ty, event) {
        response |= diagram.handle(host, &DragEvent::from_raw(ty, &raw)).response;
    }
    apply(event, response);
}

fn callback(owner: &Owner, ty: EventType) -> Callback {
    let owner = owner.clone();
    Callback::new(move |event: Event| dispatch(&owner, ty, &event))
}

/// Wires `element` to a new diagram built from `config`.
///
/// The diagram draws once immediately.
pub fn attach(
    element: Element,
    config: DiagramConfig,
    draw: impl FnMut(&DrawState) + 'static,
) -> Result<AttachedDiagram, WebError> {
    let document = element.owner_document().ok_or(WebError::NoDocument)?;
    let types = config.subscriptions();
    let source = config.source;
    let host = WebHost::new(element.clone(), config.surface, document.into());
    let shared = Rc::new(RefCell::new(Attached {
        diagram: Diagram::new(config, draw),
        host,
    }));
    let owner = Rc::downgrade(&shared);

    let document_types: Vec<EventType> = OptionSet::document_subscriptions(source).types().collect();
    let document_callbacks: Vec<Callback> =
        document_types.iter().map(|&ty| callback(&owner, ty)).collect();
    shared.borrow_mut().host.set_document_callbacks(
        document_types
            .iter()
            .zip(&document_callbacks)
            .map(|(&ty, cb)| (ty, cb.as_ref().unchecked_ref::<js_sys::Function>().clone()))
            .collect(),
    );

    let mut attached = AttachedDiagram {
        shared,
        listeners: Vec::new(),
        document_callbacks,
    };
    for ty in types.types() {
        attached
            .listeners
            .push(Listener::add(&element, ty.name(), callback(&owner, ty))?);
    }
    debug!(events = attached.listeners.len(), "diagram attached");
    Ok(attached)
}

/// The figures of a document and the elements inside them.
#[derive(Clone, Debug)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// Looks up figures in `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Looks up figures in the current window's document.
    pub fn current() -> Result<Self, WebError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(WebError::NoDocument)?;
        Ok(Self::new(document))
    }
}

impl ElementLookup for DomPage {
    type Figure = Element;
    type Element = Element;

    fn figures(&self) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all("figure") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query(&self, figure: &Element, selector: &str) -> Option<Element> {
        figure.query_selector(selector).ok().flatten()
    }
}

/// Binds `configs` to the page's figures and attaches each diagram.
///
/// `draw_for` builds each diagram's draw callback. A `<button>` inside a
/// figure resets its diagram.
pub fn attach_page(
    page: &DomPage,
    configs: impl IntoIterator<Item = DiagramConfig>,
    mut draw_for: impl FnMut(&Binding<Element, Element>) -> Box<dyn FnMut(&DrawState)>,
) -> Result<Vec<AttachedDiagram>, WebError> {
    let bindings = bind_all(page, configs)?;
    let mut attached = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let draw = draw_for(&binding);
        let mut diagram = attach(binding.element, binding.config, draw)?;
        if let Some(button) = page.query(&binding.figure, "button") {
            diagram.reset_on_click(&button)?;
        }
        attached.push(diagram);
    }
    Ok(attached)
}
