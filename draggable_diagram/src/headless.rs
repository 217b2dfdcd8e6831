// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host and page without a browser, for tests and non-web embedders.
//!
//! [`HeadlessHost`] keeps the element's observable state (capture, text
//! selection, class, cursor) in plain fields and answers coordinate queries
//! from a [`StaticGeometry`]. [`StaticPage`] answers selector queries from a
//! table.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::hash::Hash;

use draggable_controller::{DragHost, PointerId, PointerInput};
use draggable_coords::{CoordinateMapper, MapError, StaticGeometry};
use hashbrown::HashMap;
use kurbo::Point;

use crate::diagram::{ContainerLayout, Cursor, DiagramHost};
use crate::page::ElementLookup;

/// Observable state of a headless element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementState {
    /// Currently captured pointer.
    pub captured: Option<PointerId>,
    /// Whether text selection is enabled.
    pub text_selection: bool,
    /// Whether the `dragging` class is set.
    pub dragging_class: bool,
    /// Current cursor.
    pub cursor: Cursor,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            captured: None,
            text_selection: true,
            dragging_class: false,
            cursor: Cursor::Default,
        }
    }
}

/// Document listener registration; deregisters when dropped.
#[derive(Debug)]
pub struct DocumentListeners {
    live: Rc<Cell<usize>>,
}

impl Drop for DocumentListeners {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// [`DiagramHost`] for one element of a [`StaticGeometry`] scene.
#[derive(Debug)]
pub struct HeadlessHost<N>
where
    N: Copy + Eq + Hash,
{
    /// Scene geometry; edit it between events to simulate layout changes.
    pub geometry: StaticGeometry<N>,
    /// Container/element sizes reported to fitted bounds.
    pub layout: Option<ContainerLayout>,
    target: N,
    mapper: CoordinateMapper<N>,
    state: ElementState,
    live_listeners: Rc<Cell<usize>>,
}

impl<N> HeadlessHost<N>
where
    N: Copy + Eq + Hash,
{
    /// Creates a host for `target`, mapping with `mapper`.
    #[must_use]
    pub fn new(geometry: StaticGeometry<N>, target: N, mapper: CoordinateMapper<N>) -> Self {
        Self {
            geometry,
            layout: None,
            target,
            mapper,
            state: ElementState::default(),
            live_listeners: Rc::new(Cell::new(0)),
        }
    }

    /// The bound element.
    #[must_use]
    pub fn target(&self) -> N {
        self.target
    }

    /// The element's current observable state.
    #[must_use]
    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Number of document listener registrations still alive.
    #[must_use]
    pub fn live_document_listeners(&self) -> usize {
        self.live_listeners.get()
    }
}

impl<N> DragHost for HeadlessHost<N>
where
    N: Copy + Eq + Hash,
{
    type Listeners = DocumentListeners;

    fn map_to_local(&self, input: &PointerInput) -> Result<Point, MapError> {
        self.mapper.map(&self.geometry, &self.target, input.client)
    }

    fn set_pointer_capture(&mut self, id: PointerId) {
        self.state.captured = Some(id);
    }

    fn release_pointer_capture(&mut self, id: PointerId) {
        if self.state.captured == Some(id) {
            self.state.captured = None;
        }
    }

    fn set_text_selection(&mut self, enabled: bool) {
        self.state.text_selection = enabled;
    }

    fn set_dragging_class(&mut self, on: bool) {
        self.state.dragging_class = on;
    }

    fn listen_document(&mut self) -> DocumentListeners {
        self.live_listeners.set(self.live_listeners.get() + 1);
        DocumentListeners {
            live: self.live_listeners.clone(),
        }
    }
}

impl<N> DiagramHost for HeadlessHost<N>
where
    N: Copy + Eq + Hash,
{
    fn layout(&self) -> Option<ContainerLayout> {
        self.layout
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.state.cursor = cursor;
    }
}

/// An [`ElementLookup`] over a fixed table of figures.
///
/// Figures are indices; each figure maps selectors to elements.
#[derive(Clone, Debug, Default)]
pub struct StaticPage<E> {
    figures: Vec<HashMap<String, E>>,
}

impl<E: Clone> StaticPage<E> {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            figures: Vec::new(),
        }
    }

    /// Appends a figure containing `elements` (selector, element) and returns its index.
    pub fn push_figure<S: Into<String>>(
        &mut self,
        elements: impl IntoIterator<Item = (S, E)>,
    ) -> usize {
        self.figures.push(
            elements
                .into_iter()
                .map(|(selector, element)| (selector.into(), element))
                .collect(),
        );
        self.figures.len() - 1
    }
}

impl<E: Clone> ElementLookup for StaticPage<E> {
    type Figure = usize;
    type Element = E;

    fn figures(&self) -> Vec<usize> {
        (0..self.figures.len()).collect()
    }

    fn query(&self, figure: &usize, selector: &str) -> Option<E> {
        self.figures.get(*figure)?.get(selector).cloned()
    }
}
