// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::input::{Button, PointerId};

/// State that exists only while a drag is active.
///
/// `L` is the host's scoped document-listener handle. It is held here so that
/// dropping the session (on any exit from dragging) drops the listeners too.
#[derive(Debug)]
pub struct DragSession<L> {
    pub(crate) offset: Option<Vec2>,
    pub(crate) pointer_id: Option<PointerId>,
    pub(crate) captured: Option<PointerId>,
    pub(crate) button: Button,
    pub(crate) start: Point,
    pub(crate) listeners: Option<L>,
}

impl<L> DragSession<L> {
    /// Position minus pointer at the start, when offset tracking is on.
    #[must_use]
    pub fn offset(&self) -> Option<Vec2> {
        self.offset
    }

    /// Pointer that owns the drag, when pointer-id tracking is on.
    #[must_use]
    pub fn pointer_id(&self) -> Option<PointerId> {
        self.pointer_id
    }

    /// Pointer captured at the start, if capture was taken.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.captured
    }

    /// Button that started the drag.
    #[must_use]
    pub fn button(&self) -> Button {
        self.button
    }

    /// Local pointer position at the start.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns `true` while scoped document listeners are held.
    #[must_use]
    pub fn has_document_listeners(&self) -> bool {
        self.listeners.is_some()
    }

    /// Returns `true` if `id` may drive this session.
    ///
    /// Always true when the session does not track a pointer id.
    pub(crate) fn accepts(&self, id: Option<PointerId>) -> bool {
        self.pointer_id.is_none_or(|own| Some(own) == id)
    }
}
