// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the controller and the platform.

use draggable_coords::MapError;
use kurbo::Point;

use crate::input::{PointerId, PointerInput};

/// Platform services a [`DragController`](crate::DragController) needs.
///
/// A host stands for one bound element. The controller never touches the
/// platform directly; everything it does to the element goes through here.
pub trait DragHost {
    /// Handle for document-level listeners held while dragging.
    ///
    /// Dropping the handle must deregister the listeners. Hosts that never use
    /// [`InputSource::MouseGlobal`](crate::InputSource::MouseGlobal) can use `()`.
    type Listeners;

    /// Maps the input's client position into the element's local space.
    ///
    /// Called on every start and move; implementations must not cache geometry.
    fn map_to_local(&self, input: &PointerInput) -> Result<Point, MapError>;

    /// Captures `id` so that its events keep targeting the element.
    fn set_pointer_capture(&mut self, id: PointerId);

    /// Releases a capture taken with [`DragHost::set_pointer_capture`].
    fn release_pointer_capture(&mut self, id: PointerId);

    /// Enables or disables text selection on the element.
    fn set_text_selection(&mut self, enabled: bool);

    /// Adds or removes the element's `dragging` class.
    fn set_dragging_class(&mut self, on: bool);

    /// Registers document-level move/up listeners for the rest of the drag.
    fn listen_document(&mut self) -> Self::Listeners;
}

bitflags::bitflags! {
    /// What the caller should do with the platform event after handling.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventResponse: u8 {
        /// Call `preventDefault()`.
        const PREVENT_DEFAULT  = 1 << 0;
        /// Call `stopPropagation()`.
        const STOP_PROPAGATION = 1 << 1;
    }
}
