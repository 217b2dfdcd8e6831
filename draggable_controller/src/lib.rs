// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable Controller: a configurable drag state machine for one element.
//!
//! A [`DragController`] turns a stream of pointer, mouse or touch events into
//! position updates for a single draggable element. It has two states, idle
//! and dragging; the dragging state is represented by a [`DragSession`].
//!
//! Every browser-compatibility behavior is an independent toggle on
//! [`OptionSet`]:
//!
//! | Field | Effect when enabled |
//! |---|---|
//! | `left_button_only` | start requires the primary button |
//! | `ignore_ctrl` | start is rejected while ctrl is held |
//! | `stop_propagation` | start/move ask the caller to stop propagation |
//! | `offset_tracking` | keep the start offset instead of snapping to the pointer |
//! | `pointer_capture` | capture the pointer on start, release on end (pointer events only) |
//! | `pointer_id_tracking` | only the starting pointer can move or end the drag |
//! | `suppress_text_selection` | disable text selection while dragging |
//! | `suppress_scroll` | prevent default on `touchstart` |
//! | `suppress_native_drag` | prevent default on `dragstart` |
//! | `suppress_context_menu` | prevent default on `contextmenu` |
//! | `chord_checking` | end the drag when a move no longer holds the starting button |
//! | `dragging_class` | toggle a `dragging` class while dragging |
//!
//! The platform is reached only through the [`DragHost`] trait: mapping
//! client coordinates into the element's space (see `draggable_coords`),
//! pointer capture, styles, and scoped document listeners. Device-specific
//! events are normalized into a [`PointerInput`] by [`RawEvent::normalize`]
//! before reaching the controller.
//!
//! The position is held in a [`Position`], which clamps into its [`Bounds`]
//! on every write.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to `kurbo` and `tracing`.
//! - `libm`: `no_std` float support through `kurbo`.
//! - `serde`: (de)serialize [`OptionSet`] and [`InputSource`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod bounds;
mod controller;
mod host;
mod input;
mod options;
mod session;

pub use bounds::{Bounds, BoundsError, Position};
pub use controller::{DragController, EndReason, EventRole, Handled, Transition};
pub use host::{DragHost, EventResponse};
pub use input::{
    Button, Buttons, DragEvent, EventType, EventTypes, Modifiers, MouseLike, PointerId,
    PointerInput, PointerKind, PointerLike, RawEvent, TouchPoint,
};
pub use options::{InputSource, OptionSet, ParseOptionsError};
pub use session::DragSession;
