// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable Diagram: bind draggable elements to drag controllers.
//!
//! A [`Diagram`] owns one [`DragController`](draggable_controller::DragController)
//! and a draw callback, created from a declarative [`DiagramConfig`]:
//!
//! - which element (a selector inside its figure) and which coordinate
//!   surface it lives in,
//! - a clamping rectangle, either static or [fitted to the container](BoundsRule::FitContainer),
//! - controller options and event family,
//! - an optional round [drag handle](StartGate::Handle) with cursor feedback,
//! - a [capture policy](CapturePolicy), including deferred capture that
//!   lets a plain click on a link inside the element go through.
//!
//! [`bind_all`] pairs a list of configs with the figures of a page, failing
//! loudly if a figure or element is missing. The [`presets`] module holds the
//! demonstration page's diagrams.
//!
//! The platform is reached through [`DiagramHost`]; [`HeadlessHost`] runs
//! diagrams without a browser.
//!
//! ```
//! use draggable_controller::{DragEvent, EventType, PointerInput};
//! use draggable_coords::{CoordinateMapper, StaticGeometry, SurfaceKind};
//! use draggable_diagram::{Diagram, HeadlessHost, presets};
//! use kurbo::{Affine, Point};
//!
//! // An SVG scaled up 2x and shifted by (100, 50) on screen.
//! let mut geometry = StaticGeometry::new();
//! geometry.insert("svg", None, Affine::new([2.0, 0.0, 0.0, 2.0, 100.0, 50.0]));
//! let mut host = HeadlessHost::new(geometry, "svg", CoordinateMapper::new(SurfaceKind::Vector));
//!
//! let mut diagram: Diagram<_> = Diagram::new(presets::svg_circle(), |_| {});
//! let at = |x, y| PointerInput::primary(Point::new(x, y), 1);
//!
//! diagram.handle(&mut host, &DragEvent::new(EventType::PointerDown, at(100.0, 50.0)));
//! diagram.handle(&mut host, &DragEvent::new(EventType::PointerMove, at(140.0, 50.0)));
//! assert_eq!(diagram.position(), Point::new(20.0, 0.0));
//!
//! // Past the track's right end.
//! diagram.handle(&mut host, &DragEvent::new(EventType::PointerMove, at(900.0, 50.0)));
//! assert_eq!(diagram.position(), Point::new(300.0, 0.0));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod diagram;
mod headless;
mod page;
pub mod presets;

pub use config::{BoundsRule, CapturePolicy, DiagramConfig, StartGate};
pub use diagram::{ContainerLayout, Cursor, Diagram, DiagramHost, DrawState};
pub use headless::{DocumentListeners, ElementState, HeadlessHost, StaticPage};
pub use page::{BindError, Binding, ElementLookup, bind_all};
