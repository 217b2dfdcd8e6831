// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable Coords: map client (page) coordinates into a surface's local space.
//!
//! Pointer, mouse and touch events report positions in client space. A
//! draggable element usually wants them in its own coordinate space instead:
//!
//! - A **vector** surface (an SVG node) has a screen transform that maps its
//!   local units to client pixels, including the `viewBox`, responsive
//!   resizing and any ancestor group transforms. Local coordinates are the
//!   client point pushed through the inverse of that transform.
//! - A **raster** surface (a canvas) has a backing store whose pixel size can
//!   differ from its displayed CSS size. Local coordinates are the offset
//!   inside the bounding client rectangle, scaled by the backing size.
//! - A **client** surface (an absolutely positioned element) uses client
//!   coordinates directly.
//!
//! The geometry needed for each mapping is answered by a host through the
//! [`SurfaceGeometry`] trait. [`CoordinateMapper`] never caches it: scale and
//! position change between events (resize, scroll, zoom), so every call
//! queries the host again.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point};
//! use draggable_coords::{CoordinateMapper, StaticGeometry, SurfaceKind};
//!
//! // An SVG scaled 2x and translated to (100, 50) on the page.
//! let mut geometry = StaticGeometry::new();
//! geometry.insert(1_u32, None, Affine::translate((100.0, 50.0)) * Affine::scale(2.0));
//!
//! let mapper = CoordinateMapper::new(SurfaceKind::Vector);
//! let local = mapper.map(&geometry, &1, Point::new(120.0, 70.0)).unwrap();
//! assert_eq!(local, Point::new(10.0, 10.0));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod geometry;
mod mapper;

pub use geometry::{StaticGeometry, SurfaceGeometry};
pub use mapper::{CoordinateMapper, MapError, SurfaceKind, client_to_raster, client_to_vector};
