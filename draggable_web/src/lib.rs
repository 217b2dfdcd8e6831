// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for draggable diagrams.
//!
//! When targeting `wasm32`, this crate provides:
//!
//! - `DomGeometry`: live DOM answers for the coordinate mapper (an SVG
//!   element's screen CTM, bounding client rects, canvas backing sizes).
//! - `WebHost`: the drag host for one element (pointer capture, inline
//!   `user-select`, the `dragging` class, the cursor, and document listeners
//!   that are removed as soon as the drag ends).
//! - `attach` / `attach_page`: listener wiring for one element or for every
//!   figure of a page; the returned `AttachedDiagram` removes its listeners
//!   when dropped.
//! - `attach_tutorial_page`: the demonstration page's diagrams with their
//!   draw callbacks.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn start() -> Result<(), draggable_web::WebError> {
//!     let diagrams = draggable_web::attach_tutorial_page()?;
//!     // Keep the diagrams alive for the page's lifetime.
//!     core::mem::forget(diagrams);
//!     Ok(())
//! }
//! ```
//!
//! On other targets the crate is empty.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod attach;
#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod geometry;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod tutorial;

#[cfg(target_arch = "wasm32")]
pub use attach::{AttachedDiagram, DomPage, attach, attach_page};
#[cfg(target_arch = "wasm32")]
pub use error::WebError;
#[cfg(target_arch = "wasm32")]
pub use geometry::DomGeometry;
#[cfg(target_arch = "wasm32")]
pub use host::{DocumentListeners, WebHost};
#[cfg(target_arch = "wasm32")]
pub use tutorial::attach_tutorial_page;
