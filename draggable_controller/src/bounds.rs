// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamping rectangle and the clamped position holder.

use core::fmt;

use kurbo::{Point, Rect, Size};

/// Error returned by [`Bounds::try_new`] for inverted edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsError {
    /// Requested left edge.
    pub left: f64,
    /// Requested top edge.
    pub top: f64,
    /// Requested right edge.
    pub right: f64,
    /// Requested bottom edge.
    pub bottom: f64,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "inverted drag bounds: left {} right {} top {} bottom {}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

impl core::error::Error for BoundsError {}

/// Clamping rectangle for a drag position.
///
/// Always satisfies `left <= right` and `top <= bottom`. Equal edges are
/// allowed and pin that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    /// Bounds that never clamp.
    pub const UNBOUNDED: Self = Self {
        left: f64::NEG_INFINITY,
        top: f64::NEG_INFINITY,
        right: f64::INFINITY,
        bottom: f64::INFINITY,
    };

    /// Creates bounds from edges.
    ///
    /// # Panics
    ///
    /// Panics if `left > right` or `top > bottom` (or an edge is NaN). Inverted
    /// bounds are a configuration bug; use [`Bounds::try_new`] for edges that
    /// come from outside the program.
    #[must_use]
    #[track_caller]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        match Self::try_new(left, top, right, bottom) {
            Ok(bounds) => bounds,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates bounds from edges, rejecting inverted or NaN edges.
    pub fn try_new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, BoundsError> {
        // Written so that NaN fails both comparisons.
        if left <= right && top <= bottom {
            Ok(Self {
                left,
                top,
                right,
                bottom,
            })
        } else {
            Err(BoundsError {
                left,
                top,
                right,
                bottom,
            })
        }
    }

    /// Bounds covering `rect` (which may have been built with swapped corners).
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            left: rect.x0,
            top: rect.y0,
            right: rect.x1,
            bottom: rect.y1,
        }
    }

    /// Bounds keeping an `inner`-sized box fully inside an `outer`-sized container.
    ///
    /// The origin is the container's top-left corner. When the box is larger
    /// than the container along an axis, that axis is pinned at `0`.
    #[must_use]
    pub fn fit_container(outer: Size, inner: Size) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: (outer.width - inner.width).max(0.0),
            bottom: (outer.height - inner.height).max(0.0),
        }
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Returns `true` if `p` lies inside (edges included).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right && self.top <= p.y && p.y <= self.bottom
    }

    /// Clamps `p` into the bounds.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.left, self.right),
            p.y.clamp(self.top, self.bottom),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// A position that is clamped into its bounds on every write.
///
/// The only ways to change the point are [`Position::set`] and
/// [`Position::set_bounds`], both of which clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    point: Point,
    bounds: Bounds,
}

impl Position {
    /// Creates a position, clamping `initial` into `bounds`.
    #[must_use]
    pub fn new(initial: Point, bounds: Bounds) -> Self {
        Self {
            point: bounds.clamp(initial),
            bounds,
        }
    }

    /// Current point.
    #[must_use]
    pub fn get(&self) -> Point {
        self.point
    }

    /// Current bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Writes `p`, clamped. Returns `true` if the stored point changed.
    pub fn set(&mut self, p: Point) -> bool {
        let clamped = self.bounds.clamp(p);
        let changed = clamped != self.point;
        self.point = clamped;
        changed
    }

    /// Replaces the bounds and re-clamps the current point.
    ///
    /// Returns `true` if the stored point changed.
    pub fn set_bounds(&mut self, bounds: Bounds) -> bool {
        self.bounds = bounds;
        let point = self.point;
        self.set(point)
    }
}
