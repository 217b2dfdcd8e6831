// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry queries a host answers for the coordinate mapper.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Affine, Rect, Size};

/// Live geometry of the surfaces a host knows about.
///
/// Every method is a fresh query. Implementations backed by a real layout
/// engine (for example the DOM) should read current values on each call
/// rather than caching them.
pub trait SurfaceGeometry<N> {
    /// Transform from `node`'s local coordinates to client coordinates.
    ///
    /// For an SVG node this is the screen CTM of its owning `<svg>` element
    /// (or of an explicit ancestor), which folds in `viewBox`, size and any
    /// ancestor group transforms.
    fn screen_transform(&self, node: &N) -> Option<Affine>;

    /// Bounding rectangle of `node` in client coordinates.
    fn client_rect(&self, node: &N) -> Option<Rect>;

    /// Native pixel size of `node`'s backing store (raster surfaces only).
    fn backing_size(&self, node: &N) -> Option<Size>;
}

#[derive(Clone, Debug)]
struct Entry<N> {
    parent: Option<N>,
    local: Affine,
    client_rect: Option<Rect>,
    backing_size: Option<Size>,
}

/// In-memory [`SurfaceGeometry`] for headless hosts and tests.
///
/// Nodes form a tree through their parent links. A node's screen transform is
/// the product of its ancestors' local transforms and its own, so moving or
/// scaling a parent is seen by every descendant on the next query.
#[derive(Clone, Debug, Default)]
pub struct StaticGeometry<N>
where
    N: Copy + Eq + Hash,
{
    entries: HashMap<N, Entry<N>>,
}

impl<N> StaticGeometry<N>
where
    N: Copy + Eq + Hash,
{
    /// Creates an empty geometry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts or replaces `node` with a local transform relative to `parent`.
    ///
    /// Client rect and backing size of an existing entry are preserved.
    pub fn insert(&mut self, node: N, parent: Option<N>, local: Affine) {
        let entry = self.entries.entry(node).or_insert(Entry {
            parent,
            local,
            client_rect: None,
            backing_size: None,
        });
        entry.parent = parent;
        entry.local = local;
    }

    /// Sets the local transform of an existing node.
    ///
    /// Returns `false` if the node is unknown.
    pub fn set_local_transform(&mut self, node: N, local: Affine) -> bool {
        match self.entries.get_mut(&node) {
            Some(entry) => {
                entry.local = local;
                true
            }
            None => false,
        }
    }

    /// Sets the client rect of an existing node. Returns `false` if unknown.
    pub fn set_client_rect(&mut self, node: N, rect: Rect) -> bool {
        match self.entries.get_mut(&node) {
            Some(entry) => {
                entry.client_rect = Some(rect);
                true
            }
            None => false,
        }
    }

    /// Sets the backing store size of an existing node. Returns `false` if unknown.
    pub fn set_backing_size(&mut self, node: N, size: Size) -> bool {
        match self.entries.get_mut(&node) {
            Some(entry) => {
                entry.backing_size = Some(size);
                true
            }
            None => false,
        }
    }

    /// Removes `node`. Children keep their parent link and stop resolving.
    pub fn remove(&mut self, node: &N) {
        self.entries.remove(node);
    }

    /// Returns `true` if `node` is known.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }
}

impl<N> SurfaceGeometry<N> for StaticGeometry<N>
where
    N: Copy + Eq + Hash,
{
    fn screen_transform(&self, node: &N) -> Option<Affine> {
        let mut entry = self.entries.get(node)?;
        let mut xf = entry.local;
        // Bounded by the number of entries so a parent cycle cannot spin forever.
        for _ in 0..self.entries.len() {
            let Some(parent) = entry.parent else {
                return Some(xf);
            };
            entry = self.entries.get(&parent)?;
            xf = entry.local * xf;
        }
        None
    }

    fn client_rect(&self, node: &N) -> Option<Rect> {
        self.entries.get(node)?.client_rect
    }

    fn backing_size(&self, node: &N) -> Option<Size> {
        self.entries.get(node)?.backing_size
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Size};

    use super::{StaticGeometry, SurfaceGeometry};

    #[test]
    fn root_transform_is_its_local_transform() {
        let mut g = StaticGeometry::new();
        g.insert(1, None, Affine::translate((5.0, 6.0)));
        assert_eq!(g.screen_transform(&1), Some(Affine::translate((5.0, 6.0))));
    }

    #[test]
    fn nested_transforms_compose_parent_first() {
        let mut g = StaticGeometry::new();
        g.insert(1, None, Affine::translate((100.0, 0.0)));
        g.insert(2, Some(1), Affine::scale(2.0));

        let xf = g.screen_transform(&2).unwrap();
        assert_eq!(xf * Point::new(1.0, 1.0), Point::new(102.0, 2.0));
    }

    #[test]
    fn moving_a_parent_is_seen_by_children() {
        let mut g = StaticGeometry::new();
        g.insert(1, None, Affine::IDENTITY);
        g.insert(2, Some(1), Affine::IDENTITY);
        assert!(g.set_local_transform(1, Affine::translate((0.0, 40.0))));

        let xf = g.screen_transform(&2).unwrap();
        assert_eq!(xf * Point::ZERO, Point::new(0.0, 40.0));
    }

    #[test]
    fn missing_parent_does_not_resolve() {
        let mut g = StaticGeometry::new();
        g.insert(2, Some(1), Affine::IDENTITY);
        assert_eq!(g.screen_transform(&2), None);
    }

    #[test]
    fn parent_cycle_does_not_resolve() {
        let mut g = StaticGeometry::new();
        g.insert(1, Some(2), Affine::IDENTITY);
        g.insert(2, Some(1), Affine::IDENTITY);
        assert_eq!(g.screen_transform(&1), None);
    }

    #[test]
    fn reinsert_keeps_rect_and_backing_size() {
        let mut g = StaticGeometry::new();
        g.insert(7, None, Affine::IDENTITY);
        assert!(g.set_client_rect(7, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(g.set_backing_size(7, Size::new(20.0, 20.0)));
        g.insert(7, None, Affine::scale(3.0));

        assert_eq!(g.client_rect(&7), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(g.backing_size(&7), Some(Size::new(20.0, 20.0)));
    }

    #[test]
    fn setters_on_unknown_node_report_false() {
        let mut g: StaticGeometry<u32> = StaticGeometry::new();
        assert!(!g.set_local_transform(1, Affine::IDENTITY));
        assert!(!g.set_client_rect(1, Rect::ZERO));
        assert!(!g.set_backing_size(1, Size::ZERO));
    }
}
