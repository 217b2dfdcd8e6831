// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Point, Rect, Size};

use crate::geometry::SurfaceGeometry;

/// How a surface's local coordinates relate to client coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Vector graphics: invert the surface's screen transform.
    #[default]
    Vector,
    /// Raster canvas: scale the offset inside the client rect by the backing size.
    Raster,
    /// Page-positioned element: local coordinates are client coordinates.
    Client,
}

/// Reasons a client point could not be mapped into a surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    /// The host has no geometry for the node (detached, or wrong kind).
    MissingGeometry,
    /// The screen transform has a zero (or non-finite) determinant.
    NonInvertible,
    /// The client rect has zero width or height.
    EmptySurface,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGeometry => f.write_str("no geometry available for the target surface"),
            Self::NonInvertible => f.write_str("surface transform is not invertible"),
            Self::EmptySurface => f.write_str("surface has an empty client rect"),
        }
    }
}

impl core::error::Error for MapError {}

/// Maps a client point through the inverse of a local → client transform.
pub fn client_to_vector(screen_transform: Affine, client: Point) -> Result<Point, MapError> {
    let det = screen_transform.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(MapError::NonInvertible);
    }
    Ok(screen_transform.inverse() * client)
}

/// Maps a client point into the backing pixels of a raster surface.
///
/// Assumes no transform on the surface beyond its CSS box: the offset inside
/// `client_rect` is scaled by `backing / client_rect.size()`.
pub fn client_to_raster(client_rect: Rect, backing: Size, client: Point) -> Result<Point, MapError> {
    let width = client_rect.width();
    let height = client_rect.height();
    if width <= 0.0 || height <= 0.0 {
        return Err(MapError::EmptySurface);
    }
    Ok(Point::new(
        (client.x - client_rect.x0) / width * backing.width,
        (client.y - client_rect.y0) / height * backing.height,
    ))
}

/// Converts event client coordinates into a target surface's local space.
///
/// The mapper holds only *how* to map: the surface kind and, optionally, an
/// explicit reference node. Geometry is queried from a [`SurfaceGeometry`]
/// on every call.
///
/// When the draggable element sits inside a parent with its own transform,
/// pass that parent as the reference so positions are expressed in the
/// parent's space (the space the element's own translation is applied in).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordinateMapper<N> {
    kind: SurfaceKind,
    reference: Option<N>,
}

impl<N> CoordinateMapper<N> {
    /// Creates a mapper that maps into the event's bound target.
    #[must_use]
    pub fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            reference: None,
        }
    }

    /// Creates a mapper that always maps into `reference`'s space.
    #[must_use]
    pub fn with_reference(kind: SurfaceKind, reference: N) -> Self {
        Self {
            kind,
            reference: Some(reference),
        }
    }

    /// Returns the surface kind.
    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Returns the explicit reference node, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&N> {
        self.reference.as_ref()
    }

    /// Maps `client` into local coordinates of the reference node, or of
    /// `target` when no reference was configured.
    pub fn map<G>(&self, geometry: &G, target: &N, client: Point) -> Result<Point, MapError>
    where
        G: SurfaceGeometry<N> + ?Sized,
    {
        let node = self.reference.as_ref().unwrap_or(target);
        match self.kind {
            SurfaceKind::Client => Ok(client),
            SurfaceKind::Vector => {
                let xf = geometry
                    .screen_transform(node)
                    .ok_or(MapError::MissingGeometry)?;
                client_to_vector(xf, client)
            }
            SurfaceKind::Raster => {
                let rect = geometry
                    .client_rect(node)
                    .ok_or(MapError::MissingGeometry)?;
                let backing = geometry
                    .backing_size(node)
                    .ok_or(MapError::MissingGeometry)?;
                client_to_raster(rect, backing, client)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Size};

    use super::{CoordinateMapper, MapError, SurfaceKind, client_to_raster, client_to_vector};
    use crate::geometry::StaticGeometry;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn vector_inverts_viewbox_scaling() {
        // 600x40 viewBox centered on the origin, shown at 1200x80 from (10, 20).
        let xf = Affine::translate((10.0, 20.0)) * Affine::scale(2.0) * Affine::translate((300.0, 20.0));
        let local = client_to_vector(xf, Point::new(630.0, 70.0)).unwrap();
        assert!(close(local, Point::new(10.0, 5.0)), "got {local:?}");
    }

    #[test]
    fn vector_rejects_singular_transform() {
        let xf = Affine::scale_non_uniform(0.0, 1.0);
        assert_eq!(
            client_to_vector(xf, Point::ZERO),
            Err(MapError::NonInvertible)
        );
    }

    #[test]
    fn raster_scales_by_backing_store() {
        // 660x100 canvas displayed at 330x50, offset by (100, 200).
        let rect = Rect::new(100.0, 200.0, 430.0, 250.0);
        let local = client_to_raster(rect, Size::new(660.0, 100.0), Point::new(130.0, 210.0)).unwrap();
        assert!(close(local, Point::new(60.0, 20.0)), "got {local:?}");
    }

    #[test]
    fn raster_rejects_empty_rect() {
        let rect = Rect::new(5.0, 5.0, 5.0, 30.0);
        assert_eq!(
            client_to_raster(rect, Size::new(10.0, 10.0), Point::ZERO),
            Err(MapError::EmptySurface)
        );
    }

    #[test]
    fn client_surface_is_identity() {
        let g: StaticGeometry<u32> = StaticGeometry::new();
        let mapper = CoordinateMapper::new(SurfaceKind::Client);
        assert_eq!(mapper.map(&g, &1, Point::new(3.0, 4.0)), Ok(Point::new(3.0, 4.0)));
    }

    #[test]
    fn missing_target_geometry_is_reported() {
        let g: StaticGeometry<u32> = StaticGeometry::new();
        let mapper = CoordinateMapper::new(SurfaceKind::Vector);
        assert_eq!(mapper.map(&g, &1, Point::ZERO), Err(MapError::MissingGeometry));

        let mapper = CoordinateMapper::new(SurfaceKind::Raster);
        assert_eq!(mapper.map(&g, &1, Point::ZERO), Err(MapError::MissingGeometry));
    }

    #[test]
    fn explicit_reference_overrides_event_target() {
        let mut g = StaticGeometry::new();
        // Group 1 is translated; handle 2 inside it is further translated by its own position.
        g.insert(1, None, Affine::translate((100.0, 100.0)));
        g.insert(2, Some(1), Affine::translate((30.0, 0.0)));

        let by_target = CoordinateMapper::new(SurfaceKind::Vector);
        let by_parent = CoordinateMapper::with_reference(SurfaceKind::Vector, 1);
        let client = Point::new(140.0, 100.0);

        assert!(close(by_target.map(&g, &2, client).unwrap(), Point::new(10.0, 0.0)));
        assert!(close(by_parent.map(&g, &2, client).unwrap(), Point::new(40.0, 0.0)));
    }

    #[test]
    fn geometry_is_requeried_on_every_call() {
        let mut g = StaticGeometry::new();
        g.insert(1, None, Affine::IDENTITY);
        let mapper = CoordinateMapper::new(SurfaceKind::Vector);
        let client = Point::new(50.0, 50.0);
        assert!(close(mapper.map(&g, &1, client).unwrap(), client));

        // Simulate a responsive resize between two events.
        g.set_local_transform(1, Affine::scale(0.5));
        assert!(close(mapper.map(&g, &1, client).unwrap(), Point::new(100.0, 100.0)));
    }
}
