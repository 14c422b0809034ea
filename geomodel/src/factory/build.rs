//! Geometry constructors of [`GeometryFactory`].
//!
//! Every constructor copies the given coordinates, pads or truncates each vertex to the axis
//! count of the factory and rounds every value onto the factory's grid.

use std::convert::Infallible;
use std::sync::Arc;

use super::GeometryFactory;
use crate::bounding_box::BoundingBox;
use crate::collection::{
    GeometryCollection, GeometryPart, Multi, MultiLineString, MultiPoint, MultiPolygon,
};
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, GeometryOps};
use crate::geometry_type::GeometryKind;
use crate::line_string::{LineString, LineStringOps};
use crate::linear_ring::LinearRing;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::services::{CoordinatesOperation, GeometryReader, ProjectionService};

impl GeometryFactory {
    /// Copies a flat coordinate array with `source_axis_count` values per vertex into the
    /// layout and precision of this factory.
    fn copy_coordinates(&self, source_axis_count: usize, coordinates: &[f64]) -> Vec<f64> {
        let vertex_count = coordinates.len() / source_axis_count;
        let mut copy = Vec::with_capacity(vertex_count * self.axis_count);
        for vertex in coordinates.chunks_exact(source_axis_count) {
            for axis in 0..self.axis_count {
                let value = vertex.get(axis).copied().unwrap_or(f64::NAN);
                copy.push(self.make_precise(axis, value));
            }
        }
        copy
    }

    fn check_coordinates(axis_count: usize, coordinates: &[f64]) -> Result<()> {
        if axis_count < 2 || coordinates.len() % axis_count != 0 {
            Err(GeometryError::Coordinates {
                axis_count,
                len: coordinates.len(),
            })
        } else {
            Ok(())
        }
    }

    fn points_coordinates(&self, points: &[Point]) -> Vec<f64> {
        points
            .iter()
            .filter(|point| !point.is_empty())
            .flat_map(|point| self.copy_coordinates(point.axis_count(), point.coordinates()))
            .collect()
    }

    /// Point with the given values for X, Y and the further axes.
    ///
    /// Fewer than two values give the empty point. Missing axes are NaN, extra values are
    /// dropped.
    pub fn point(self: &Arc<Self>, coordinates: &[f64]) -> Point {
        if coordinates.len() < 2 {
            return self.point_empty();
        }
        let copy = self.copy_coordinates(coordinates.len(), coordinates);
        Point::from_parts(self.clone(), copy)
    }

    /// Point in the XY plane.
    pub fn point_xy(self: &Arc<Self>, x: f64, y: f64) -> Point {
        self.point(&[x, y])
    }

    /// The empty point.
    pub fn point_empty(self: &Arc<Self>) -> Point {
        Point::from_parts(self.clone(), vec![])
    }

    /// Converts a point, or a geometry with a single vertex, to a point of this factory.
    pub fn point_from(self: &Arc<Self>, geometry: &Geometry) -> Result<Point> {
        if geometry.is_empty() {
            return Ok(self.point_empty());
        }

        match geometry {
            Geometry::Point(point) => Ok(self.point(point.coordinates())),
            other => match other.vertices().next() {
                Some(vertex) if other.vertex_count() == 1 => Ok(self.point(vertex.coordinates())),
                _ => Err(GeometryError::KindMismatch {
                    from: other.kind(),
                    to: GeometryKind::Point,
                }),
            },
        }
    }

    /// Line through the vertices of a flat coordinate array with `axis_count` values per vertex.
    /// A single vertex gives the empty line.
    pub fn line_string(
        self: &Arc<Self>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<LineString> {
        Self::check_coordinates(axis_count, coordinates)?;
        if coordinates.len() < 2 * axis_count {
            return Ok(self.line_string_empty());
        }
        let copy = self.copy_coordinates(axis_count, coordinates);
        Ok(LineString::from_parts(self.clone(), copy))
    }

    /// Line through the points. Empty points are skipped.
    pub fn line_string_points(self: &Arc<Self>, points: &[Point]) -> LineString {
        let coordinates = self.points_coordinates(points);
        if coordinates.len() < 2 * self.axis_count {
            self.line_string_empty()
        } else {
            LineString::from_parts(self.clone(), coordinates)
        }
    }

    /// The empty line.
    pub fn line_string_empty(self: &Arc<Self>) -> LineString {
        LineString::from_parts(self.clone(), vec![])
    }

    /// Ring through the vertices of a flat coordinate array. The ring must be closed and have
    /// at least 4 vertices, or none.
    pub fn linear_ring(
        self: &Arc<Self>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<LinearRing> {
        Self::check_coordinates(axis_count, coordinates)?;
        LinearRing::new(self.clone(), self.copy_coordinates(axis_count, coordinates))
    }

    /// Ring through the points. Empty points are skipped.
    pub fn linear_ring_points(self: &Arc<Self>, points: &[Point]) -> Result<LinearRing> {
        LinearRing::new(self.clone(), self.points_coordinates(points))
    }

    /// The empty ring.
    pub fn linear_ring_empty(self: &Arc<Self>) -> LinearRing {
        LinearRing::from_parts(self.clone(), vec![])
    }

    fn ring(self: &Arc<Self>, ring: &LinearRing) -> LinearRing {
        if Arc::ptr_eq(ring.factory(), self) {
            ring.clone()
        } else {
            LinearRing::from_parts(
                self.clone(),
                self.copy_coordinates(ring.axis_count(), ring.coordinates()),
            )
        }
    }

    /// Polygon with the first ring as shell and the others as holes. Empty rings are skipped.
    pub fn polygon(self: &Arc<Self>, rings: Vec<LinearRing>) -> Polygon {
        let ring_count = rings.len();
        let rings: Vec<LinearRing> = rings
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| self.ring(ring))
            .collect();
        if rings.len() < ring_count {
            log::debug!(
                "Skipped {} empty rings of a polygon",
                ring_count - rings.len()
            );
        }
        Polygon::from_parts(self.clone(), rings)
    }

    /// Polygon from one flat coordinate array per ring.
    pub fn polygon_from_coordinates(
        self: &Arc<Self>,
        axis_count: usize,
        rings: &[&[f64]],
    ) -> Result<Polygon> {
        let rings = rings
            .iter()
            .map(|coordinates| self.linear_ring(axis_count, coordinates))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.polygon(rings))
    }

    /// The empty polygon.
    pub fn polygon_empty(self: &Arc<Self>) -> Polygon {
        Polygon::from_parts(self.clone(), vec![])
    }

    fn parts<G: GeometryPart + Rebuild>(self: &Arc<Self>, parts: Vec<G>) -> Multi<G> {
        let parts = parts
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.rebuilt(self))
            .collect();
        Multi::from_parts(self.clone(), parts)
    }

    /// Collection of the non-empty points.
    pub fn multi_point(self: &Arc<Self>, points: Vec<Point>) -> MultiPoint {
        self.parts(points)
    }

    /// Collection of the vertices of a flat coordinate array.
    pub fn multi_point_coordinates(
        self: &Arc<Self>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<MultiPoint> {
        Self::check_coordinates(axis_count, coordinates)?;
        let points = coordinates
            .chunks_exact(axis_count)
            .map(|vertex| self.point(vertex))
            .collect();
        Ok(Multi::from_parts(self.clone(), points))
    }

    /// The empty collection of points.
    pub fn multi_point_empty(self: &Arc<Self>) -> MultiPoint {
        Multi::from_parts(self.clone(), vec![])
    }

    /// Converts a punctual geometry to a collection of points.
    pub fn multi_point_from(self: &Arc<Self>, geometry: &Geometry) -> Result<MultiPoint> {
        let points = parts_of(geometry, GeometryKind::MultiPoint, |part| match part {
            Geometry::Point(point) => Some(point.clone()),
            _ => None,
        })?;
        Ok(self.multi_point(points))
    }

    /// Collection of the non-empty lines.
    pub fn multi_line_string(self: &Arc<Self>, lines: Vec<LineString>) -> MultiLineString {
        self.parts(lines)
    }

    /// The empty collection of lines.
    pub fn multi_line_string_empty(self: &Arc<Self>) -> MultiLineString {
        Multi::from_parts(self.clone(), vec![])
    }

    /// Converts a lineal geometry to a collection of lines. Rings become lines.
    pub fn multi_line_string_from(
        self: &Arc<Self>,
        geometry: &Geometry,
    ) -> Result<MultiLineString> {
        let lines = parts_of(geometry, GeometryKind::MultiLineString, |part| match part {
            Geometry::LineString(line) => Some(line.clone()),
            Geometry::LinearRing(ring) => Some(ring.to_line_string()),
            _ => None,
        })?;
        Ok(self.multi_line_string(lines))
    }

    /// Collection of the non-empty polygons.
    pub fn multi_polygon(self: &Arc<Self>, polygons: Vec<Polygon>) -> MultiPolygon {
        self.parts(polygons)
    }

    /// The empty collection of polygons.
    pub fn multi_polygon_empty(self: &Arc<Self>) -> MultiPolygon {
        Multi::from_parts(self.clone(), vec![])
    }

    /// Converts a polygonal geometry to a collection of polygons.
    pub fn multi_polygon_from(self: &Arc<Self>, geometry: &Geometry) -> Result<MultiPolygon> {
        let polygons = parts_of(geometry, GeometryKind::MultiPolygon, |part| match part {
            Geometry::Polygon(polygon) => Some(polygon.clone()),
            _ => None,
        })?;
        Ok(self.multi_polygon(polygons))
    }

    /// The single point, or a collection of points.
    pub fn punctual(self: &Arc<Self>, mut points: Vec<Point>) -> Geometry {
        if points.len() == 1 {
            points.remove(0).rebuilt(self).into()
        } else {
            self.multi_point(points).into()
        }
    }

    /// The single line, or a collection of lines.
    pub fn lineal(self: &Arc<Self>, mut lines: Vec<LineString>) -> Geometry {
        if lines.len() == 1 {
            lines.remove(0).rebuilt(self).into()
        } else {
            self.multi_line_string(lines).into()
        }
    }

    /// The single polygon, or a collection of polygons.
    pub fn polygonal(self: &Arc<Self>, mut polygons: Vec<Polygon>) -> Geometry {
        if polygons.len() == 1 {
            polygons.remove(0).rebuilt(self).into()
        } else {
            self.multi_polygon(polygons).into()
        }
    }

    /// Collection of the parts. Parts of a single kind give the matching homogeneous
    /// collection, rings counting as lines.
    pub fn geometry_collection(self: &Arc<Self>, parts: Vec<Geometry>) -> Geometry {
        if parts.is_empty() {
            return self.geometry_collection_empty().into();
        }

        if parts.iter().all(|part| matches!(part, Geometry::Point(_))) {
            let points = parts.into_iter().filter_map(|part| match part {
                Geometry::Point(point) => Some(point),
                _ => None,
            });
            return self.multi_point(points.collect()).into();
        }

        if parts
            .iter()
            .all(|part| matches!(part, Geometry::LineString(_) | Geometry::LinearRing(_)))
        {
            let lines = parts.into_iter().filter_map(|part| match part {
                Geometry::LineString(line) => Some(line),
                Geometry::LinearRing(ring) => Some(ring.to_line_string()),
                _ => None,
            });
            return self.multi_line_string(lines.collect()).into();
        }

        if parts.iter().all(|part| matches!(part, Geometry::Polygon(_))) {
            let polygons = parts.into_iter().filter_map(|part| match part {
                Geometry::Polygon(polygon) => Some(polygon),
                _ => None,
            });
            return self.multi_polygon(polygons.collect()).into();
        }

        self.parts(parts).into()
    }

    /// The empty heterogeneous collection.
    pub fn geometry_collection_empty(self: &Arc<Self>) -> GeometryCollection {
        Multi::from_parts(self.clone(), vec![])
    }

    /// Simplest geometry of the parts: the empty collection, the single part, or a collection.
    pub fn build_geometry(self: &Arc<Self>, mut parts: Vec<Geometry>) -> Geometry {
        match parts.len() {
            0 => self.geometry_collection_empty().into(),
            1 => parts.remove(0).rebuilt(self),
            _ => self.geometry_collection(parts),
        }
    }

    /// Bounding box of a flat coordinate array.
    pub fn bounding_box(
        self: &Arc<Self>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<BoundingBox> {
        BoundingBox::new(self, axis_count, coordinates)
    }

    /// The empty bounding box of this factory.
    pub fn bounding_box_empty(self: &Arc<Self>) -> BoundingBox {
        BoundingBox::empty_with(self)
    }

    /// Factory for the result of converting a geometry with `source_srid`. An unknown SRID of
    /// this factory takes the SRID of the geometry.
    fn target_factory(self: &Arc<Self>, source_srid: i32) -> Arc<Self> {
        if self.srid == 0 && source_srid != 0 {
            self.convert_srid(source_srid)
        } else {
            self.clone()
        }
    }

    /// Copies the geometry into this factory, rounding to its precision and adjusting the axis
    /// count.
    ///
    /// Fails with [`GeometryError::Projection`] if both the geometry and the factory have a
    /// known SRID and they differ, see [`GeometryFactory::geometry_projected`].
    pub fn geometry(self: &Arc<Self>, geometry: &Geometry) -> Result<Geometry> {
        let source_srid = geometry.srid();
        let target = self.target_factory(source_srid);
        if Arc::ptr_eq(geometry.factory(), &target) {
            return Ok(geometry.clone());
        }
        if source_srid != 0 && source_srid != target.srid {
            return Err(GeometryError::Projection {
                source_srid,
                target_srid: target.srid,
            });
        }

        Ok(geometry.rebuilt(&target))
    }

    /// Copies the geometry into this factory, projecting the coordinates with an operation of
    /// `projection` if the coordinate systems differ.
    pub fn geometry_projected(
        self: &Arc<Self>,
        geometry: &Geometry,
        projection: &dyn ProjectionService,
    ) -> Result<Geometry> {
        let source_srid = geometry.srid();
        let target = self.target_factory(source_srid);
        if source_srid == 0 || source_srid == target.srid {
            return self.geometry(geometry);
        }

        let operation = projection
            .operation(source_srid, target.srid)
            .ok_or(GeometryError::Projection {
                source_srid,
                target_srid: target.srid,
            })?;
        log::debug!(
            "Projecting {} from srid {source_srid} to srid {}",
            geometry.kind(),
            target.srid
        );
        rebuild(&target, geometry, &mut |axis_count: usize, coordinates: &[f64]| {
            project(operation.as_ref(), &target, axis_count, coordinates)
        })
    }

    /// Reads a geometry from text with `reader` and this factory.
    pub fn geometry_from_text(
        self: &Arc<Self>,
        text: &str,
        reader: &dyn GeometryReader,
    ) -> Result<Geometry> {
        reader.read(self, text)
    }
}

fn project(
    operation: &dyn CoordinatesOperation,
    target: &GeometryFactory,
    axis_count: usize,
    coordinates: &[f64],
) -> Result<Vec<f64>> {
    let mut projected = coordinates.to_vec();
    operation.apply(&mut projected, axis_count)?;
    Ok(target.copy_coordinates(axis_count, &projected))
}

/// Parts of a geometry or of a collection that all match `part`. An empty geometry has no
/// parts.
fn parts_of<T>(
    geometry: &Geometry,
    target: GeometryKind,
    part: impl Fn(&Geometry) -> Option<T>,
) -> Result<Vec<T>> {
    if geometry.is_empty() {
        return Ok(vec![]);
    }

    let mismatch = || GeometryError::KindMismatch {
        from: geometry.kind(),
        to: target,
    };
    geometry
        .geometries()
        .iter()
        .filter(|part| !part.is_empty())
        .map(|item| part(item).ok_or_else(mismatch))
        .collect()
}

/// Rebuilds the structure of `geometry` in `factory` with every coordinate array mapped by
/// `coordinates`, which receives the source axis count and values.
fn rebuild<E>(
    factory: &Arc<GeometryFactory>,
    geometry: &Geometry,
    coordinates: &mut impl FnMut(usize, &[f64]) -> std::result::Result<Vec<f64>, E>,
) -> std::result::Result<Geometry, E> {
    let axis_count = geometry.axis_count();
    Ok(match geometry {
        Geometry::Point(point) => {
            Point::from_parts(factory.clone(), coordinates(axis_count, point.coordinates())?)
                .into()
        }
        Geometry::LineString(line) => {
            LineString::from_parts(factory.clone(), coordinates(axis_count, line.coordinates())?)
                .into()
        }
        Geometry::LinearRing(ring) => {
            LinearRing::from_parts(factory.clone(), coordinates(axis_count, ring.coordinates())?)
                .into()
        }
        Geometry::Polygon(polygon) => rebuild_polygon(factory, polygon, coordinates)?.into(),
        Geometry::MultiPoint(points) => {
            let parts = points
                .parts()
                .iter()
                .map(|point| {
                    Ok(Point::from_parts(
                        factory.clone(),
                        coordinates(axis_count, point.coordinates())?,
                    ))
                })
                .collect::<std::result::Result<Vec<_>, E>>()?;
            Multi::from_parts(factory.clone(), parts).into()
        }
        Geometry::MultiLineString(lines) => {
            let parts = lines
                .parts()
                .iter()
                .map(|line| {
                    Ok(LineString::from_parts(
                        factory.clone(),
                        coordinates(axis_count, line.coordinates())?,
                    ))
                })
                .collect::<std::result::Result<Vec<_>, E>>()?;
            Multi::from_parts(factory.clone(), parts).into()
        }
        Geometry::MultiPolygon(polygons) => {
            let parts = polygons
                .parts()
                .iter()
                .map(|polygon| rebuild_polygon(factory, polygon, &mut *coordinates))
                .collect::<std::result::Result<Vec<_>, E>>()?;
            Multi::from_parts(factory.clone(), parts).into()
        }
        Geometry::GeometryCollection(collection) => {
            let parts = collection
                .parts()
                .iter()
                .map(|part| rebuild(factory, part, &mut *coordinates))
                .collect::<std::result::Result<Vec<_>, E>>()?;
            Multi::from_parts(factory.clone(), parts).into()
        }
    })
}

fn rebuild_polygon<E>(
    factory: &Arc<GeometryFactory>,
    polygon: &Polygon,
    coordinates: &mut impl FnMut(usize, &[f64]) -> std::result::Result<Vec<f64>, E>,
) -> std::result::Result<Polygon, E> {
    let axis_count = polygon.axis_count();
    let rings = polygon
        .rings()
        .iter()
        .map(|ring| {
            Ok(LinearRing::from_parts(
                factory.clone(),
                coordinates(axis_count, ring.coordinates())?,
            ))
        })
        .collect::<std::result::Result<Vec<_>, E>>()?;
    Ok(Polygon::from_parts(factory.clone(), rings))
}

/// Copy of a geometry in another factory. Only the precision and the axis count change.
trait Rebuild: Sized {
    fn rebuilt(&self, factory: &Arc<GeometryFactory>) -> Self;
}

fn copier(
    factory: &GeometryFactory,
) -> impl FnMut(usize, &[f64]) -> std::result::Result<Vec<f64>, Infallible> + '_ {
    move |axis_count: usize, values: &[f64]| Ok(factory.copy_coordinates(axis_count, values))
}

fn infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl Rebuild for Geometry {
    fn rebuilt(&self, factory: &Arc<GeometryFactory>) -> Self {
        if Arc::ptr_eq(self.factory(), factory) {
            return self.clone();
        }
        infallible(rebuild(factory, self, &mut copier(factory)))
    }
}

impl Rebuild for Point {
    fn rebuilt(&self, factory: &Arc<GeometryFactory>) -> Self {
        if Arc::ptr_eq(self.factory(), factory) {
            return self.clone();
        }
        Point::from_parts(
            factory.clone(),
            factory.copy_coordinates(self.axis_count(), self.coordinates()),
        )
    }
}

impl Rebuild for LineString {
    fn rebuilt(&self, factory: &Arc<GeometryFactory>) -> Self {
        if Arc::ptr_eq(self.factory(), factory) {
            return self.clone();
        }
        LineString::from_parts(
            factory.clone(),
            factory.copy_coordinates(self.axis_count(), self.coordinates()),
        )
    }
}

impl Rebuild for Polygon {
    fn rebuilt(&self, factory: &Arc<GeometryFactory>) -> Self {
        if Arc::ptr_eq(self.factory(), factory) {
            return self.clone();
        }
        infallible(rebuild_polygon(factory, self, &mut copier(factory)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn point_padding_and_rounding() {
        let factory = GeometryFactory::fixed(0, 3, &[10.0, 10.0, 1.0]);
        let point = factory.point(&[1.234, 5.678]);
        assert_eq!(point.x(), 1.2);
        assert_eq!(point.y(), 5.7);
        assert!(point.z().is_nan());
        assert!(factory.point(&[1.0]).is_empty());
        assert_eq!(factory.point(&[1.0, 2.0, 3.4, 4.0]).coordinates(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn point_from_single_vertex() {
        let factory = GeometryFactory::floating(0, 2);
        let points = factory.multi_point(vec![factory.point_xy(1.0, 2.0)]);
        let point = factory.point_from(&points.into()).unwrap();
        assert_eq!(point.coordinates(), &[1.0, 2.0]);

        let line: Geometry = factory
            .line_string(2, &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .into();
        assert_matches!(
            factory.point_from(&line),
            Err(GeometryError::KindMismatch {
                from: GeometryKind::LineString,
                to: GeometryKind::Point
            })
        );
        assert!(factory
            .point_from(&factory.line_string_empty().into())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn line_string_validation() {
        let factory = GeometryFactory::floating(0, 2);
        assert_matches!(
            factory.line_string(2, &[0.0, 0.0, 1.0]),
            Err(GeometryError::Coordinates {
                axis_count: 2,
                len: 3
            })
        );
        assert!(factory.line_string(2, &[1.0, 1.0]).unwrap().is_empty());
        let line = factory
            .line_string(3, &[0.0, 0.0, 5.0, 1.0, 1.0, 6.0])
            .unwrap();
        assert_eq!(line.coordinates(), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn linear_ring_validation() {
        let factory = GeometryFactory::floating(0, 2);
        assert_matches!(
            factory.linear_ring(2, &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
            Err(GeometryError::StructuralMinimum(_))
        );
        assert_matches!(
            factory.linear_ring(2, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]),
            Err(GeometryError::NotClosed { .. })
        );
        assert!(factory.linear_ring(2, &[]).unwrap().is_empty());

        let points = [
            factory.point_xy(0.0, 0.0),
            factory.point_xy(0.0, 1.0),
            factory.point_empty(),
            factory.point_xy(1.0, 1.0),
            factory.point_xy(0.0, 0.0),
        ];
        assert_eq!(factory.linear_ring_points(&points).unwrap().vertex_count(), 4);
    }

    #[test]
    fn polygon_skips_empty_rings() {
        let factory = GeometryFactory::floating(0, 2);
        let shell = factory
            .linear_ring(2, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0])
            .unwrap();
        let polygon = factory.polygon(vec![shell, factory.linear_ring_empty()]);
        assert_eq!(polygon.ring_count(), 1);
    }

    #[test]
    fn collections_pick_kind() {
        let factory = GeometryFactory::floating(0, 2);
        let point: Geometry = factory.point_xy(1.0, 1.0).into();
        let line: Geometry = factory
            .line_string(2, &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .into();

        let points = factory.geometry_collection(vec![point.clone(), point.clone()]);
        assert_eq!(points.kind(), GeometryKind::MultiPoint);

        let mixed = factory.geometry_collection(vec![point.clone(), line.clone()]);
        assert_eq!(mixed.kind(), GeometryKind::GeometryCollection);
        assert_eq!(mixed.part_count(), 2);

        assert_eq!(
            factory.geometry_collection(vec![]).kind(),
            GeometryKind::GeometryCollection
        );
        assert_eq!(
            factory.build_geometry(vec![line.clone()]).kind(),
            GeometryKind::LineString
        );
        assert!(factory.build_geometry(vec![]).is_empty());

        assert_eq!(
            factory
                .punctual(vec![factory.point_xy(1.0, 1.0)])
                .kind(),
            GeometryKind::Point
        );
        assert_eq!(factory.lineal(vec![]).kind(), GeometryKind::MultiLineString);
    }

    #[test]
    fn multi_from_conversions() {
        let factory = GeometryFactory::floating(0, 2);
        let line: Geometry = factory
            .line_string(2, &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .into();

        let lines = factory.multi_line_string_from(&line).unwrap();
        assert_eq!(lines.part_count(), 1);

        let err = factory.multi_polygon_from(&line).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert LineString to MultiPolygon");

        let empty = factory.multi_point_from(&factory.polygon_empty().into()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn geometry_rescales() {
        let floating = GeometryFactory::floating(0, 2);
        let fixed = GeometryFactory::fixed(0, 2, &[1.0, 1.0]);
        let polygon: Geometry = floating
            .polygon_from_coordinates(2, &[&[0.2, 0.2, 0.4, 9.6, 9.7, 9.8, 0.2, 0.2]])
            .unwrap()
            .into();
        let copy = fixed.geometry(&polygon).unwrap();
        assert!(Arc::ptr_eq(copy.factory(), &fixed));
        let ring = copy.as_polygon().unwrap().shell().unwrap();
        assert_eq!(ring.coordinates(), &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_srid_takes_geometry_srid() {
        let source = GeometryFactory::floating(3005, 2);
        let target = GeometryFactory::fixed(0, 3, &[100.0, 100.0]);
        let point: Geometry = source.point_xy(1.234, 2.345).into();

        let copy = target.geometry(&point).unwrap();
        assert_eq!(copy.srid(), 3005);
        assert_eq!(copy.axis_count(), 3);
        assert_eq!(copy.as_point().unwrap().x(), 1.23);

        let back = source.geometry(&copy).unwrap();
        assert_eq!(back.srid(), 3005);
    }

    #[test]
    fn different_srids_need_projection() {
        let source = GeometryFactory::floating(4326, 2);
        let target = GeometryFactory::floating(3857, 2);
        let point: Geometry = source.point_xy(10.0, 0.0).into();
        assert_matches!(
            target.geometry(&point),
            Err(GeometryError::Projection {
                source_srid: 4326,
                target_srid: 3857
            })
        );

        struct NoProjections;
        impl ProjectionService for NoProjections {
            fn operation(&self, _: i32, _: i32) -> Option<Box<dyn CoordinatesOperation>> {
                None
            }
        }
        assert_matches!(
            target.geometry_projected(&point, &NoProjections),
            Err(GeometryError::Projection { .. })
        );
    }

    #[test]
    fn projection_applies_operation() {
        struct Shift;
        impl CoordinatesOperation for Shift {
            fn apply(&self, coordinates: &mut [f64], axis_count: usize) -> Result<()> {
                for vertex in coordinates.chunks_exact_mut(axis_count) {
                    vertex[0] += 100.0;
                }
                Ok(())
            }
        }
        struct ShiftService;
        impl ProjectionService for ShiftService {
            fn operation(&self, _: i32, _: i32) -> Option<Box<dyn CoordinatesOperation>> {
                Some(Box::new(Shift))
            }
        }

        let source = GeometryFactory::floating(26910, 2);
        let target = GeometryFactory::floating(26911, 2);
        let line: Geometry = source
            .line_string(2, &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .into();
        let projected = target.geometry_projected(&line, &ShiftService).unwrap();
        assert_eq!(projected.srid(), 26911);
        assert_eq!(
            projected.as_line_string().unwrap().coordinates(),
            &[100.0, 0.0, 101.0, 1.0]
        );
    }

    #[test]
    fn geometry_from_text_uses_reader() {
        struct PointReader;
        impl GeometryReader for PointReader {
            fn read(&self, factory: &Arc<GeometryFactory>, text: &str) -> Result<Geometry> {
                let values: Vec<f64> = text
                    .split_whitespace()
                    .filter_map(|value| value.parse().ok())
                    .collect();
                Ok(factory.point(&values).into())
            }
        }

        let factory = GeometryFactory::floating(0, 2);
        let geometry = factory.geometry_from_text("1 2", &PointReader).unwrap();
        assert_eq!(geometry.as_point().unwrap().coordinates(), &[1.0, 2.0]);
    }
}
