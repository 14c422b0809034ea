//! Multi part geometries.
//!
//! All collection kinds share [`Multi`]: the homogeneous [`MultiPoint`], [`MultiLineString`]
//! and [`MultiPolygon`] and the heterogeneous [`GeometryCollection`]. Homogeneity is enforced by
//! the type parameter, the factory picks the right kind when building from arbitrary parts.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::factory::GeometryFactory;
use crate::geometry::{resolve_index, Geometry, GeometryOps};
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::line_string::{LineString, LineStringOps};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::services::{LineMerger, Polygonizer, ValidityCheck};
use crate::vertex::VertexIter;

/// Set of points.
pub type MultiPoint = Multi<Point>;
/// Set of lines.
pub type MultiLineString = Multi<LineString>;
/// Set of polygons.
pub type MultiPolygon = Multi<Polygon>;
/// Set of geometries of any kind.
pub type GeometryCollection = Multi<Geometry>;

/// A geometry that can be a part of a [`Multi`] collection.
pub trait GeometryPart: GeometryOps + Clone + Into<Geometry> {
    /// Kind of a collection of such parts.
    const COLLECTION_KIND: GeometryKind;

    /// Wraps a collection of such parts into the geometry enum.
    fn collection_geometry(collection: Multi<Self>) -> Geometry;

    /// Normal form of the part.
    fn normalize_part(&self) -> Self;

    /// Part with reversed vertex order.
    fn reverse_part(&self) -> Self;

    /// Part translated by `deltas`.
    fn move_part(&self, deltas: &[f64]) -> Self;

    /// Part oriented clockwise (or counterclockwise). Points are returned as is.
    fn orient_part(&self, clockwise: bool) -> Self;

    /// Order of two parts.
    fn compare_part(&self, other: &Self) -> Ordering;

    /// Whether two parts are equal within `tolerance`.
    fn equals_exact_part(&self, other: &Self, tolerance: f64) -> bool;
}

impl GeometryPart for Point {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPoint;

    fn collection_geometry(collection: Multi<Self>) -> Geometry {
        Geometry::MultiPoint(collection)
    }

    fn normalize_part(&self) -> Self {
        self.normalize()
    }

    fn reverse_part(&self) -> Self {
        self.reverse()
    }

    fn move_part(&self, deltas: &[f64]) -> Self {
        self.move_by(deltas)
    }

    fn orient_part(&self, _clockwise: bool) -> Self {
        self.clone()
    }

    fn compare_part(&self, other: &Self) -> Ordering {
        other
            .is_empty()
            .cmp(&self.is_empty())
            .then_with(|| self.compare_to_same_kind(other))
    }

    fn equals_exact_part(&self, other: &Self, tolerance: f64) -> bool {
        self.equals_exact(other, tolerance)
    }
}

impl GeometryPart for LineString {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiLineString;

    fn collection_geometry(collection: Multi<Self>) -> Geometry {
        Geometry::MultiLineString(collection)
    }

    fn normalize_part(&self) -> Self {
        self.normalize()
    }

    fn reverse_part(&self) -> Self {
        self.reverse()
    }

    fn move_part(&self, deltas: &[f64]) -> Self {
        self.move_by(deltas)
    }

    fn orient_part(&self, clockwise: bool) -> Self {
        if clockwise {
            self.to_clockwise()
        } else {
            self.to_counter_clockwise()
        }
    }

    fn compare_part(&self, other: &Self) -> Ordering {
        other
            .is_empty()
            .cmp(&self.is_empty())
            .then_with(|| self.compare_to_same_kind(other))
    }

    fn equals_exact_part(&self, other: &Self, tolerance: f64) -> bool {
        self.equals_exact(other, tolerance)
    }
}

impl GeometryPart for Polygon {
    const COLLECTION_KIND: GeometryKind = GeometryKind::MultiPolygon;

    fn collection_geometry(collection: Multi<Self>) -> Geometry {
        Geometry::MultiPolygon(collection)
    }

    fn normalize_part(&self) -> Self {
        self.normalize()
    }

    fn reverse_part(&self) -> Self {
        self.reverse()
    }

    fn move_part(&self, deltas: &[f64]) -> Self {
        self.move_by(deltas)
    }

    fn orient_part(&self, clockwise: bool) -> Self {
        if clockwise {
            self.to_clockwise()
        } else {
            self.to_counter_clockwise()
        }
    }

    fn compare_part(&self, other: &Self) -> Ordering {
        other
            .is_empty()
            .cmp(&self.is_empty())
            .then_with(|| self.compare_to_same_kind(other))
    }

    fn equals_exact_part(&self, other: &Self, tolerance: f64) -> bool {
        self.equals_exact(other, tolerance)
    }
}

impl GeometryPart for Geometry {
    const COLLECTION_KIND: GeometryKind = GeometryKind::GeometryCollection;

    fn collection_geometry(collection: Multi<Self>) -> Geometry {
        Geometry::GeometryCollection(collection)
    }

    fn normalize_part(&self) -> Self {
        self.normalize()
    }

    fn reverse_part(&self) -> Self {
        self.reverse()
    }

    fn move_part(&self, deltas: &[f64]) -> Self {
        self.move_by(deltas)
    }

    fn orient_part(&self, clockwise: bool) -> Self {
        if clockwise {
            self.to_clockwise()
        } else {
            self.to_counter_clockwise()
        }
    }

    fn compare_part(&self, other: &Self) -> Ordering {
        self.compare(other)
    }

    fn equals_exact_part(&self, other: &Self, tolerance: f64) -> bool {
        self.equals_exact(other, tolerance)
    }
}

/// A collection of parts of the same type.
#[derive(Debug, Clone, PartialEq)]
pub struct Multi<G> {
    factory: Arc<GeometryFactory>,
    parts: Vec<G>,
}

impl<G: GeometryPart> Multi<G> {
    /// `parts` must belong to `factory`.
    pub(crate) fn from_parts(factory: Arc<GeometryFactory>, parts: Vec<G>) -> Self {
        Self { factory, parts }
    }

    fn with_parts(&self, parts: Vec<G>) -> Self {
        Self::from_parts(self.factory.clone(), parts)
    }

    /// All parts.
    pub fn parts(&self) -> &[G] {
        &self.parts
    }

    /// Part with the given index.
    pub fn part(&self, index: usize) -> Option<&G> {
        self.parts.get(index)
    }

    /// Number of parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Whether all parts are of the same kind.
    pub fn is_homogeneous(&self) -> bool {
        match self.parts.split_first() {
            Some((first, rest)) => rest.iter().all(|part| part.kind() == first.kind()),
            None => true,
        }
    }

    /// Normalized parts in ascending order.
    pub fn normalize(&self) -> Self {
        let mut parts: Vec<G> = self.parts.iter().map(G::normalize_part).collect();
        parts.sort_by(G::compare_part);
        self.with_parts(parts)
    }

    /// Collection with the vertex order of every non-empty part reversed.
    pub fn reverse(&self) -> Self {
        self.with_parts(
            self.parts
                .iter()
                .map(|part| {
                    if part.is_empty() {
                        part.clone()
                    } else {
                        part.reverse_part()
                    }
                })
                .collect(),
        )
    }

    /// Collection translated by `deltas`, one delta per axis.
    pub fn move_by(&self, deltas: &[f64]) -> Self {
        self.with_parts(self.parts.iter().map(|part| part.move_part(deltas)).collect())
    }

    /// Every part oriented clockwise.
    pub fn to_clockwise(&self) -> Self {
        self.with_parts(self.parts.iter().map(|part| part.orient_part(true)).collect())
    }

    /// Every part oriented counterclockwise.
    pub fn to_counter_clockwise(&self) -> Self {
        self.with_parts(self.parts.iter().map(|part| part.orient_part(false)).collect())
    }

    /// Compares the sorted parts, so the order of the parts does not matter.
    pub fn compare_to_same_kind(&self, other: &Self) -> Ordering {
        let mut parts: Vec<&G> = self.parts.iter().collect();
        parts.sort_by(|a, b| a.compare_part(b));
        let mut other_parts: Vec<&G> = other.parts.iter().collect();
        other_parts.sort_by(|a, b| a.compare_part(b));

        for (a, b) in parts.iter().zip(&other_parts) {
            let ordering = a.compare_part(b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        parts.len().cmp(&other_parts.len())
    }

    /// Whether both collections have equal parts in the same order.
    pub fn equals_exact(&self, other: &Self, tolerance: f64) -> bool {
        self.parts.len() == other.parts.len()
            && self
                .parts
                .iter()
                .zip(&other.parts)
                .all(|(a, b)| a.equals_exact_part(b, tolerance))
    }

    fn split_id<'a>(&self, id: &'a [isize], min_len: usize) -> Result<(usize, &'a [isize])> {
        match id.split_first() {
            Some((part, rest)) if id.len() >= min_len => {
                Ok((resolve_index("part", *part, self.parts.len(), false)?, rest))
            }
            _ => Err(GeometryError::Arity {
                kind: G::COLLECTION_KIND,
                expected: if min_len > 1 { "at least 2" } else { "at least 1" },
                actual: id.to_vec(),
            }),
        }
    }

    /// Rebuilds the collection with one part replaced by the result of an edit.
    fn with_part_replaced(&self, index: usize, part: Geometry) -> Geometry {
        let parts: Vec<Geometry> = self
            .parts
            .iter()
            .enumerate()
            .map(|(i, existing)| {
                if i == index {
                    part.clone()
                } else {
                    existing.clone().into()
                }
            })
            .collect();
        self.factory.geometry_collection(parts)
    }
}

impl<G: GeometryPart> GeometryOps for Multi<G> {
    fn kind(&self) -> GeometryKind {
        G::COLLECTION_KIND
    }

    fn factory(&self) -> &Arc<GeometryFactory> {
        &self.factory
    }

    fn is_empty(&self) -> bool {
        self.parts.iter().all(GeometryOps::is_empty)
    }

    fn dimension(&self) -> Dimension {
        self.parts
            .iter()
            .map(GeometryOps::dimension)
            .fold(Dimension::False, Dimension::max)
    }

    fn boundary_dimension(&self) -> Dimension {
        self.parts
            .iter()
            .map(GeometryOps::boundary_dimension)
            .fold(Dimension::False, Dimension::max)
    }

    fn area(&self) -> f64 {
        self.parts.iter().map(GeometryOps::area).sum()
    }

    fn length(&self) -> f64 {
        self.parts.iter().map(GeometryOps::length).sum()
    }

    fn vertex_count(&self) -> usize {
        self.parts.iter().map(GeometryOps::vertex_count).sum()
    }

    fn segment_count(&self) -> usize {
        self.parts.iter().map(GeometryOps::segment_count).sum()
    }

    fn vertices(&self) -> VertexIter<'_> {
        let sequences = self
            .parts
            .iter()
            .enumerate()
            .flat_map(|(i, part)| part.vertices().into_prefixed_sequences(i))
            .collect();
        VertexIter::new(&self.factory, sequences)
    }

    fn locate_xy(&self, x: f64, y: f64) -> Location {
        let mut location = Location::Exterior;
        for part in &self.parts {
            match part.locate_xy(x, y) {
                Location::Interior => return Location::Interior,
                Location::Boundary => location = Location::Boundary,
                Location::Exterior => {}
            }
        }
        location
    }

    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool {
        self.parts.iter().any(|part| part.intersects_bbox(bbox))
    }

    fn to_geometry(&self) -> Geometry {
        G::collection_geometry(self.clone())
    }

    fn insert_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let (index, rest) = self.split_id(vertex_id, 2)?;
        let part = self.parts[index].insert_vertex(rest, new_point)?;
        Ok(self.with_part_replaced(index, part))
    }

    fn delete_vertex(&self, vertex_id: &[isize]) -> Result<Geometry> {
        let (index, rest) = self.split_id(vertex_id, 2)?;
        let part = self.parts[index].delete_vertex(rest)?;
        Ok(self.with_part_replaced(index, part))
    }

    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let (index, rest) = self.split_id(vertex_id, 2)?;
        let part = self.parts[index].move_vertex(rest, new_point)?;
        Ok(self.with_part_replaced(index, part))
    }

    fn append_vertex(&self, geometry_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let (index, rest) = self.split_id(geometry_id, 1)?;
        let part = self.parts[index].append_vertex(rest, new_point)?;
        Ok(self.with_part_replaced(index, part))
    }
}

impl Multi<Point> {
    /// Points of the collection have no boundary.
    pub fn boundary(&self) -> MultiPoint {
        self.factory.multi_point_empty()
    }

    /// Collection without points equal in XY to an earlier one.
    pub fn remove_duplicate_points(&self) -> MultiPoint {
        let mut parts: Vec<Point> = Vec::with_capacity(self.parts.len());
        for point in &self.parts {
            if !point.is_empty() && !parts.iter().any(|p| p.equals_2d(point)) {
                parts.push(point.clone());
            }
        }
        self.with_parts(parts)
    }
}

impl Multi<LineString> {
    /// Whether every line is closed.
    pub fn is_closed(&self) -> bool {
        self.parts.iter().all(|line| line.is_empty() || line.is_closed())
    }

    /// End points that belong to an odd number of lines (mod-2 rule).
    pub fn boundary(&self) -> MultiPoint {
        let mut end_points: Vec<(Point, usize)> = vec![];
        for line in self.parts.iter().filter(|line| !line.is_empty()) {
            for point in [line.from_point(), line.to_point()] {
                match end_points.iter_mut().find(|(p, _)| p.equals_2d(&point)) {
                    Some((_, count)) => *count += 1,
                    None => end_points.push((point, 1)),
                }
            }
        }

        let mut points: Vec<Point> = end_points
            .into_iter()
            .filter(|(_, count)| count % 2 == 1)
            .map(|(point, _)| point)
            .collect();
        points.sort_by(Point::compare_to_same_kind);
        self.factory.multi_point(points)
    }

    /// The normalized collection if `validity` accepts it, otherwise the lines merged by `merger`.
    pub fn new_valid_geometry(
        &self,
        merger: &dyn LineMerger,
        validity: &dyn ValidityCheck,
    ) -> Result<Geometry> {
        if self.is_empty() {
            return Ok(self.to_geometry());
        }
        if validity.is_valid(&self.to_geometry()) {
            return Ok(self.normalize().into());
        }

        merger.merge(&self.parts).inspect_err(|err| {
            log::warn!("Failed to merge {} lines: {err}", self.parts.len());
        })
    }
}

impl Multi<Polygon> {
    /// All rings of all polygons as lines.
    pub fn boundary(&self) -> MultiLineString {
        let lines = self
            .parts
            .iter()
            .flat_map(|polygon| polygon.rings().iter().map(|ring| ring.to_line_string()))
            .collect();
        self.factory.multi_line_string(lines)
    }

    /// The normalized collection if `validity` accepts it, otherwise the polygons assembled from
    /// all rings by `polygonizer`.
    pub fn new_valid_geometry(
        &self,
        polygonizer: &dyn Polygonizer,
        validity: &dyn ValidityCheck,
    ) -> Result<Geometry> {
        if self.is_empty() {
            return Ok(self.to_geometry());
        }
        if validity.is_valid(&self.to_geometry()) {
            return Ok(self.normalize().into());
        }

        let lines: Vec<Geometry> = self
            .parts
            .iter()
            .flat_map(|polygon| polygon.rings().iter().map(|ring| ring.to_line_string().into()))
            .collect();
        polygonizer.polygonize(&lines).inspect_err(|err| {
            log::warn!("Failed to polygonize {} rings: {err}", lines.len());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn factory() -> Arc<GeometryFactory> {
        GeometryFactory::floating(0, 2)
    }

    #[test]
    fn ordering_ignores_part_order() {
        let factory = factory();
        let a = factory.multi_point(vec![factory.point_xy(1.0, 1.0), factory.point_xy(0.0, 0.0)]);
        let b = factory.multi_point(vec![factory.point_xy(0.0, 0.0), factory.point_xy(1.0, 1.0)]);
        assert_eq!(a.compare_to_same_kind(&b), Ordering::Equal);
        assert!(!a.equals_exact(&b, 0.0));
        assert_eq!(a.normalize(), b.normalize());
        assert!(a.normalize().equals_exact(&b, 0.0));
    }

    #[test]
    fn sums_and_dimensions() {
        let factory = factory();
        let lines = factory.multi_line_string(vec![
            factory.line_string(2, &[0.0, 0.0, 3.0, 4.0]).unwrap(),
            factory.line_string(2, &[0.0, 0.0, 0.0, 2.0, 0.0, 3.0]).unwrap(),
        ]);
        assert_abs_diff_eq!(lines.length(), 8.0);
        assert_eq!(lines.vertex_count(), 5);
        assert_eq!(lines.segment_count(), 3);
        assert_eq!(lines.dimension(), Dimension::Curve);
        assert_eq!(lines.boundary_dimension(), Dimension::Point);
        assert_eq!(lines.kind(), GeometryKind::MultiLineString);

        let empty = factory.multi_point_empty();
        assert!(empty.is_empty());
        assert_eq!(empty.dimension(), Dimension::False);
    }

    #[test]
    fn boundary_uses_mod_2_rule() {
        let factory = factory();
        let lines = factory.multi_line_string(vec![
            factory.line_string(2, &[0.0, 0.0, 1.0, 0.0]).unwrap(),
            factory.line_string(2, &[1.0, 0.0, 2.0, 0.0]).unwrap(),
        ]);
        let boundary = lines.boundary();
        assert_eq!(boundary.part_count(), 2);
        assert_eq!(boundary.parts()[0].x(), 0.0);
        assert_eq!(boundary.parts()[1].x(), 2.0);
    }

    #[test]
    fn edits_delegate_to_parts() {
        let factory = factory();
        let lines = factory.multi_line_string(vec![
            factory.line_string(2, &[0.0, 0.0, 1.0, 0.0]).unwrap(),
            factory.line_string(2, &[5.0, 5.0, 6.0, 6.0]).unwrap(),
        ]);
        let target = factory.point_xy(5.5, 7.0);

        let inserted = lines.insert_vertex(&[1, 1], &target).unwrap();
        assert_eq!(inserted.kind(), GeometryKind::MultiLineString);
        assert_eq!(inserted.vertex_count(), 5);
        assert_eq!(
            inserted.part(1).unwrap().vertices().nth(1).unwrap().xy(),
            target.xy()
        );

        let appended = lines.append_vertex(&[0], &target).unwrap();
        assert_eq!(appended.part(0).unwrap().vertex_count(), 3);

        assert_matches!(
            lines.insert_vertex(&[1], &target),
            Err(GeometryError::Arity { .. })
        );
        assert_matches!(
            lines.move_vertex(&[2, 0], &target),
            Err(GeometryError::Range { what: "part", .. })
        );
    }

    #[test]
    fn collection_of_mixed_parts() {
        let factory = factory();
        let collection = factory.geometry_collection(vec![
            factory.point_xy(10.0, 10.0).into(),
            factory.line_string(2, &[0.0, 0.0, 1.0, 0.0]).unwrap().into(),
        ]);
        assert_eq!(collection.kind(), GeometryKind::GeometryCollection);
        assert_eq!(collection.dimension(), Dimension::Curve);
        assert_eq!(collection.locate_xy(10.0, 10.0), Location::Interior);
        assert_eq!(collection.locate_xy(1.0, 0.0), Location::Boundary);

        let normalized = collection.normalize();
        assert_eq!(normalized.part(0).unwrap().kind(), GeometryKind::Point);
        assert_eq!(normalized.normalize(), normalized);

        let ids: Vec<Vec<usize>> = collection
            .vertices()
            .map(|v| v.vertex_id().to_vec())
            .collect();
        assert_eq!(ids, vec![vec![0, 0], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn duplicate_points_removed() {
        let factory = factory();
        let points = factory
            .multi_point_coordinates(2, &[1.0, 1.0, 2.0, 2.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(points.remove_duplicate_points().part_count(), 2);
    }
}
