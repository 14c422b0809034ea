//! Lazy views over the vertices of a geometry.

use std::sync::Arc;

use nalgebra::Point2;

use crate::factory::{GeometryFactory, AXIS_M, AXIS_X, AXIS_Y, AXIS_Z};
use crate::point::Point;

/// Coordinates of one vertex sequence (a point, a line or a ring) and the id path leading to it.
#[derive(Debug, Clone)]
pub(crate) struct Sequence<'a> {
    pub(crate) id: Vec<usize>,
    pub(crate) coordinates: &'a [f64],
}

impl<'a> Sequence<'a> {
    pub(crate) fn new(id: Vec<usize>, coordinates: &'a [f64]) -> Self {
        Self { id, coordinates }
    }

    pub(crate) fn vertex_count(&self, axis_count: usize) -> usize {
        self.coordinates.len() / axis_count
    }

    pub(crate) fn xy(&self, axis_count: usize, vertex: usize) -> Point2<f64> {
        let offset = vertex * axis_count;
        Point2::new(self.coordinates[offset], self.coordinates[offset + 1])
    }
}

/// A single vertex of a geometry, borrowed from the geometry's coordinate storage.
#[derive(Debug, Clone)]
pub struct Vertex<'a> {
    factory: &'a Arc<GeometryFactory>,
    id: Vec<usize>,
    coordinates: &'a [f64],
}

impl<'a> Vertex<'a> {
    /// Id path of the vertex: part, ring and vertex indices as applicable to the geometry kind.
    pub fn vertex_id(&self) -> &[usize] {
        &self.id
    }

    /// Index of the vertex in its line or ring.
    pub fn vertex_index(&self) -> usize {
        self.id.last().copied().unwrap_or(0)
    }

    /// Value of the axis, NaN if the axis does not exist.
    pub fn coordinate(&self, axis: usize) -> f64 {
        self.coordinates.get(axis).copied().unwrap_or(f64::NAN)
    }

    /// All values of the vertex.
    pub fn coordinates(&self) -> &'a [f64] {
        self.coordinates
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.coordinate(AXIS_X)
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.coordinate(AXIS_Y)
    }

    /// Z coordinate.
    pub fn z(&self) -> f64 {
        self.coordinate(AXIS_Z)
    }

    /// M value.
    pub fn m(&self) -> f64 {
        self.coordinate(AXIS_M)
    }

    /// X and Y as a point.
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.x(), self.y())
    }

    /// Factory of the geometry the vertex belongs to.
    pub fn factory(&self) -> &'a Arc<GeometryFactory> {
        self.factory
    }

    /// Copies the vertex into a new point geometry.
    pub fn to_point(&self) -> Point {
        Point::from_parts(self.factory.clone(), self.coordinates.to_vec())
    }
}

/// Iterator over the vertices of a geometry, in part, ring and vertex order.
#[derive(Debug, Clone)]
pub struct VertexIter<'a> {
    factory: &'a Arc<GeometryFactory>,
    sequences: Vec<Sequence<'a>>,
    sequence: usize,
    vertex: usize,
}

impl<'a> VertexIter<'a> {
    pub(crate) fn new(factory: &'a Arc<GeometryFactory>, sequences: Vec<Sequence<'a>>) -> Self {
        Self {
            factory,
            sequences,
            sequence: 0,
            vertex: 0,
        }
    }

    pub(crate) fn into_sequences(self) -> Vec<Sequence<'a>> {
        self.sequences
    }

    /// Sequences with `index` prepended to their ids, used by containers to address their parts.
    pub(crate) fn into_prefixed_sequences(
        self,
        index: usize,
    ) -> impl Iterator<Item = Sequence<'a>> {
        self.sequences.into_iter().map(move |mut sequence| {
            sequence.id.insert(0, index);
            sequence
        })
    }
}

impl<'a> Iterator for VertexIter<'a> {
    type Item = Vertex<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let axis_count = self.factory.axis_count();
        loop {
            let sequence = self.sequences.get(self.sequence)?;
            if self.vertex < sequence.vertex_count(axis_count) {
                let start = self.vertex * axis_count;
                let mut id = sequence.id.clone();
                id.push(self.vertex);
                self.vertex += 1;

                return Some(Vertex {
                    factory: self.factory,
                    id,
                    coordinates: &sequence.coordinates[start..start + axis_count],
                });
            }

            self.sequence += 1;
            self.vertex = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{GeometryFactory, GeometryOps};

    #[test]
    fn polygon_vertex_ids() {
        let factory = GeometryFactory::floating(0, 2);
        let shell = factory
            .linear_ring(2, &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 0.0])
            .unwrap();
        let hole = factory
            .linear_ring(2, &[1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0, 1.0])
            .unwrap();
        let polygon = factory.polygon(vec![shell, hole]);

        let ids: Vec<Vec<usize>> = polygon.vertices().map(|v| v.vertex_id().to_vec()).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(ids[0], vec![0, 0]);
        assert_eq!(ids[3], vec![0, 3]);
        assert_eq!(ids[4], vec![1, 0]);

        let fifth = polygon.vertices().nth(5).unwrap();
        assert_eq!((fifth.x(), fifth.y()), (2.0, 1.0));
        assert!(fifth.z().is_nan());
        assert_eq!(fifth.vertex_index(), 1);
    }

    #[test]
    fn collection_vertices_are_prefixed_with_part() {
        let factory = GeometryFactory::floating(0, 3);
        let points = factory
            .multi_point_coordinates(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let vertices: Vec<_> = points.vertices().collect();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].vertex_id(), &[1, 0]);
        assert_eq!(vertices[1].coordinates(), &[4.0, 5.0, 6.0]);
        assert_eq!(vertices[1].to_point().z(), 6.0);
    }

    #[test]
    fn empty_geometry_has_no_vertices() {
        let factory = GeometryFactory::floating(0, 2);
        assert_eq!(factory.line_string_empty().vertices().count(), 0);
        assert_eq!(factory.point_empty().vertices().count(), 0);
    }
}
