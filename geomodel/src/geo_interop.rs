//! Conversions between geometries and the `geo-types` crate.
//!
//! `geo-types` geometries are two dimensional, Z and M values are dropped when converting to
//! them and set to NaN when converting back.

use std::sync::Arc;

use geo_types::{coord, Coord};

use crate::collection::{MultiLineString, MultiPoint, MultiPolygon};
use crate::error::Result;
use crate::factory::GeometryFactory;
use crate::geometry::{Geometry, GeometryOps};
use crate::line_string::{LineString, LineStringOps};
use crate::linear_ring::LinearRing;
use crate::point::Point;
use crate::polygon::Polygon;

fn coords<L: LineStringOps + ?Sized>(line: &L) -> Vec<Coord<f64>> {
    (0..line.vertex_count())
        .map(|i| coord! { x: line.x(i), y: line.y(i) })
        .collect()
}

fn xy(coords: impl IntoIterator<Item = Coord<f64>>) -> Vec<f64> {
    coords.into_iter().flat_map(|c| [c.x, c.y]).collect()
}

impl Point {
    /// XY point of `geo-types`, `None` for the empty point.
    pub fn to_geo_types(&self) -> Option<geo_types::Point<f64>> {
        if self.is_empty() {
            None
        } else {
            Some(geo_types::Point::new(self.x(), self.y()))
        }
    }
}

impl From<&LineString> for geo_types::LineString<f64> {
    fn from(line: &LineString) -> Self {
        geo_types::LineString(coords(line))
    }
}

impl From<&LinearRing> for geo_types::LineString<f64> {
    fn from(ring: &LinearRing) -> Self {
        geo_types::LineString(coords(ring))
    }
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let exterior = polygon
            .shell()
            .map(Into::into)
            .unwrap_or_else(|| geo_types::LineString(vec![]));
        let interiors = (0..polygon.hole_count())
            .filter_map(|i| polygon.hole(i))
            .map(Into::into)
            .collect();
        geo_types::Polygon::new(exterior, interiors)
    }
}

impl From<&MultiPoint> for geo_types::MultiPoint<f64> {
    fn from(points: &MultiPoint) -> Self {
        geo_types::MultiPoint(points.parts().iter().filter_map(Point::to_geo_types).collect())
    }
}

impl From<&MultiLineString> for geo_types::MultiLineString<f64> {
    fn from(lines: &MultiLineString) -> Self {
        geo_types::MultiLineString(lines.parts().iter().map(Into::into).collect())
    }
}

impl From<&MultiPolygon> for geo_types::MultiPolygon<f64> {
    fn from(polygons: &MultiPolygon) -> Self {
        geo_types::MultiPolygon(polygons.parts().iter().map(Into::into).collect())
    }
}

impl Geometry {
    /// Geometry of `geo-types`, `None` for an empty point. Rings become line strings.
    pub fn to_geo_types(&self) -> Option<geo_types::Geometry<f64>> {
        Some(match self {
            Geometry::Point(point) => geo_types::Geometry::Point(point.to_geo_types()?),
            Geometry::LineString(line) => geo_types::Geometry::LineString(line.into()),
            Geometry::LinearRing(ring) => geo_types::Geometry::LineString(ring.into()),
            Geometry::Polygon(polygon) => geo_types::Geometry::Polygon(polygon.into()),
            Geometry::MultiPoint(points) => geo_types::Geometry::MultiPoint(points.into()),
            Geometry::MultiLineString(lines) => {
                geo_types::Geometry::MultiLineString(lines.into())
            }
            Geometry::MultiPolygon(polygons) => {
                geo_types::Geometry::MultiPolygon(polygons.into())
            }
            Geometry::GeometryCollection(collection) => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(
                    collection
                        .parts()
                        .iter()
                        .filter_map(Geometry::to_geo_types)
                        .collect(),
                ))
            }
        })
    }
}

impl GeometryFactory {
    fn polygon_from_geo_types(
        self: &Arc<Self>,
        polygon: &geo_types::Polygon<f64>,
    ) -> Result<Polygon> {
        let rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(|ring| self.linear_ring(2, &xy(ring.coords().copied())))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.polygon(rings))
    }

    /// Builds a geometry of this factory from a `geo-types` geometry. Rectangles and triangles
    /// become polygons, lines become line strings.
    pub fn geometry_from_geo_types(
        self: &Arc<Self>,
        geometry: &geo_types::Geometry<f64>,
    ) -> Result<Geometry> {
        use geo_types::Geometry as G;

        Ok(match geometry {
            G::Point(point) => self.point_xy(point.x(), point.y()).into(),
            G::Line(line) => self.line_string(2, &xy([line.start, line.end]))?.into(),
            G::LineString(line) => self.line_string(2, &xy(line.coords().copied()))?.into(),
            G::Polygon(polygon) => self.polygon_from_geo_types(polygon)?.into(),
            G::MultiPoint(points) => self
                .multi_point(points.iter().map(|p| self.point_xy(p.x(), p.y())).collect())
                .into(),
            G::MultiLineString(lines) => {
                let lines = lines
                    .iter()
                    .map(|line| self.line_string(2, &xy(line.coords().copied())))
                    .collect::<Result<Vec<_>>>()?;
                self.multi_line_string(lines).into()
            }
            G::MultiPolygon(polygons) => {
                let polygons = polygons
                    .iter()
                    .map(|polygon| self.polygon_from_geo_types(polygon))
                    .collect::<Result<Vec<_>>>()?;
                self.multi_polygon(polygons).into()
            }
            G::GeometryCollection(collection) => {
                let parts = collection
                    .iter()
                    .map(|part| self.geometry_from_geo_types(part))
                    .collect::<Result<Vec<_>>>()?;
                self.geometry_collection(parts)
            }
            G::Rect(rect) => self.polygon_from_geo_types(&rect.to_polygon())?.into(),
            G::Triangle(triangle) => self.polygon_from_geo_types(&triangle.to_polygon())?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryKind;
    use geo_types::{line_string, polygon, Rect};

    #[test]
    fn polygon_round_trip() {
        let factory = GeometryFactory::floating(0, 3);
        let source = polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 0.0, y: 10.0), (x: 10.0, y: 10.0), (x: 10.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0)]],
        ];

        let geometry = factory
            .geometry_from_geo_types(&geo_types::Geometry::Polygon(source.clone()))
            .unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(geometry.axis_count(), 3);
        let polygon = geometry.as_polygon().unwrap();
        assert_eq!(polygon.hole_count(), 1);
        assert!(polygon.shell().unwrap().z(0).is_nan());

        assert_eq!(
            geometry.to_geo_types(),
            Some(geo_types::Geometry::Polygon(source))
        );
    }

    #[test]
    fn lines_and_rectangles() {
        let factory = GeometryFactory::fixed(0, 2, &[1.0, 1.0]);
        let line = factory
            .geometry_from_geo_types(&geo_types::Geometry::LineString(
                line_string![(x: 0.4, y: 0.6), (x: 5.2, y: 4.9)],
            ))
            .unwrap();
        assert_eq!(
            line.as_line_string().unwrap().coordinates(),
            &[0.0, 1.0, 5.0, 5.0]
        );

        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 3.0 });
        let polygon = factory
            .geometry_from_geo_types(&geo_types::Geometry::Rect(rect))
            .unwrap();
        assert_eq!(polygon.area(), 6.0);
    }

    #[test]
    fn empty_point_has_no_counterpart() {
        let factory = GeometryFactory::floating(0, 2);
        assert_eq!(factory.point_empty().to_geo_types(), None);
        let collection = factory.geometry_collection(vec![
            factory.point_xy(1.0, 2.0).into(),
            factory.line_string(2, &[0.0, 0.0, 1.0, 1.0]).unwrap().into(),
        ]);
        let converted = collection.to_geo_types().unwrap();
        assert!(matches!(
            converted,
            geo_types::Geometry::GeometryCollection(ref parts) if parts.0.len() == 2
        ));
    }
}
