use geodesy::prelude::*;

use super::{CoordinatesOperation, ProjectionService};
use crate::error::{GeometryError, Result};

/// Coordinate operation backed by a `geodesy` operator definition.
///
/// Geographic coordinates are expected as longitude and latitude in degrees.
pub struct GeodesyOperation {
    context: Minimal,
    op: OpHandle,
    forward: bool,
}

impl GeodesyOperation {
    /// Operation projecting geographic coordinates with the given definition, e.g.
    /// `"webmerc"` or `"laea lon_0=10 lat_0=52 x_0=4321000 y_0=3210000"`.
    pub fn forward(definition: &str) -> Result<Self> {
        Self::new(definition, true)
    }

    /// Operation converting projected coordinates back to geographic ones.
    pub fn inverse(definition: &str) -> Result<Self> {
        Self::new(definition, false)
    }

    fn new(definition: &str, forward: bool) -> Result<Self> {
        let mut context = Minimal::new();
        let op = context.op(definition).map_err(|err| {
            GeometryError::Collaborator(format!("invalid operator '{definition}': {err}"))
        })?;

        Ok(Self {
            context,
            op,
            forward,
        })
    }
}

impl CoordinatesOperation for GeodesyOperation {
    fn apply(&self, coordinates: &mut [f64], axis_count: usize) -> Result<()> {
        let mut data: Vec<Coor2D> = coordinates
            .chunks_exact(axis_count)
            .map(|vertex| {
                if self.forward {
                    Coor2D::geo(vertex[1], vertex[0])
                } else {
                    Coor2D([vertex[0], vertex[1]])
                }
            })
            .collect();

        let direction = if self.forward { Fwd } else { Inv };
        self.context
            .apply(self.op, direction, &mut data)
            .map_err(|err| GeometryError::Collaborator(err.to_string()))?;

        for (vertex, coord) in coordinates.chunks_exact_mut(axis_count).zip(&data) {
            let [x, y] = coord.0;
            if !x.is_finite() || !y.is_finite() {
                return Err(GeometryError::Collaborator(format!(
                    "coordinates ({}, {}) cannot be transformed",
                    vertex[0], vertex[1]
                )));
            }

            if !self.forward {
                vertex[0] = x.to_degrees();
                vertex[1] = y.to_degrees();
            } else {
                vertex[0] = x;
                vertex[1] = y;
            }
        }

        Ok(())
    }
}

/// Projection service for the coordinate systems with a built-in definition: WGS84
/// (EPSG:4326) and web mercator (EPSG:3857).
#[derive(Debug, Default, Clone, Copy)]
pub struct GeodesyProjectionService;

impl ProjectionService for GeodesyProjectionService {
    fn operation(
        &self,
        source_srid: i32,
        target_srid: i32,
    ) -> Option<Box<dyn CoordinatesOperation>> {
        let operation = match (source_srid, target_srid) {
            (4326, 3857) => GeodesyOperation::forward("webmerc"),
            (3857, 4326) => GeodesyOperation::inverse("webmerc"),
            _ => return None,
        };

        operation
            .inspect_err(|err| log::warn!("Failed to create projection operation: {err}"))
            .ok()
            .map(|op| Box::new(op) as Box<dyn CoordinatesOperation>)
    }
}
