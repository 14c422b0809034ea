//! Precision model, axis count and coordinate system identity of geometries.
//!
//! A [`GeometryFactory`] is the only way to build geometries. Factories are canonical: asking for
//! the same `(srid, axis_count, scales)` configuration twice returns the same [`Arc`], so
//! geometries can compare their factories with [`Arc::ptr_eq`].
//!
//! ```
//! use std::sync::Arc;
//! use geomodel::GeometryFactory;
//!
//! let a = GeometryFactory::fixed(4326, 2, &[1000.0, 1000.0]);
//! let b = GeometryFactory::fixed(4326, 2, &[1000.0, 1000.0]);
//! let c = GeometryFactory::fixed(4326, 2, &[500.0, 500.0]);
//!
//! assert!(Arc::ptr_eq(&a, &b));
//! assert!(!Arc::ptr_eq(&a, &c));
//! assert_eq!(a.make_x_precise(1.23456), 1.235);
//! ```

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::coordinate_system::CoordinateSystem;

mod build;
mod config;
mod precision;
mod registry;

pub use config::{GeometryFactoryBuilder, GeometryFactoryConfig};
pub use precision::{make_precise, make_precise_ceil, make_precise_floor};
pub use registry::cached_factory_count;

/// Index of the X axis.
pub const AXIS_X: usize = 0;
/// Index of the Y axis.
pub const AXIS_Y: usize = 1;
/// Index of the Z axis.
pub const AXIS_Z: usize = 2;
/// Index of the M axis.
pub const AXIS_M: usize = 3;

/// Precision model, axis count and coordinate system of a family of geometries.
///
/// Instances are obtained with [`GeometryFactory::fixed`], [`GeometryFactory::floating`] and the
/// related constructors, never directly. Once created a factory is never changed.
#[derive(Debug)]
pub struct GeometryFactory {
    srid: i32,
    axis_count: usize,
    scales: Vec<f64>,
    coordinate_system: Option<CoordinateSystem>,
}

impl PartialEq for GeometryFactory {
    fn eq(&self, other: &Self) -> bool {
        self.srid == other.srid
            && self.axis_count == other.axis_count
            && self.scales == other.scales
    }
}

impl GeometryFactory {
    /// Returns the canonical factory with the given scale per axis.
    ///
    /// Missing scales, non-finite scales and scales `<= 0` mean floating precision for that axis.
    /// The axis count is clamped to `2..=4`.
    pub fn fixed(srid: i32, axis_count: usize, scales: &[f64]) -> Arc<Self> {
        let clamped = axis_count.clamp(2, 4);
        if clamped != axis_count {
            log::debug!("Axis count {axis_count} clamped to {clamped}");
        }
        let axis_count = clamped;

        let scales = (0..axis_count)
            .map(|axis| precision::normalize_scale(scales.get(axis).copied().unwrap_or(0.0)))
            .collect();
        registry::canonical(srid, axis_count, scales)
    }

    /// Returns the canonical factory with a shared XY scale and a Z scale. M stays floating.
    pub fn fixed_xy_z(srid: i32, axis_count: usize, scale_xy: f64, scale_z: f64) -> Arc<Self> {
        Self::fixed(srid, axis_count, &[scale_xy, scale_xy, scale_z])
    }

    /// Returns the canonical factory without rounding on any axis.
    pub fn floating(srid: i32, axis_count: usize) -> Arc<Self> {
        Self::fixed(srid, axis_count, &[])
    }

    /// Floating XY factory.
    pub fn floating2(srid: i32) -> Arc<Self> {
        Self::floating(srid, 2)
    }

    /// Floating XYZ factory.
    pub fn floating3(srid: i32) -> Arc<Self> {
        Self::floating(srid, 3)
    }

    /// Floating XYZ factory for geographic WGS84 coordinates (EPSG:4326).
    pub fn wgs84() -> Arc<Self> {
        Self::floating3(4326)
    }

    /// Floating XYZ factory for web mercator coordinates (EPSG:3857).
    pub fn world_mercator() -> Arc<Self> {
        Self::floating3(3857)
    }

    fn new_uncached(srid: i32, axis_count: usize, scales: Vec<f64>) -> Self {
        Self {
            srid,
            axis_count,
            scales,
            coordinate_system: CoordinateSystem::from_srid(srid),
        }
    }

    /// Spatial reference identifier, 0 if unknown.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Number of values per vertex.
    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    /// Scale for each axis.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Scale of the axis, 0 for floating axes and axes beyond the axis count.
    pub fn scale(&self, axis: usize) -> f64 {
        self.scales.get(axis).copied().unwrap_or(0.0)
    }

    /// Scale of the X axis.
    pub fn scale_xy(&self) -> f64 {
        self.scale(AXIS_X)
    }

    /// Scale of the Z axis.
    pub fn scale_z(&self) -> f64 {
        self.scale(AXIS_Z)
    }

    /// Grid size of the axis (`1 / scale`), 0 for floating axes.
    pub fn resolution(&self, axis: usize) -> f64 {
        let scale = self.scale(axis);
        if scale > 0.0 {
            1.0 / scale
        } else {
            0.0
        }
    }

    /// Whether vertices have a Z value.
    pub fn has_z(&self) -> bool {
        self.axis_count > AXIS_Z
    }

    /// Whether vertices have an M value.
    pub fn has_m(&self) -> bool {
        self.axis_count > AXIS_M
    }

    /// Whether X coordinates are stored without rounding.
    pub fn is_floating(&self) -> bool {
        self.scale(AXIS_X) == 0.0
    }

    /// Built in coordinate system definition for the SRID, if known.
    pub fn coordinate_system(&self) -> Option<&CoordinateSystem> {
        self.coordinate_system.as_ref()
    }

    /// Whether coordinates are longitude/latitude degrees.
    pub fn is_geographic(&self) -> bool {
        self.coordinate_system.is_some_and(|cs| cs.is_geographic())
    }

    /// Whether coordinates are planar in a known projected system.
    pub fn is_projected(&self) -> bool {
        self.coordinate_system.is_some_and(|cs| cs.is_projected())
    }

    /// Whether both factories describe the same coordinate system.
    pub fn is_same_coordinate_system(&self, other: &GeometryFactory) -> bool {
        self.srid == other.srid
    }

    /// Name of the axis: X, Y, Z, M or the index for further axes.
    pub fn axis_name(axis: usize) -> String {
        match axis {
            AXIS_X => "X".into(),
            AXIS_Y => "Y".into(),
            AXIS_Z => "Z".into(),
            AXIS_M => "M".into(),
            _ => axis.to_string(),
        }
    }

    /// Canonical factory with a different axis count and the same scales.
    pub fn convert_axis_count(self: &Arc<Self>, axis_count: usize) -> Arc<Self> {
        if axis_count == self.axis_count {
            self.clone()
        } else {
            Self::fixed(self.srid, axis_count, &self.scales)
        }
    }

    /// Canonical factory with different scales.
    pub fn convert_scales(self: &Arc<Self>, scales: &[f64]) -> Arc<Self> {
        Self::fixed(self.srid, self.axis_count, scales)
    }

    /// Canonical factory with a different axis count and scales.
    pub fn convert_axis_count_and_scales(
        self: &Arc<Self>,
        axis_count: usize,
        scales: &[f64],
    ) -> Arc<Self> {
        Self::fixed(self.srid, axis_count, scales)
    }

    /// Canonical factory for another SRID with the same precision model.
    pub fn convert_srid(self: &Arc<Self>, srid: i32) -> Arc<Self> {
        if srid == self.srid {
            self.clone()
        } else {
            Self::fixed(srid, self.axis_count, &self.scales)
        }
    }

    /// Rounds the value onto the grid of the axis. See [`make_precise`].
    pub fn make_precise(&self, axis: usize, value: f64) -> f64 {
        make_precise(self.scale(axis), value)
    }

    /// Rounds the value up onto the grid of the axis.
    pub fn make_precise_ceil(&self, axis: usize, value: f64) -> f64 {
        make_precise_ceil(self.scale(axis), value)
    }

    /// Rounds the value down onto the grid of the axis.
    pub fn make_precise_floor(&self, axis: usize, value: f64) -> f64 {
        make_precise_floor(self.scale(axis), value)
    }

    /// Rounds an X value.
    pub fn make_x_precise(&self, value: f64) -> f64 {
        self.make_precise(AXIS_X, value)
    }

    /// Rounds a Y value.
    pub fn make_y_precise(&self, value: f64) -> f64 {
        self.make_precise(AXIS_Y, value)
    }

    /// Rounds a Z value.
    pub fn make_z_precise(&self, value: f64) -> f64 {
        self.make_precise(AXIS_Z, value)
    }

    /// Rounds an XY pair.
    pub fn make_xy_precise(&self, xy: [f64; 2]) -> [f64; 2] {
        [self.make_x_precise(xy[0]), self.make_y_precise(xy[1])]
    }

    /// Rounds a flat coordinate array in place. The axis of each value is its index modulo the
    /// factory axis count.
    pub fn make_precise_coordinates(&self, coordinates: &mut [f64]) {
        for (i, value) in coordinates.iter_mut().enumerate() {
            *value = self.make_precise(i % self.axis_count, *value);
        }
    }
}

impl Display for GeometryFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{srid={}, axisCount={}, scales={:?}}}",
            self.srid, self.axis_count, self.scales
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_instances() {
        let a = GeometryFactory::fixed(4326, 2, &[1000.0, 1000.0]);
        let b = GeometryFactory::fixed(4326, 2, &[1000.0, 1000.0]);
        let c = GeometryFactory::fixed(4326, 2, &[500.0, 500.0]);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_ne!(a, c);

        let d = GeometryFactory::fixed(4326, 3, &[1000.0, 1000.0]);
        assert!(!Arc::ptr_eq(&a, &d));
        assert_eq!(d.scales(), &[1000.0, 1000.0, 0.0]);
    }

    #[test]
    fn floating_is_fixed_with_zero_scales() {
        let floating = GeometryFactory::floating(26910, 2);
        let fixed = GeometryFactory::fixed(26910, 2, &[-1.0, f64::NAN]);
        assert!(Arc::ptr_eq(&floating, &fixed));
        assert!(floating.is_floating());
    }

    #[test]
    fn axis_count_is_clamped() {
        let factory = GeometryFactory::floating(0, 1);
        assert_eq!(factory.axis_count(), 2);
        assert!(!factory.has_z());

        let factory = GeometryFactory::fixed(0, 7, &[]);
        assert_eq!(factory.axis_count(), 4);
        assert_eq!(factory.scales().len(), 4);
        assert!(Arc::ptr_eq(&factory, &GeometryFactory::floating(0, 4)));

        let factory = GeometryFactory::floating(0, usize::MAX);
        assert_eq!(factory.axis_count(), 4);
    }

    #[test]
    fn precision() {
        let factory = GeometryFactory::fixed(0, 3, &[1000.0, 1000.0, 10.0]);
        assert_eq!(factory.make_x_precise(1.23456), 1.235);
        assert_eq!(factory.make_y_precise(-1.23456), -1.235);
        assert_eq!(factory.make_z_precise(1.23456), 1.2);
        assert_eq!(factory.make_precise(3, 1.23456), 1.23456);
        assert_eq!(factory.resolution(AXIS_X), 0.001);
        assert_eq!(factory.resolution(AXIS_M), 0.0);

        let floating = GeometryFactory::floating(0, 2);
        assert_eq!(floating.make_x_precise(1.23456), 1.23456);
        assert!(floating.make_x_precise(f64::NAN).is_nan());
        assert_eq!(floating.make_x_precise(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn precise_coordinates() {
        let factory = GeometryFactory::fixed(0, 3, &[1.0, 1.0, 0.0]);
        let mut coordinates = [1.4, 2.6, 3.3, 4.5, 5.5, 6.6];
        factory.make_precise_coordinates(&mut coordinates);
        assert_eq!(coordinates, [1.0, 3.0, 3.3, 5.0, 6.0, 6.6]);
    }

    #[test]
    fn xy_z_scales() {
        let factory = GeometryFactory::fixed_xy_z(0, 4, 100.0, 10.0);
        assert_eq!(factory.scales(), &[100.0, 100.0, 10.0, 0.0]);
        assert_eq!(factory.scale_xy(), 100.0);
        assert_eq!(factory.scale_z(), 10.0);
        assert!(factory.has_m());
    }

    #[test]
    fn conversions_keep_canonical_instances() {
        let factory = GeometryFactory::fixed(3005, 2, &[1000.0, 1000.0]);
        assert!(Arc::ptr_eq(&factory.convert_axis_count(2), &factory));
        assert!(Arc::ptr_eq(&factory.convert_srid(3005), &factory));

        let converted = factory.convert_axis_count(3);
        assert_eq!(converted.axis_count(), 3);
        assert_eq!(converted.scales(), &[1000.0, 1000.0, 0.0]);
        assert!(Arc::ptr_eq(
            &converted,
            &GeometryFactory::fixed(3005, 3, &[1000.0, 1000.0])
        ));

        let other_srid = factory.convert_srid(4326);
        assert_eq!(other_srid.srid(), 4326);
        assert_eq!(other_srid.scales(), factory.scales());

        let rescaled = factory.convert_scales(&[1.0, 1.0]);
        assert_eq!(rescaled.scale_xy(), 1.0);
        assert_eq!(
            factory
                .convert_axis_count_and_scales(4, &[1.0, 1.0, 1.0, 1.0])
                .scales(),
            &[1.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn coordinate_systems() {
        assert!(GeometryFactory::wgs84().is_geographic());
        assert!(GeometryFactory::world_mercator().is_projected());
        assert!(GeometryFactory::floating(0, 2).coordinate_system().is_none());
        assert!(GeometryFactory::wgs84()
            .is_same_coordinate_system(&GeometryFactory::floating(4326, 2)));
    }

    #[test]
    fn axis_names() {
        assert_eq!(GeometryFactory::axis_name(AXIS_X), "X");
        assert_eq!(GeometryFactory::axis_name(AXIS_M), "M");
        assert_eq!(GeometryFactory::axis_name(5), "5");
    }

    #[test]
    fn display() {
        let factory = GeometryFactory::fixed(4326, 2, &[1000.0, 1000.0]);
        assert_eq!(
            factory.to_string(),
            "{srid=4326, axisCount=2, scales=[1000.0, 1000.0]}"
        );
    }

    #[test]
    fn registry_grows_with_new_configurations() {
        let before = cached_factory_count();
        GeometryFactory::fixed(990_001, 2, &[7.0, 7.0]);
        let after_first = cached_factory_count();
        GeometryFactory::fixed(990_001, 2, &[7.0, 7.0]);
        assert!(after_first > before);
        assert!(cached_factory_count() >= after_first);
    }
}
