use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{GeometryFactory, AXIS_Z};

/// Serializable description of a [`GeometryFactory`].
///
/// All fields are optional in the serialized form:
///
/// ```
/// use geomodel::GeometryFactoryConfig;
///
/// let config: GeometryFactoryConfig =
///     serde_json::from_str(r#"{"srid": 3005, "scaleXy": 1000.0}"#).unwrap();
/// let factory = config.to_factory();
///
/// assert_eq!(factory.srid(), 3005);
/// assert_eq!(factory.axis_count(), 2);
/// assert_eq!(factory.scales(), &[1000.0, 1000.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryFactoryConfig {
    /// Spatial reference identifier, 0 if unknown.
    pub srid: i32,
    /// Number of values per vertex.
    pub axis_count: usize,
    /// Scale of X and Y, 0 for floating.
    pub scale_xy: f64,
    /// Scale of Z, 0 for floating.
    pub scale_z: f64,
}

impl Default for GeometryFactoryConfig {
    fn default() -> Self {
        Self {
            srid: 0,
            axis_count: 2,
            scale_xy: 0.0,
            scale_z: 0.0,
        }
    }
}

impl GeometryFactoryConfig {
    /// Returns the canonical factory for the configuration.
    pub fn to_factory(&self) -> Arc<GeometryFactory> {
        GeometryFactory::fixed_xy_z(self.srid, self.axis_count, self.scale_xy, self.scale_z)
    }

    /// Parses a JSON object with the `srid`, `axisCount`, `scaleXy` and `scaleZ` keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl GeometryFactory {
    /// Returns the canonical factory for the configuration.
    pub fn create(config: &GeometryFactoryConfig) -> Arc<Self> {
        config.to_factory()
    }

    /// Configuration that produces this factory. Scales of the M axis are not represented.
    pub fn to_config(&self) -> GeometryFactoryConfig {
        GeometryFactoryConfig {
            srid: self.srid,
            axis_count: self.axis_count,
            scale_xy: self.scale_xy(),
            scale_z: self.scale(AXIS_Z),
        }
    }
}

/// Convenience type to obtain a [`GeometryFactory`].
///
/// ```
/// use geomodel::GeometryFactoryBuilder;
///
/// let factory = GeometryFactoryBuilder::default()
///     .with_srid(26910)
///     .with_axis_count(3)
///     .with_scale_xy(1000.0)
///     .with_scale_z(1.0)
///     .build();
///
/// assert_eq!(factory.scales(), &[1000.0, 1000.0, 1.0]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct GeometryFactoryBuilder {
    srid: i32,
    axis_count: Option<usize>,
    scale_xy: f64,
    scale_z: f64,
    scales: Option<Vec<f64>>,
}

impl GeometryFactoryBuilder {
    /// Sets the spatial reference identifier. Defaults to 0 (unknown).
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Sets the number of values per vertex. Defaults to 2.
    pub fn with_axis_count(mut self, axis_count: usize) -> Self {
        self.axis_count = Some(axis_count);
        self
    }

    /// Sets the scale of X and Y. Replaces scales set with [`GeometryFactoryBuilder::with_scales`].
    pub fn with_scale_xy(mut self, scale_xy: f64) -> Self {
        self.scale_xy = scale_xy;
        self.scales = None;
        self
    }

    /// Sets the scale of Z. Replaces scales set with [`GeometryFactoryBuilder::with_scales`].
    pub fn with_scale_z(mut self, scale_z: f64) -> Self {
        self.scale_z = scale_z;
        self.scales = None;
        self
    }

    /// Sets a scale for each axis.
    pub fn with_scales(mut self, scales: &[f64]) -> Self {
        self.scales = Some(scales.to_vec());
        self
    }

    /// Returns the canonical factory.
    pub fn build(self) -> Arc<GeometryFactory> {
        let axis_count = self.axis_count.unwrap_or(2);
        match self.scales {
            Some(scales) => GeometryFactory::fixed(self.srid, axis_count, &scales),
            None => GeometryFactory::fixed_xy_z(self.srid, axis_count, self.scale_xy, self.scale_z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: GeometryFactoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GeometryFactoryConfig::default());
        assert!(Arc::ptr_eq(
            &config.to_factory(),
            &GeometryFactory::floating(0, 2)
        ));
    }

    #[test]
    fn config_round_trip() {
        let factory = GeometryFactory::fixed_xy_z(3857, 3, 100.0, 10.0);
        let config = factory.to_config();
        assert!(Arc::ptr_eq(&GeometryFactory::create(&config), &factory));

        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["axisCount"], 3);
        assert_eq!(json["scaleXy"], 100.0);
        let parsed = GeometryFactoryConfig::from_json(json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn axis_count_out_of_range() {
        let config =
            GeometryFactoryConfig::from_json(serde_json::json!({ "axisCount": 12 })).unwrap();
        assert_eq!(config.to_factory().axis_count(), 4);

        let factory = GeometryFactoryBuilder::default().with_axis_count(0).build();
        assert_eq!(factory.axis_count(), 2);
    }

    #[test]
    fn builder_with_scales() {
        let factory = GeometryFactoryBuilder::default()
            .with_scales(&[10.0, 20.0])
            .build();
        assert_eq!(factory.scales(), &[10.0, 20.0]);
        assert_eq!(factory.srid(), 0);
    }
}
