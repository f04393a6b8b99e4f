use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::cafes_to_features;

pub const MARKER_COLOR: &str = "#00607d";
pub const MARKER_SYMBOL: &str = "circle";
pub const MARKER_SIZE: &str = "medium";

/// A GeoJSON feature that represents a single cafe on the map.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// `None` if the cafe has not been geocoded (yet).
    pub geometry: Option<Geometry>,
    pub properties: FeatureProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename = "Point")]
pub struct Geometry {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

// Marker properties are interpreted by the map renderer.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FeatureProperties {
    pub name          : String,
    pub address       : String,
    pub marker_color  : String,
    pub marker_symbol : String,
    pub marker_size   : String,
}
