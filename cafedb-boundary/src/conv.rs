use super::*;
use cafedb_entities as e;

impl From<e::geo::MapPoint> for Geometry {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self {
            coordinates: [lng, lat],
        }
    }
}

impl From<&e::cafe::Cafe> for Feature {
    fn from(from: &e::cafe::Cafe) -> Self {
        Self {
            geometry: from.pos.map(Into::into),
            properties: FeatureProperties {
                name: from.name.clone(),
                address: from.address.clone(),
                marker_color: MARKER_COLOR.to_owned(),
                marker_symbol: MARKER_SYMBOL.to_owned(),
                marker_size: MARKER_SIZE.to_owned(),
            },
        }
    }
}

/// One feature per cafe in the same order.
pub fn cafes_to_features<'a>(cafes: impl IntoIterator<Item = &'a e::cafe::Cafe>) -> Vec<Feature> {
    cafes.into_iter().map(Feature::from).collect()
}
