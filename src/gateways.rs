use crate::config;
use cafedb_core::gateways::geocode::GeoCodingGateway;
use cafedb_gateways::opencage::OpenCage;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Box<dyn GeoCodingGateway + Send + Sync> {
    match &cfg.gateway {
        Some(config::GeocodingGateway::OpenCage { api_key }) => {
            log::info!("Use OpenCage geocoding gateway");
            Box::new(OpenCage::new(Some(api_key.clone())))
        }
        None => {
            log::warn!("No geocoding gateway was configured: cafes will not be placed on the map");
            Box::new(DummyGeoGw)
        }
    }
}

struct DummyGeoGw;

impl GeoCodingGateway for DummyGeoGw {
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
        log::debug!("Cannot resolve '{query}' because no geocoding gateway was configured");
        None
    }
}
