use cafedb_core::gateways::geocode::GeoCodingGateway;
use geocoding::{Forward, Opencage, Point};

/// Forward geocoding with the [OpenCage](https://opencagedata.com) API.
#[derive(Debug, Clone)]
pub struct OpenCage {
    api_key: Option<String>,
}

impl OpenCage {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No OpenCage API key found");
        }
        Self { api_key }
    }
}

// The first result is the best match.
fn first_lat_lng(points: &[Point<f64>]) -> Option<(f64, f64)> {
    points.first().map(|point| (point.y(), point.x()))
}

fn forward(api_key: String, query: &str) -> Option<(f64, f64)> {
    let oc_req = Opencage::new(api_key);
    match oc_req.forward(query) {
        Ok(res) => {
            let lat_lng = first_lat_lng(&res);
            if let Some(lat_lng) = lat_lng {
                log::debug!("Resolved location '{query}': {lat_lng:?}");
            } else {
                log::info!("Unknown location '{query}'");
            }
            lat_lng
        }
        Err(err) => {
            log::warn!("Failed to resolve location '{query}': {err}");
            None
        }
    }
}

impl GeoCodingGateway for OpenCage {
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
        let api_key = self.api_key.clone()?;
        if query.trim().is_empty() {
            return None;
        }
        // The blocking HTTP client must not be created or dropped on
        // a thread of the async runtime.
        std::thread::scope(|scope| {
            scope
                .spawn(|| forward(api_key, query))
                .join()
                .unwrap_or_else(|_| {
                    log::error!("Geocoding of '{query}' panicked");
                    None
                })
        })
    }
}
