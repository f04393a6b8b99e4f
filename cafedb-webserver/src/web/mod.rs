use cafedb_application::prelude::index_all_locations;
use cafedb_core::{entities::Distance, gateways::geocode::GeoCodingGateway};
use rocket::{config::Config as RocketCfg, Catcher, Rocket, Route};

mod error;
mod frontend;
mod guards;
pub(crate) mod state;

#[cfg(test)]
pub mod tests;

#[derive(Debug, Clone)]
pub struct Cfg {
    /// Number of cafes per page
    pub page_size: u64,
    /// Cafes within this distance are listed as nearby
    pub nearby_radius: Distance,
    /// Assigned to new cafes, the forms don't ask for a country
    pub default_country: Option<String>,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    catchers: Vec<(&'static str, Vec<Catcher>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) struct Gateways {
    geocoding: Box<dyn GeoCodingGateway + Send + Sync>,
}

pub(crate) struct Connections {
    db: state::Connections,
    search_engine: state::SearchEngine,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    connections: Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        catchers,
        rocket_cfg,
        cfg,
    } = options;
    let Connections {
        db,
        mut search_engine,
    } = connections;
    let Gateways { geocoding } = gateways;

    info!("Indexing all locations...");
    if let Err(err) = index_all_locations(&db, &mut *search_engine) {
        error!("Failed to build the location index: {err}");
    }

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(db)
        .manage(search_engine)
        .manage(guards::GeoCoding(geocoding))
        .manage(cfg);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    for (m, c) in catchers {
        instance = instance.register(m, c);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/", frontend::routes())]
}

fn catchers() -> Vec<(&'static str, Vec<Catcher>)> {
    vec![("/", frontend::catchers())]
}

pub async fn run(
    db: state::Connections,
    search_engine: state::SearchEngine,
    enable_cors: bool,
    cfg: Cfg,
    geocoding: Box<dyn GeoCodingGateway + Send + Sync>,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        catchers: catchers(),
        rocket_cfg: None,
        cfg,
    };
    let connections = Connections { db, search_engine };
    let gateways = Gateways { geocoding };

    let mut instance = rocket_instance(options, connections, gateways);
    if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => {
                instance = instance.attach(cors);
            }
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    }
    if let Err(err) = instance.launch().await {
        error!("Unable to run web server: {err}");
    }
}
