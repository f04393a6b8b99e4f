use std::collections::HashMap;

use rocket::{config::Config as RocketCfg, local::blocking::Client};

use cafedb_core::{
    entities::{Distance, User},
    gateways::geocode::GeoCodingGateway,
    usecases,
};

use super::{state, Cfg};

pub mod prelude {
    pub use rocket::{
        http::{ContentType, Cookie, Header, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use cafedb_boundary::Feature;
    pub use cafedb_core::{db::*, entities::*, repositories::*, usecases};

    pub use super::{
        create_cafe, login, register_user, rocket_test_setup, FakeGeoGW, DEFAULT_COUNTRY,
        PASSWORD,
    };
}

pub const DEFAULT_COUNTRY: &str = "USA";
pub const PASSWORD: &str = "secret123";

/// Resolves a fixed set of queries, everything else fails.
pub struct FakeGeoGW(HashMap<&'static str, (f64, f64)>);

impl Default for FakeGeoGW {
    fn default() -> Self {
        Self(HashMap::from([
            ("1 Main St,Springfield,IL,USA", (39.7817, -89.6501)),
            ("2 Main St,Springfield,IL,USA", (39.7820, -89.6505)),
            ("Springfield,IL,USA", (39.78, -89.65)),
            ("5 Elm St,Shelbyville,IL,USA", (39.4064, -88.7901)),
            ("Shelbyville,IL,USA", (39.41, -88.79)),
        ]))
    }
}

impl GeoCodingGateway for FakeGeoGW {
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
        self.0.get(query).copied()
    }
}

fn test_cfg() -> Cfg {
    Cfg {
        page_size: 6,
        nearby_radius: Distance::from_miles(1.0),
        default_country: Some(DEFAULT_COUNTRY.to_owned()),
    }
}

pub fn rocket_test_setup() -> (Client, state::Connections, state::SearchEngine) {
    let _ = env_logger::builder().is_test(true).try_init();
    let connections = cafedb_db_sqlite::Connections::init(":memory:", 1).unwrap();
    cafedb_db_sqlite::run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    let db = state::Connections::from(connections);
    let search_engine =
        state::SearchEngine::from(cafedb_db_tantivy::SearchEngine::init_in_ram().unwrap());
    let options = super::InstanceOptions {
        mounts: super::mounts(),
        catchers: super::catchers(),
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg: test_cfg(),
    };
    let connections = super::Connections {
        db: db.clone(),
        search_engine: search_engine.clone(),
    };
    let gateways = super::Gateways {
        geocoding: Box::new(FakeGeoGW::default()),
    };
    let rocket = super::rocket_instance(options, connections, gateways);
    let client = Client::tracked(rocket).unwrap();
    (client, db, search_engine)
}

pub fn register_user(db: &state::Connections, name: &str, email: &str, password: &str) -> User {
    usecases::create_new_user(
        &db.exclusive().unwrap(),
        usecases::NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        },
    )
    .unwrap()
}

pub fn login<'c>(
    client: &'c Client,
    email: &str,
    password: &str,
) -> rocket::local::blocking::LocalResponse<'c> {
    client
        .post("/login")
        .header(rocket::http::ContentType::Form)
        .body(format!(
            "email={}&password={password}",
            email.replace('@', "%40")
        ))
        .dispatch()
}

/// Bypasses the web layer and the search index.
pub fn create_cafe(db: &state::Connections, owner: &User, name: &str, address: &str) -> usecases::StoredCafe {
    usecases::create_new_cafe(
        &db.exclusive().unwrap(),
        &FakeGeoGW::default(),
        &owner.id,
        usecases::CafeFields {
            name: name.to_owned(),
            description: String::new(),
            address: address.to_owned(),
            city: "Springfield".to_owned(),
            state: Some("IL".to_owned()),
        },
        Some(DEFAULT_COUNTRY),
    )
    .unwrap()
}
