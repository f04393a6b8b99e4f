pub mod prelude {

    use std::{cell::RefCell, collections::HashMap};

    pub use cafedb_core::{
        db::*,
        entities::*,
        gateways::geocode::GeoCodingGateway,
        repositories::{Error as RepoError, *},
        usecases,
        util::paging::PageRequest,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub mod tantivy {
        pub use cafedb_db_tantivy::SearchEngine;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    pub const DEFAULT_COUNTRY: &str = "USA";
    pub const PASSWORD: &str = "secret123";

    pub fn brew_co() -> usecases::CafeFields {
        usecases::CafeFields {
            name: "Brew Co".into(),
            description: "Single origin pour over".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: Some("IL".into()),
        }
    }

    /// Resolves a fixed set of queries, everything else fails.
    pub struct FakeGeoCoder(HashMap<&'static str, (f64, f64)>);

    impl Default for FakeGeoCoder {
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

    impl GeoCodingGateway for FakeGeoCoder {
        fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
            self.0.get(query).copied()
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub search_engine: RefCell<tantivy::SearchEngine>,
        pub geocoder: FakeGeoCoder,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            cafedb_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            let search_engine = tantivy::SearchEngine::init_in_ram().unwrap();
            Self {
                db_connections,
                search_engine: RefCell::new(search_engine),
                geocoder: FakeGeoCoder::default(),
            }
        }

        pub fn register(&self, name: &str) -> User {
            flows::register_user(
                &self.db_connections,
                usecases::NewUser {
                    name: name.into(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    password: PASSWORD.into(),
                },
            )
            .unwrap()
        }

        pub fn create_cafe(&self, owner: &User, fields: usecases::CafeFields) -> usecases::StoredCafe {
            flows::create_cafe(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                &self.geocoder,
                &owner.id,
                fields,
                Some(DEFAULT_COUNTRY),
            )
            .unwrap()
        }

        pub fn get_cafe(&self, slug: &str) -> Cafe {
            self.db_connections
                .shared()
                .unwrap()
                .get_cafe_by_slug(slug)
                .unwrap()
        }

        pub fn count_cafes(&self) -> u64 {
            self.db_connections.shared().unwrap().count_cafes().unwrap()
        }

        pub fn search(&self, text: &str) -> usecases::CafeSearchResult {
            usecases::search_cafes(
                &self.db_connections.shared().unwrap(),
                &*self.search_engine.borrow(),
                text,
                PageRequest::default(),
            )
            .unwrap()
        }
    }
}
