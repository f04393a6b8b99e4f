use anyhow::{anyhow, Result};
use cafedb_core::entities::Distance;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "cafedb.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

const DEFAULT_PAGE_SIZE: u64 = 6;

pub struct Config {
    pub db: Db,
    pub geocoding: Geocoding,
    pub cafes: Cafes,
    pub webserver: WebServer,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::default()
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
    /// File system directory for the full-text search index.
    pub index_dir: Option<PathBuf>,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

pub struct Cafes {
    /// Used for cafes that are submitted without a country.
    pub default_country: Option<String>,
    pub page_size: u64,
    pub nearby_radius: Distance,
}

pub struct WebServer {
    pub enable_cors: bool,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        // Sections missing in the given file are taken from the embedded defaults.
        let defaults = raw::Config::embedded_default()?;

        let raw::Config {
            db,
            geocoding,
            gateway,
            cafes,
            webserver,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
            index_dir,
        } = db
            .or(defaults.db)
            .ok_or_else(|| anyhow!("Missing DB configuration"))?;

        if connection_pool_size == 0 {
            return Err(anyhow!("The DB connection pool must not be empty"));
        }

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
            index_dir,
        };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let gateway = gateway.ok_or_else(|| anyhow!("Missing gateway configuration"))?;
                let gw = match gw_name {
                    raw::GeocodingGateway::Opencage => {
                        let raw::OpenCage { api_key } = gateway
                            .opencage
                            .ok_or_else(|| anyhow!("Missing 'opencage' gateway configuration"))?;
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Cafes {
            default_country,
            page_size,
            nearby_radius_meters,
        } = cafes
            .or(defaults.cafes)
            .ok_or_else(|| anyhow!("Missing cafes configuration"))?;

        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(anyhow!("Invalid page size: {page_size}"));
        }
        let nearby_radius = match nearby_radius_meters {
            Some(m) if m.is_finite() && m > 0.0 => Distance::from_meters(m),
            Some(m) => return Err(anyhow!("Invalid nearby radius: {m} m")),
            None => Distance::from_miles(1.0),
        };
        let default_country = default_country
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());
        let cafes = Cafes {
            default_country,
            page_size,
            nearby_radius,
        };

        let raw::WebServer { cors } = webserver
            .or(defaults.webserver)
            .ok_or_else(|| anyhow!("Missing webserver configuration"))?;

        let webserver = WebServer { enable_cors: cors };

        Ok(Self {
            db,
            geocoding,
            cafes,
            webserver,
        })
    }
}
