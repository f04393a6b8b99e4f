use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{config::Config, gateways};

#[derive(Parser)]
#[command(name = "cafedb")]
#[command(author, version, about = "A directory of cafes on a map")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// URL to the SQLite database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    /// Directory of the search index
    #[arg(long, value_name = "INDEX_DIR")]
    idx_dir: Option<PathBuf>,

    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
}

pub async fn run() -> Result<()> {
    let Args {
        config_file,
        db_url,
        idx_dir,
        enable_cors,
    } = Args::parse();

    let mut cfg = Config::try_load_from_file_or_default(config_file)?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if let Some(idx_dir) = idx_dir {
        cfg.db.index_dir = Some(idx_dir);
    }
    if enable_cors {
        cfg.webserver.enable_cors = true;
    }

    log::info!("Connecting to SQLite database {}", cfg.db.conn_sqlite);
    let connections = cafedb_db_sqlite::Connections::init(
        &cfg.db.conn_sqlite,
        u32::from(cfg.db.conn_pool_size),
    )?;
    cafedb_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    let search_engine = cafedb_db_tantivy::SearchEngine::init_with_path(cfg.db.index_dir.as_ref())?;

    let geo_gw = gateways::geocoding_gateway(&cfg.geocoding);

    let web_cfg = cafedb_webserver::Cfg {
        page_size: cfg.cafes.page_size,
        nearby_radius: cfg.cafes.nearby_radius,
        default_country: cfg.cafes.default_country,
    };
    cafedb_webserver::run(
        connections,
        search_engine,
        cfg.webserver.enable_cors,
        web_cfg,
        geo_gw,
    )
    .await;
    Ok(())
}
