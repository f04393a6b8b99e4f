#[macro_use]
extern crate log;

use cafedb_core::gateways::geocode::GeoCodingGateway;
use cafedb_db_sqlite::Connections;
use cafedb_db_tantivy::SearchEngine;

mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    search_engine: SearchEngine,
    enable_cors: bool,
    cfg: Cfg,
    geo_gw: Box<dyn GeoCodingGateway + Send + Sync>,
) {
    web::run(
        connections.into(),
        search_engine.into(),
        enable_cors,
        cfg,
        geo_gw,
    )
    .await;
}
