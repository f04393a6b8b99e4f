use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use cafedb_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod cafe;
mod comment;
mod location;
mod user;
mod vote;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_pos(lat: Option<f64>, lon: Option<f64>) -> Option<MapPoint> {
    let (lat, lon) = lat.zip(lon)?;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lon);
    if pos.is_none() {
        // This should never happen if positions have been validated properly on insert
        log::error!("Invalid position in database: ({lat}, {lon})");
    }
    pos
}

fn store_pos(pos: Option<MapPoint>) -> (Option<f64>, Option<f64>) {
    pos.map(MapPoint::to_lat_lng_deg).unzip()
}

fn resolve_user_rowid(conn: &mut SqliteConnection, id: &Id) -> Result<i64> {
    use schema::users::dsl;
    schema::users::table
        .select(dsl::rowid)
        .filter(dsl::id.eq(id.as_str()))
        .first::<i64>(conn)
        .map_err(|err| {
            log::warn!("Failed to resolve user id '{id}': {err}");
            err
        })
        .map_err(from_diesel_err)
}

fn resolve_cafe_rowid(conn: &mut SqliteConnection, id: &Id) -> Result<i64> {
    use schema::cafes::dsl;
    schema::cafes::table
        .select(dsl::rowid)
        .filter(dsl::id.eq(id.as_str()))
        .first::<i64>(conn)
        .map_err(|err| {
            log::warn!("Failed to resolve cafe id '{id}': {err}");
            err
        })
        .map_err(from_diesel_err)
}

fn resolve_location_rowid(conn: &mut SqliteConnection, id: &Id) -> Result<i64> {
    use schema::locations::dsl;
    schema::locations::table
        .select(dsl::rowid)
        .filter(dsl::id.eq(id.as_str()))
        .first::<i64>(conn)
        .map_err(|err| {
            log::warn!("Failed to resolve location id '{id}': {err}");
            err
        })
        .map_err(from_diesel_err)
}
