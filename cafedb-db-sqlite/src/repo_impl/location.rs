use super::*;
use crate::models::{LocationEntity, NewLocation};

impl<'a> LocationRepo for DbReadWrite<'a> {
    fn create_location(&self, location: &Location) -> Result<()> {
        create_location(&mut self.conn.borrow_mut(), location)
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_location_by_name(&self, name: &str) -> Result<Option<Location>> {
        try_get_location_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_locations(&self) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut())
    }
}

impl<'a> LocationRepo for DbConnection<'a> {
    fn create_location(&self, location: &Location) -> Result<()> {
        create_location(&mut self.conn.borrow_mut(), location)
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_location_by_name(&self, name: &str) -> Result<Option<Location>> {
        try_get_location_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_locations(&self) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut())
    }
}

impl<'a> LocationRepo for DbReadOnly<'a> {
    fn create_location(&self, _location: &Location) -> Result<()> {
        unreachable!();
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_location_by_name(&self, name: &str) -> Result<Option<Location>> {
        try_get_location_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_locations(&self) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut())
    }
}

impl From<LocationEntity> for Location {
    fn from(from: LocationEntity) -> Self {
        let LocationEntity {
            rowid: _,
            id,
            name,
            state,
            country,
            lat,
            lon,
            created_at,
        } = from;
        Self {
            id: id.into(),
            name,
            state,
            country,
            pos: load_pos(lat, lon),
            created_at: Timestamp::from_millis(created_at),
        }
    }
}

fn create_location(conn: &mut SqliteConnection, location: &Location) -> Result<()> {
    let (lat, lon) = store_pos(location.pos);
    let new_location = NewLocation {
        id: location.id.as_str(),
        name: &location.name,
        state: location.state.as_deref(),
        country: location.country.as_deref(),
        lat,
        lon,
        created_at: location.created_at.as_millis(),
    };
    diesel::insert_into(schema::locations::table)
        .values(&new_location)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_location(conn: &mut SqliteConnection, id: &str) -> Result<Location> {
    use schema::locations::dsl;
    Ok(schema::locations::table
        .filter(dsl::id.eq(id))
        .first::<LocationEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn try_get_location_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Location>> {
    use schema::locations::dsl;
    Ok(schema::locations::table
        .filter(dsl::name.eq(name))
        .first::<LocationEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn all_locations(conn: &mut SqliteConnection) -> Result<Vec<Location>> {
    use schema::locations::dsl;
    Ok(schema::locations::table
        .order_by(dsl::rowid)
        .load::<LocationEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}
