use super::*;
use crate::models::{JoinedCafe, NewCafe};

impl<'a> CafeRepo for DbReadWrite<'a> {
    fn create_cafe(&self, cafe: &Cafe) -> Result<()> {
        create_cafe(&mut self.conn.borrow_mut(), cafe)
    }
    fn update_cafe(&self, cafe: &Cafe) -> Result<()> {
        update_cafe(&mut self.conn.borrow_mut(), cafe)
    }
    fn delete_cafe(&self, id: &str) -> Result<()> {
        delete_cafe(&mut self.conn.borrow_mut(), id)
    }
    fn get_cafe(&self, id: &str) -> Result<Cafe> {
        get_cafe(&mut self.conn.borrow_mut(), id)
    }
    fn get_cafe_by_slug(&self, slug: &str) -> Result<Cafe> {
        get_cafe_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn count_cafes(&self) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), None)
    }
    fn list_cafes(&self, pagination: &Pagination) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), None, pagination)
    }
    fn count_cafes_of_location(&self, location_id: &str) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), Some(location_id))
    }
    fn list_cafes_of_location(
        &self,
        location_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), Some(location_id), pagination)
    }
    fn cafes_within(&self, bbox: &MapBbox) -> Result<Vec<Cafe>> {
        cafes_within(&mut self.conn.borrow_mut(), bbox)
    }
}

impl<'a> CafeRepo for DbConnection<'a> {
    fn create_cafe(&self, cafe: &Cafe) -> Result<()> {
        create_cafe(&mut self.conn.borrow_mut(), cafe)
    }
    fn update_cafe(&self, cafe: &Cafe) -> Result<()> {
        update_cafe(&mut self.conn.borrow_mut(), cafe)
    }
    fn delete_cafe(&self, id: &str) -> Result<()> {
        delete_cafe(&mut self.conn.borrow_mut(), id)
    }
    fn get_cafe(&self, id: &str) -> Result<Cafe> {
        get_cafe(&mut self.conn.borrow_mut(), id)
    }
    fn get_cafe_by_slug(&self, slug: &str) -> Result<Cafe> {
        get_cafe_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn count_cafes(&self) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), None)
    }
    fn list_cafes(&self, pagination: &Pagination) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), None, pagination)
    }
    fn count_cafes_of_location(&self, location_id: &str) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), Some(location_id))
    }
    fn list_cafes_of_location(
        &self,
        location_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), Some(location_id), pagination)
    }
    fn cafes_within(&self, bbox: &MapBbox) -> Result<Vec<Cafe>> {
        cafes_within(&mut self.conn.borrow_mut(), bbox)
    }
}

impl<'a> CafeRepo for DbReadOnly<'a> {
    fn create_cafe(&self, _cafe: &Cafe) -> Result<()> {
        unreachable!();
    }
    fn update_cafe(&self, _cafe: &Cafe) -> Result<()> {
        unreachable!();
    }
    fn delete_cafe(&self, _id: &str) -> Result<()> {
        unreachable!();
    }
    fn get_cafe(&self, id: &str) -> Result<Cafe> {
        get_cafe(&mut self.conn.borrow_mut(), id)
    }
    fn get_cafe_by_slug(&self, slug: &str) -> Result<Cafe> {
        get_cafe_by_slug(&mut self.conn.borrow_mut(), slug)
    }
    fn count_cafes(&self) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), None)
    }
    fn list_cafes(&self, pagination: &Pagination) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), None, pagination)
    }
    fn count_cafes_of_location(&self, location_id: &str) -> Result<u64> {
        count_cafes(&mut self.conn.borrow_mut(), Some(location_id))
    }
    fn list_cafes_of_location(
        &self,
        location_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Cafe>> {
        list_cafes(&mut self.conn.borrow_mut(), Some(location_id), pagination)
    }
    fn cafes_within(&self, bbox: &MapBbox) -> Result<Vec<Cafe>> {
        cafes_within(&mut self.conn.borrow_mut(), bbox)
    }
}

// All cafe queries share the same joins and columns.
macro_rules! joined_cafes {
    () => {
        schema::cafes::table
            .inner_join(schema::users::table)
            .left_join(schema::locations::table)
            .select((
                schema::cafes::rowid,
                schema::cafes::id,
                schema::cafes::slug,
                schema::cafes::name,
                schema::cafes::description,
                schema::cafes::address,
                schema::cafes::city,
                schema::cafes::state,
                schema::cafes::country,
                schema::cafes::lat,
                schema::cafes::lon,
                schema::cafes::created_at,
                schema::cafes::updated_at,
                schema::users::id,
                schema::users::name,
                schema::locations::id.nullable(),
            ))
    };
}

fn new_cafe<'a>(
    cafe: &'a Cafe,
    owner_rowid: i64,
    location_rowid: Option<i64>,
) -> NewCafe<'a> {
    let (lat, lon) = store_pos(cafe.pos);
    NewCafe {
        id: cafe.id.as_str(),
        slug: cafe.slug.as_str(),
        name: &cafe.name,
        description: &cafe.description,
        address: &cafe.address,
        city: &cafe.city,
        state: cafe.state.as_deref(),
        country: cafe.country.as_deref(),
        lat,
        lon,
        owner_rowid,
        location_rowid,
        created_at: cafe.created_at.as_millis(),
        updated_at: cafe.updated_at.as_millis(),
    }
}

fn resolve_cafe_relations(
    conn: &mut SqliteConnection,
    cafe: &Cafe,
) -> Result<(i64, Option<i64>)> {
    let owner_rowid = resolve_user_rowid(conn, &cafe.owner.id)?;
    let location_rowid = cafe
        .location_id
        .as_ref()
        .map(|id| resolve_location_rowid(conn, id))
        .transpose()?;
    Ok((owner_rowid, location_rowid))
}

fn create_cafe(conn: &mut SqliteConnection, cafe: &Cafe) -> Result<()> {
    let (owner_rowid, location_rowid) = resolve_cafe_relations(conn, cafe)?;
    diesel::insert_into(schema::cafes::table)
        .values(&new_cafe(cafe, owner_rowid, location_rowid))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_cafe(conn: &mut SqliteConnection, cafe: &Cafe) -> Result<()> {
    use schema::cafes::dsl;
    let (owner_rowid, location_rowid) = resolve_cafe_relations(conn, cafe)?;
    let count = diesel::update(schema::cafes::table.filter(dsl::id.eq(cafe.id.as_str())))
        .set(&new_cafe(cafe, owner_rowid, location_rowid))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

// Votes and comments are deleted by cascade.
fn delete_cafe(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::cafes::dsl;
    let count = diesel::delete(schema::cafes::table.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn vote_tally(conn: &mut SqliteConnection, cafe_rowid: i64) -> Result<i64> {
    use schema::cafe_votes::dsl;
    let sum = schema::cafe_votes::table
        .select(diesel::dsl::sum(dsl::value))
        .filter(dsl::cafe_rowid.eq(cafe_rowid))
        .first::<Option<i64>>(conn)
        .map_err(from_diesel_err)?;
    Ok(sum.unwrap_or_default())
}

fn load_cafe(conn: &mut SqliteConnection, joined: JoinedCafe) -> Result<Cafe> {
    let JoinedCafe {
        rowid,
        id,
        slug,
        name,
        description,
        address,
        city,
        state,
        country,
        lat,
        lon,
        created_at,
        updated_at,
        owner_id,
        owner_name,
        location_id,
    } = joined;
    let votes = vote_tally(conn, rowid)?;
    Ok(Cafe {
        id: id.into(),
        slug: slug.into(),
        name,
        description,
        address,
        city,
        state,
        country,
        pos: load_pos(lat, lon),
        owner: CafeOwner {
            id: owner_id.into(),
            name: owner_name,
        },
        location_id: location_id.map(Into::into),
        votes,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_cafes(conn: &mut SqliteConnection, rows: Vec<JoinedCafe>) -> Result<Vec<Cafe>> {
    rows.into_iter().map(|row| load_cafe(conn, row)).collect()
}

fn get_cafe(conn: &mut SqliteConnection, id: &str) -> Result<Cafe> {
    let row = joined_cafes!()
        .filter(schema::cafes::id.eq(id))
        .first::<JoinedCafe>(conn)
        .map_err(from_diesel_err)?;
    load_cafe(conn, row)
}

fn get_cafe_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<Cafe> {
    let row = joined_cafes!()
        .filter(schema::cafes::slug.eq(slug))
        .first::<JoinedCafe>(conn)
        .map_err(from_diesel_err)?;
    load_cafe(conn, row)
}

fn count_cafes(conn: &mut SqliteConnection, location_id: Option<&str>) -> Result<u64> {
    let mut query = schema::cafes::table
        .left_join(schema::locations::table)
        .select(diesel::dsl::count_star())
        .into_boxed();
    if let Some(location_id) = location_id {
        query = query.filter(schema::locations::id.eq(location_id));
    }
    let count = query.first::<i64>(conn).map_err(from_diesel_err)?;
    Ok(count as u64)
}

// Page numbers are user input and may exceed the range of SQLite integers
fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn list_cafes(
    conn: &mut SqliteConnection,
    location_id: Option<&str>,
    pagination: &Pagination,
) -> Result<Vec<Cafe>> {
    let mut query = joined_cafes!()
        .order_by((schema::cafes::created_at, schema::cafes::rowid))
        .into_boxed();
    if let Some(location_id) = location_id {
        query = query.filter(schema::locations::id.eq(location_id));
    }
    // Sqlite only accepts an offset together with a limit
    let offset = pagination.offset.map(saturating_i64).unwrap_or(0);
    let limit = pagination.limit.map(saturating_i64).unwrap_or(-1);
    if offset > 0 || limit >= 0 {
        query = query.limit(limit).offset(offset);
    }
    let rows = query.load::<JoinedCafe>(conn).map_err(from_diesel_err)?;
    load_cafes(conn, rows)
}

fn cafes_within(conn: &mut SqliteConnection, bbox: &MapBbox) -> Result<Vec<Cafe>> {
    use schema::cafes::dsl;
    let sw = bbox.south_west();
    let ne = bbox.north_east();
    let mut query = joined_cafes!()
        .filter(dsl::lat.between(sw.lat_deg(), ne.lat_deg()))
        .order_by((dsl::created_at, dsl::rowid))
        .into_boxed();
    if bbox.wraps_antimeridian() {
        query = query.filter(dsl::lon.ge(sw.lng_deg()).or(dsl::lon.le(ne.lng_deg())));
    } else {
        query = query.filter(dsl::lon.between(sw.lng_deg(), ne.lng_deg()));
    }
    let rows = query.load::<JoinedCafe>(conn).map_err(from_diesel_err)?;
    let cafes = load_cafes(conn, rows)?;
    Ok(cafes
        .into_iter()
        .filter(|c| c.pos.is_some_and(|pos| bbox.contains_point(pos)))
        .collect())
}
