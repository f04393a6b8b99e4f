use super::*;
use crate::models::NewVote;

impl<'a> VoteRepo for DbReadWrite<'a> {
    fn replace_vote(&self, vote: &Vote) -> Result<()> {
        replace_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn try_get_vote(&self, cafe_id: &str, user_id: &str) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), cafe_id, user_id)
    }
}

impl<'a> VoteRepo for DbConnection<'a> {
    fn replace_vote(&self, vote: &Vote) -> Result<()> {
        replace_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn try_get_vote(&self, cafe_id: &str, user_id: &str) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), cafe_id, user_id)
    }
}

impl<'a> VoteRepo for DbReadOnly<'a> {
    fn replace_vote(&self, _vote: &Vote) -> Result<()> {
        unreachable!();
    }
    fn try_get_vote(&self, cafe_id: &str, user_id: &str) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), cafe_id, user_id)
    }
}

fn replace_vote(conn: &mut SqliteConnection, vote: &Vote) -> Result<()> {
    let new_vote = NewVote {
        cafe_rowid: resolve_cafe_rowid(conn, &vote.cafe_id)?,
        user_rowid: resolve_user_rowid(conn, &vote.user_id)?,
        value: vote.direction.value(),
        voted_at: vote.voted_at.as_millis(),
    };
    diesel::replace_into(schema::cafe_votes::table)
        .values(&new_vote)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn try_get_vote(
    conn: &mut SqliteConnection,
    cafe_id: &str,
    user_id: &str,
) -> Result<Option<Vote>> {
    use schema::{cafe_votes::dsl, cafes::dsl as cafe_dsl, users::dsl as user_dsl};
    let row = schema::cafe_votes::table
        .inner_join(schema::cafes::table)
        .inner_join(schema::users::table)
        .select((dsl::value, dsl::voted_at))
        .filter(cafe_dsl::id.eq(cafe_id))
        .filter(user_dsl::id.eq(user_id))
        .first::<(i32, i64)>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    let Some((value, voted_at)) = row else {
        return Ok(None);
    };
    let Some(direction) = VoteDirection::try_from_value(value) else {
        log::error!("Invalid vote value in database: {value}");
        return Err(repo::Error::Other(anyhow!("invalid vote value {value}")));
    };
    Ok(Some(Vote {
        cafe_id: cafe_id.into(),
        user_id: user_id.into(),
        direction,
        voted_at: Timestamp::from_millis(voted_at),
    }))
}
