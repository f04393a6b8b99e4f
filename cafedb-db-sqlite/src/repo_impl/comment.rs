use super::*;
use crate::models::{JoinedComment, NewComment};

impl<'a> CommentRepo for DbReadWrite<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comments_of_cafe(&self, cafe_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_cafe(&mut self.conn.borrow_mut(), cafe_id)
    }
}

impl<'a> CommentRepo for DbConnection<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comments_of_cafe(&self, cafe_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_cafe(&mut self.conn.borrow_mut(), cafe_id)
    }
}

impl<'a> CommentRepo for DbReadOnly<'a> {
    fn create_comment(&self, _comment: &Comment) -> Result<()> {
        unreachable!();
    }
    fn load_comments_of_cafe(&self, cafe_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_cafe(&mut self.conn.borrow_mut(), cafe_id)
    }
}

impl From<JoinedComment> for Comment {
    fn from(from: JoinedComment) -> Self {
        let JoinedComment {
            id,
            author_name,
            text,
            created_at,
            cafe_id,
        } = from;
        Self {
            id: id.into(),
            cafe_id: cafe_id.into(),
            created_at: Timestamp::from_millis(created_at),
            author_name,
            text,
        }
    }
}

fn create_comment(conn: &mut SqliteConnection, comment: &Comment) -> Result<()> {
    let cafe_rowid = resolve_cafe_rowid(conn, &comment.cafe_id)?;
    let new_comment = NewComment {
        id: comment.id.as_str(),
        cafe_rowid,
        author_name: comment.author_name.as_deref(),
        text: &comment.text,
        created_at: comment.created_at.as_millis(),
    };
    diesel::insert_into(schema::cafe_comments::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn load_comments_of_cafe(conn: &mut SqliteConnection, cafe_id: &str) -> Result<Vec<Comment>> {
    use schema::{cafe_comments::dsl, cafes::dsl as cafe_dsl};
    Ok(schema::cafe_comments::table
        .inner_join(schema::cafes::table)
        .select((
            dsl::id,
            dsl::author_name,
            dsl::text,
            dsl::created_at,
            cafe_dsl::id,
        ))
        .filter(cafe_dsl::id.eq(cafe_id))
        .order_by((dsl::created_at, dsl::rowid))
        .load::<JoinedComment>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}
