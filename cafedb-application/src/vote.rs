use super::*;

pub fn vote(
    connections: &sqlite::Connections,
    user_id: &Id,
    slug: &str,
    direction: VoteDirection,
) -> Result<Cafe> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::vote_for_cafe(conn, user_id, slug, direction))?)
}
