use super::prelude::*;

/// Record the vote of a user for a cafe.
///
/// A user has at most one vote per cafe, a new vote replaces
/// the previous one. Returns the cafe with the updated tally.
pub fn vote_for_cafe<R>(repo: &R, user_id: &Id, slug: &str, direction: VoteDirection) -> Result<Cafe>
where
    R: CafeRepo + UserRepo + VoteRepo,
{
    let cafe = repo.get_cafe_by_slug(slug)?;
    match repo.get_user(user_id.as_str()) {
        Ok(_) => {}
        Err(RepoError::NotFound) => return Err(Error::Unauthorized),
        Err(err) => return Err(err.into()),
    }
    let vote = Vote {
        cafe_id: cafe.id.clone(),
        user_id: user_id.clone(),
        direction,
        voted_at: Timestamp::now(),
    };
    log::debug!("User {user_id} votes {direction:?} for cafe '{}'", cafe.slug);
    repo.replace_vote(&vote)?;
    Ok(repo.get_cafe(cafe.id.as_str())?)
}

/// The direction of the current vote of the user, if any.
pub fn own_vote<R: VoteRepo>(repo: &R, cafe: &Cafe, user_id: &Id) -> Result<Option<VoteDirection>> {
    let vote = repo.try_get_vote(cafe.id.as_str(), user_id.as_str())?;
    Ok(vote.map(|vote| vote.direction))
}
