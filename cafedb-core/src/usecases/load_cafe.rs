use super::{nearby_cafes::*, prelude::*};

pub fn get_cafe_by_slug<R: CafeRepo>(repo: &R, slug: &str) -> Result<Cafe> {
    Ok(repo.get_cafe_by_slug(slug)?)
}

/// Everything that is shown on the page of a single cafe.
#[derive(Debug, Clone)]
pub struct CafeDetails {
    pub cafe: Cafe,
    pub location: Option<Location>,
    pub comments: Vec<Comment>,
    pub nearby: Vec<NearbyCafe>,
}

pub fn load_cafe_details<R: Db>(repo: &R, slug: &str, radius: Distance) -> Result<CafeDetails> {
    let cafe = repo.get_cafe_by_slug(slug)?;
    let location = match &cafe.location_id {
        Some(id) => match repo.get_location(id.as_str()) {
            Ok(location) => Some(location),
            Err(RepoError::NotFound) => {
                log::warn!("Location {id} of cafe '{}' not found", cafe.slug);
                None
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };
    let comments = repo.load_comments_of_cafe(cafe.id.as_str())?;
    let nearby = nearby_cafes(repo, &cafe, radius)?;
    Ok(CafeDetails {
        cafe,
        location,
        comments,
        nearby,
    })
}
