use super::prelude::*;

/// Delete a cafe together with its votes and comments.
///
/// Only the owner is allowed to delete a cafe. Returns
/// the deleted cafe.
pub fn delete_cafe<R: CafeRepo>(repo: &R, editor_id: &Id, slug: &str) -> Result<Cafe> {
    let cafe = repo.get_cafe_by_slug(slug)?;
    if !cafe.is_owned_by(editor_id) {
        return Err(Error::Forbidden);
    }
    log::debug!("Deleting cafe '{}'", cafe.slug);
    repo.delete_cafe(cafe.id.as_str())?;
    Ok(cafe)
}
