use super::prelude::*;

#[derive(Debug, Clone)]
pub struct CafeSearchResult {
    /// The best matching location, if any
    pub location: Option<Location>,
    pub cafes: Page<Cafe>,
}

/// Search for cafes by the name of their location.
///
/// The text is matched against locations only. The cafes of the
/// best matching location are returned. If no location matches
/// the result is empty, cafe names and addresses are never
/// considered.
pub fn search_cafes<R, I>(
    repo: &R,
    index: &I,
    text: &str,
    request: PageRequest,
) -> Result<CafeSearchResult>
where
    R: CafeRepo + LocationRepo,
    I: LocationIndex + ?Sized,
{
    let no_match = || CafeSearchResult {
        location: None,
        cafes: Page::empty(request),
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(no_match());
    }
    let best_match = index
        .query_locations(text, 1)
        .map_err(RepoError::Other)?
        .into_iter()
        .next();
    let Some(location_id) = best_match else {
        log::debug!("No location matches '{text}'");
        return Ok(no_match());
    };
    let location = match repo.get_location(location_id.as_str()) {
        Ok(location) => location,
        Err(RepoError::NotFound) => {
            log::warn!("Indexed location {location_id} not found");
            return Ok(no_match());
        }
        Err(err) => return Err(err.into()),
    };
    let total_items = repo.count_cafes_of_location(location.id.as_str())?;
    let items = repo.list_cafes_of_location(location.id.as_str(), &request.to_pagination())?;
    Ok(CafeSearchResult {
        location: Some(location),
        cafes: Page {
            items,
            request,
            total_items,
        },
    })
}
