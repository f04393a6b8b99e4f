use super::*;
use crate::create_cafe::reindex_new_location;

pub fn update_cafe(
    connections: &sqlite::Connections,
    indexer: &mut dyn LocationIndexer,
    geocoder: &dyn GeoCodingGateway,
    editor_id: &Id,
    slug: &str,
    fields: usecases::CafeFields,
    default_country: Option<&str>,
) -> Result<usecases::StoredCafe> {
    let geocoded = {
        let queries = usecases::geocoding_queries(
            &connections.shared()?,
            Some(slug),
            &fields,
            default_country,
        )?;
        usecases::PrefetchedGeocoding::lookup(geocoder, queries)
    };

    // Update existing cafe
    let stored = {
        connections.exclusive()?.transaction(|conn| {
            usecases::update_cafe(conn, &geocoded, editor_id, slug, fields, default_country)
                .map_err(|err| {
                    log::warn!("Failed to store updated cafe '{slug}': {err}");
                    err
                })
        })
    }?;

    // Index the location if the city has changed
    if let Some(resolved) = &stored.location {
        reindex_new_location(indexer, resolved);
    }

    Ok(stored)
}
