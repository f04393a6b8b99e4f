use super::*;

pub fn create_cafe(
    connections: &sqlite::Connections,
    indexer: &mut dyn LocationIndexer,
    geocoder: &dyn GeoCodingGateway,
    owner_id: &Id,
    fields: usecases::CafeFields,
    default_country: Option<&str>,
) -> Result<usecases::StoredCafe> {
    // Geocode before the write lock is acquired
    let geocoded = {
        let queries =
            usecases::geocoding_queries(&connections.shared()?, None, &fields, default_country)?;
        usecases::PrefetchedGeocoding::lookup(geocoder, queries)
    };

    // Create and add new cafe
    let stored = {
        connections.exclusive()?.transaction(|conn| {
            usecases::create_new_cafe(conn, &geocoded, owner_id, fields, default_country).map_err(
                |err| {
                    log::warn!("Failed to store new cafe: {err}");
                    err
                },
            )
        })
    }?;

    // Index the location of the new cafe
    // TODO: Move to a separate task/thread that doesn't delay this request
    if let Some(resolved) = &stored.location {
        reindex_new_location(indexer, resolved);
    }

    Ok(stored)
}

pub(crate) fn reindex_new_location(
    indexer: &mut dyn LocationIndexer,
    resolved: &usecases::ResolvedLocation,
) {
    if !resolved.is_new {
        return;
    }
    let location = &resolved.location;
    if let Err(err) =
        usecases::reindex_location(indexer, location).and_then(|_| indexer.flush_index())
    {
        log::error!("Failed to index new location '{}': {err}", location.name);
    }
}
