use super::*;

/// Rebuild the search index from all stored locations.
pub fn index_all_locations(
    connections: &sqlite::Connections,
    indexer: &mut dyn LocationIndexer,
) -> Result<usize> {
    let db = connections.shared()?;
    let count = usecases::index_all_locations(&db, indexer)?;
    log::info!("Indexed {count} location(s)");
    Ok(count)
}
