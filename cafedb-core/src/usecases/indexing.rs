use super::prelude::*;
use anyhow::Result as Fallible;

pub fn reindex_location<I>(indexer: &I, location: &Location) -> Fallible<()>
where
    I: LocationIndexer + ?Sized,
{
    log::debug!("Indexing location '{}'", location.name);
    indexer.add_or_update_location(location)
}

/// Replace the contents of the index with all stored locations.
pub fn index_all_locations<R, I>(repo: &R, indexer: &mut I) -> Fallible<usize>
where
    R: LocationRepo,
    I: LocationIndexer + ?Sized,
{
    let locations = repo.all_locations()?;
    indexer.remove_all_locations()?;
    for location in &locations {
        reindex_location(indexer, location)?;
    }
    indexer.flush_index()?;
    Ok(locations.len())
}
