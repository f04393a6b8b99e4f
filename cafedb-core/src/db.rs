use crate::{entities::*, repositories::*};
use anyhow::Result as Fallible;

/// All repositories that are backed by the same database.
pub trait Db: CafeRepo + LocationRepo + UserRepo + CommentRepo + VoteRepo {}

impl<T> Db for T where T: CafeRepo + LocationRepo + UserRepo + CommentRepo + VoteRepo {}

pub trait Indexer {
    fn flush_index(&mut self) -> Fallible<()>;
}

pub trait LocationIndex {
    /// Ids of the best matching locations, most relevant first.
    fn query_locations(&self, text: &str, limit: usize) -> Fallible<Vec<Id>>;
}

pub trait LocationIndexer: Indexer + LocationIndex {
    fn add_or_update_location(&self, location: &Location) -> Fallible<()>;
    fn remove_all_locations(&self) -> Fallible<()>;
}
