// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Cafes are always listed in the order of their creation,
/// oldest first. The vote tally of loaded cafes is calculated
/// from the recorded votes and ignored when storing a cafe.
pub trait CafeRepo {
    fn create_cafe(&self, cafe: &Cafe) -> Result<()>;
    fn update_cafe(&self, cafe: &Cafe) -> Result<()>;
    fn delete_cafe(&self, id: &str) -> Result<()>;

    fn get_cafe(&self, id: &str) -> Result<Cafe>;
    fn get_cafe_by_slug(&self, slug: &str) -> Result<Cafe>;
    fn try_get_cafe_by_slug(&self, slug: &str) -> Result<Option<Cafe>> {
        match self.get_cafe_by_slug(slug) {
            Ok(cafe) => Ok(Some(cafe)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn count_cafes(&self) -> Result<u64>;
    fn list_cafes(&self, pagination: &Pagination) -> Result<Vec<Cafe>>;

    fn count_cafes_of_location(&self, location_id: &str) -> Result<u64>;
    fn list_cafes_of_location(
        &self,
        location_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Cafe>>;

    /// All cafes with a position inside of the bounding box.
    fn cafes_within(&self, bbox: &MapBbox) -> Result<Vec<Cafe>>;
}

pub trait LocationRepo {
    /// Fails with [`Error::AlreadyExists`] if the name is taken.
    fn create_location(&self, location: &Location) -> Result<()>;

    fn get_location(&self, id: &str) -> Result<Location>;
    fn try_get_location_by_name(&self, name: &str) -> Result<Option<Location>>;
    fn all_locations(&self) -> Result<Vec<Location>>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &str) -> Result<User>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

pub trait CommentRepo {
    fn create_comment(&self, comment: &Comment) -> Result<()>;

    // Oldest first
    fn load_comments_of_cafe(&self, cafe_id: &str) -> Result<Vec<Comment>>;
}

pub trait VoteRepo {
    /// Replaces any previous vote of the same user for the same cafe.
    fn replace_vote(&self, vote: &Vote) -> Result<()>;

    fn try_get_vote(&self, cafe_id: &str, user_id: &str) -> Result<Option<Vote>>;
}
