use super::prelude::*;

use anyhow::Result as Fallible;
use std::{
    cell::RefCell,
    collections::HashMap,
    result,
};

pub use cafedb_entities::builders::*;

type RepoResult<T> = result::Result<T, RepoError>;

#[derive(Default)]
pub struct MockDb {
    pub cafes: RefCell<Vec<Cafe>>,
    pub locations: RefCell<Vec<Location>>,
    pub users: RefCell<Vec<User>>,
    pub comments: RefCell<Vec<Comment>>,
    pub votes: RefCell<Vec<Vote>>,
}

impl MockDb {
    pub fn add_user(&self, name: &str) -> Id {
        let user = User::build()
            .name(name)
            .email(&format!("{}@example.com", name.to_lowercase()))
            .finish();
        let id = user.id.clone();
        self.users.borrow_mut().push(user);
        id
    }

    pub fn add_cafe(&self, build: CafeBuild) -> Cafe {
        let cafe = build.finish();
        self.cafes.borrow_mut().push(cafe.clone());
        cafe
    }

    fn with_tally(&self, mut cafe: Cafe) -> Cafe {
        cafe.votes = self
            .votes
            .borrow()
            .iter()
            .filter(|v| v.cafe_id == cafe.id)
            .map(|v| i64::from(v.direction.value()))
            .sum();
        cafe
    }

    fn sorted_cafes(&self, filter: impl Fn(&Cafe) -> bool) -> Vec<Cafe> {
        let mut cafes: Vec<_> = self
            .cafes
            .borrow()
            .iter()
            .filter(|c| filter(c))
            .cloned()
            .map(|c| self.with_tally(c))
            .collect();
        cafes.sort_by_key(|c| c.created_at);
        cafes
    }
}

fn paginate<T>(items: Vec<T>, pagination: &Pagination) -> Vec<T> {
    let to_usize = |n: u64| usize::try_from(n).unwrap_or(usize::MAX);
    let offset = pagination.offset.map(to_usize).unwrap_or(0);
    let limit = pagination.limit.map(to_usize).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

impl CafeRepo for MockDb {
    fn create_cafe(&self, cafe: &Cafe) -> RepoResult<()> {
        if self.cafes.borrow().iter().any(|c| c.slug == cafe.slug) {
            return Err(RepoError::AlreadyExists);
        }
        self.cafes.borrow_mut().push(cafe.clone());
        Ok(())
    }

    fn update_cafe(&self, cafe: &Cafe) -> RepoResult<()> {
        let mut cafes = self.cafes.borrow_mut();
        let existing = cafes
            .iter_mut()
            .find(|c| c.id == cafe.id)
            .ok_or(RepoError::NotFound)?;
        *existing = cafe.clone();
        Ok(())
    }

    fn delete_cafe(&self, id: &str) -> RepoResult<()> {
        let len = self.cafes.borrow().len();
        self.cafes.borrow_mut().retain(|c| c.id.as_str() != id);
        if self.cafes.borrow().len() == len {
            return Err(RepoError::NotFound);
        }
        self.votes.borrow_mut().retain(|v| v.cafe_id.as_str() != id);
        self.comments.borrow_mut().retain(|c| c.cafe_id.as_str() != id);
        Ok(())
    }

    fn get_cafe(&self, id: &str) -> RepoResult<Cafe> {
        self.sorted_cafes(|c| c.id.as_str() == id)
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)
    }

    fn get_cafe_by_slug(&self, slug: &str) -> RepoResult<Cafe> {
        self.sorted_cafes(|c| c.slug.as_str() == slug)
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)
    }

    fn count_cafes(&self) -> RepoResult<u64> {
        Ok(self.cafes.borrow().len() as u64)
    }

    fn list_cafes(&self, pagination: &Pagination) -> RepoResult<Vec<Cafe>> {
        Ok(paginate(self.sorted_cafes(|_| true), pagination))
    }

    fn count_cafes_of_location(&self, location_id: &str) -> RepoResult<u64> {
        Ok(self
            .sorted_cafes(|c| c.location_id.as_ref().map(Id::as_str) == Some(location_id))
            .len() as u64)
    }

    fn list_cafes_of_location(
        &self,
        location_id: &str,
        pagination: &Pagination,
    ) -> RepoResult<Vec<Cafe>> {
        Ok(paginate(
            self.sorted_cafes(|c| c.location_id.as_ref().map(Id::as_str) == Some(location_id)),
            pagination,
        ))
    }

    fn cafes_within(&self, bbox: &MapBbox) -> RepoResult<Vec<Cafe>> {
        Ok(self.sorted_cafes(|c| c.pos.is_some_and(|pos| bbox.contains_point(pos))))
    }
}

impl LocationRepo for MockDb {
    fn create_location(&self, location: &Location) -> RepoResult<()> {
        if self
            .locations
            .borrow()
            .iter()
            .any(|l| l.name == location.name)
        {
            return Err(RepoError::AlreadyExists);
        }
        self.locations.borrow_mut().push(location.clone());
        Ok(())
    }

    fn get_location(&self, id: &str) -> RepoResult<Location> {
        self.locations
            .borrow()
            .iter()
            .find(|l| l.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn try_get_location_by_name(&self, name: &str) -> RepoResult<Option<Location>> {
        Ok(self
            .locations
            .borrow()
            .iter()
            .find(|l| l.name == name)
            .cloned())
    }

    fn all_locations(&self) -> RepoResult<Vec<Location>> {
        Ok(self.locations.borrow().clone())
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        if self.users.borrow().iter().any(|u| u.email == user.email) {
            return Err(RepoError::AlreadyExists);
        }
        self.users.borrow_mut().push(user.clone());
        Ok(())
    }

    fn get_user(&self, id: &str) -> RepoResult<User> {
        self.users
            .borrow()
            .iter()
            .find(|u| u.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn try_get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

impl CommentRepo for MockDb {
    fn create_comment(&self, comment: &Comment) -> RepoResult<()> {
        self.comments.borrow_mut().push(comment.clone());
        Ok(())
    }

    fn load_comments_of_cafe(&self, cafe_id: &str) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<_> = self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.cafe_id.as_str() == cafe_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}

impl VoteRepo for MockDb {
    fn replace_vote(&self, vote: &Vote) -> RepoResult<()> {
        let mut votes = self.votes.borrow_mut();
        votes.retain(|v| !(v.cafe_id == vote.cafe_id && v.user_id == vote.user_id));
        votes.push(vote.clone());
        Ok(())
    }

    fn try_get_vote(&self, cafe_id: &str, user_id: &str) -> RepoResult<Option<Vote>> {
        Ok(self
            .votes
            .borrow()
            .iter()
            .find(|v| v.cafe_id.as_str() == cafe_id && v.user_id.as_str() == user_id)
            .cloned())
    }
}

// Matches if any word of the text equals any word of the
// location name, ignoring case.
impl LocationIndex for MockDb {
    fn query_locations(&self, text: &str, limit: usize) -> Fallible<Vec<Id>> {
        let words: Vec<_> = text.split_whitespace().map(str::to_lowercase).collect();
        Ok(self
            .locations
            .borrow()
            .iter()
            .filter(|l| {
                l.name
                    .split_whitespace()
                    .any(|w| words.contains(&w.to_lowercase()))
            })
            .take(limit)
            .map(|l| l.id.clone())
            .collect())
    }
}

/// Resolves only the registered queries and records all requests.
#[derive(Default)]
pub struct FakeGeoCoder {
    results: HashMap<String, (f64, f64)>,
    queries: RefCell<Vec<String>>,
}

impl FakeGeoCoder {
    pub fn with(mut self, query: &str, lat_lng: (f64, f64)) -> Self {
        self.results.insert(query.to_owned(), lat_lng);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl GeoCodingGateway for FakeGeoCoder {
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
        self.queries.borrow_mut().push(query.to_owned());
        self.results.get(query).copied()
    }
}
