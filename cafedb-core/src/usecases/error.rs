use crate::{repositories, util::validate::CafeInvalidation};
use itertools::Itertools as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid cafe: {}", .0.iter().join(", "))]
    InvalidCafe(Vec<CafeInvalidation>),
    #[error("Invalid user name")]
    UserName,
    #[error("Invalid email address")]
    Email,
    #[error("Invalid password")]
    Password,
    #[error("The user already exists")]
    UserExists,
    #[error("Invalid credentials")]
    Credentials,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repo(repositories::Error::NotFound))
    }
}

impl From<pwhash::error::Error> for Error {
    fn from(_: pwhash::error::Error) -> Self {
        Self::Password
    }
}
