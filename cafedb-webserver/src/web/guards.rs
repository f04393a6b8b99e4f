use std::ops::Deref;

use cafedb_core::{
    entities::{Id, User},
    gateways::geocode::GeoCodingGateway,
    repositories::{Error as RepoError, UserRepo as _},
};
use rocket::{
    http::{uri::Reference, Status},
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
};

use super::state::Connections;

pub const COOKIE_USER_KEY: &str = "cafedb-user-id";

/// The logged in user.
///
/// The id of the user is stored in a private cookie. Requests
/// without a valid cookie are answered with `401 Unauthorized`.
#[derive(Debug)]
pub struct Account(User);

impl Account {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn user_id(&self) -> &Id {
        &self.0.id
    }

    fn user_id_from_cookie(request: &Request) -> Option<Id> {
        request
            .cookies()
            .get_private(COOKIE_USER_KEY)
            .map(|cookie| Id::from(cookie.value()))
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(user_id) = Self::user_id_from_cookie(request) else {
            return Outcome::Error((Status::Unauthorized, ()));
        };
        let connections = try_outcome!(request.guard::<Connections>().await);
        let user = connections
            .shared()
            .and_then(|db| Ok(db.get_user(user_id.as_str())?));
        match user {
            Ok(user) => Outcome::Success(Account(user)),
            Err(err) => match err.downcast_ref::<RepoError>() {
                Some(RepoError::NotFound) => {
                    debug!("User {user_id} of session cookie does not exist");
                    Outcome::Error((Status::Unauthorized, ()))
                }
                _ => {
                    error!("Failed to load user {user_id}: {err}");
                    Outcome::Error((Status::InternalServerError, ()))
                }
            },
        }
    }
}

/// The page that linked to the current request, if any.
#[derive(Debug)]
pub struct Referer(Option<Reference<'static>>);

impl Referer {
    pub fn into_inner(self) -> Option<Reference<'static>> {
        self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Referer {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let referer = request
            .headers()
            .get_one("Referer")
            .and_then(|value| Reference::parse_owned(value.to_owned()).ok());
        Outcome::Success(Referer(referer))
    }
}

pub struct GeoCoding(pub Box<dyn GeoCodingGateway + Send + Sync>);

impl Deref for GeoCoding {
    type Target = dyn GeoCodingGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
