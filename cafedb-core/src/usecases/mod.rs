mod create_new_user;
mod delete_cafe;
mod error;
mod indexing;
mod list_cafes;
mod load_cafe;
mod login;
mod nearby_cafes;
mod resolve_location;
mod search_cafes;
mod store_cafe;
mod vote;

#[cfg(test)]
pub mod tests;

pub use self::{
    create_new_user::*, delete_cafe::*, error::Error, indexing::*, list_cafes::*, load_cafe::*,
    login::*, nearby_cafes::*, resolve_location::*, search_cafes::*, store_cafe::*, vote::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        db::*,
        entities::*,
        gateways::geocode::GeoCodingGateway,
        repositories::{Error as RepoError, *},
        util::paging::{Page, PageRequest},
    };
}
