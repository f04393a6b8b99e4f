mod create_cafe;
mod delete_cafe;
mod index_locations;
mod login;
mod register_user;
mod update_cafe;
mod vote;

pub mod prelude {
    pub use super::{
        create_cafe::*, delete_cafe::*, index_locations::*, login::*, register_user::*,
        update_cafe::*, vote::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use cafedb_core::{db::*, entities::*, gateways::geocode::GeoCodingGateway, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use cafedb_db_sqlite::Connections;
}
