pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use cafedb_entities::{
        address::*, cafe::*, comment::*, geo::*, id::*, location::*, password::*, slug::*,
        time::*, user::*, vote::*,
    };
}
