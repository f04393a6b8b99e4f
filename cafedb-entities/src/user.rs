use crate::{id::*, password::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id         : Id,
    pub name       : String,
    pub email      : String,
    pub password   : Password,
    pub created_at : Timestamp,
}
