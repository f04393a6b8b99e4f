use crate::{id::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id          : Id,
    pub cafe_id     : Id,
    pub created_at  : Timestamp,
    pub author_name : Option<String>,
    pub text        : String,
}
