use crate::{geo::*, id::*, time::*};

/// A deduplicated city or suburb that groups cafes.
///
/// The name is unique among all locations.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id         : Id,
    pub name       : String,
    pub state      : Option<String>,
    pub country    : Option<String>,
    pub pos        : Option<MapPoint>,
    pub created_at : Timestamp,
}
