use crate::{address::*, geo::*, id::*, slug::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Cafe {
    pub id          : Id,
    pub slug        : Slug,
    pub name        : String,
    pub description : String,
    pub address     : String,
    pub city        : String,
    pub state       : Option<String>,
    pub country     : Option<String>,
    pub pos         : Option<MapPoint>,
    pub owner       : CafeOwner,
    pub location_id : Option<Id>,
    // Number of up votes minus number of down votes
    pub votes       : i64,
    pub created_at  : Timestamp,
    pub updated_at  : Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeOwner {
    pub id: Id,
    pub name: String,
}

impl Cafe {
    pub fn postal_address(&self) -> Address {
        Address {
            street: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: self.state.clone(),
            country: self.country.clone(),
        }
    }

    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        &self.owner.id == user_id
    }
}
