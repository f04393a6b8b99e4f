pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{cafe_builder::*, location_builder::*, user_builder::*};

pub mod cafe_builder {

    use super::*;
    use crate::{cafe::*, geo::*, id::*, slug::*, time::*};

    #[derive(Debug)]
    pub struct CafeBuild {
        cafe: Cafe,
    }

    impl CafeBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.cafe.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.cafe.name = name.into();
            self.cafe.slug = Slug::from_name(name);
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.cafe.slug = slug.to_owned().into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.cafe.description = desc.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.cafe.address = address.into();
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.cafe.city = city.into();
            self
        }
        pub fn state(mut self, state: Option<&str>) -> Self {
            self.cafe.state = state.map(Into::into);
            self
        }
        pub fn country(mut self, country: Option<&str>) -> Self {
            self.cafe.country = country.map(Into::into);
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.cafe.pos = Some(pos);
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn owner(mut self, id: &str, name: &str) -> Self {
            self.cafe.owner = CafeOwner {
                id: id.into(),
                name: name.into(),
            };
            self
        }
        pub fn location_id(mut self, id: &str) -> Self {
            self.cafe.location_id = Some(id.into());
            self
        }
        pub fn created_at(mut self, ts: Timestamp) -> Self {
            self.cafe.created_at = ts;
            self.cafe.updated_at = ts;
            self
        }
        pub fn finish(self) -> Cafe {
            self.cafe
        }
    }

    impl Builder for Cafe {
        type Build = CafeBuild;
        fn build() -> CafeBuild {
            let now = Timestamp::now();
            CafeBuild {
                cafe: Cafe {
                    id: Id::new(),
                    slug: Slug::from_name(""),
                    name: "".into(),
                    description: "".into(),
                    address: "".into(),
                    city: "".into(),
                    state: None,
                    country: None,
                    pos: None,
                    owner: CafeOwner {
                        id: Id::new(),
                        name: "".into(),
                    },
                    location_id: None,
                    votes: 0,
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod location_builder {

    use super::*;
    use crate::{geo::*, id::*, location::*, time::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.location.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.location.name = name.into();
            self
        }
        pub fn state(mut self, state: Option<&str>) -> Self {
            self.location.state = state.map(Into::into);
            self
        }
        pub fn country(mut self, country: Option<&str>) -> Self {
            self.location.country = country.map(Into::into);
            self
        }
        pub fn lat_lng(mut self, lat: f64, lng: f64) -> Self {
            self.location.pos = Some(MapPoint::from_lat_lng_deg(lat, lng));
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> LocationBuild {
            LocationBuild {
                location: Location {
                    id: Id::new(),
                    name: "".into(),
                    state: None,
                    country: None,
                    pos: None,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod user_builder {

    use super::*;
    use crate::{id::*, password::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.user.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.user.name = name.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = email.into();
            self
        }
        pub fn password(mut self, plain: &str) -> Self {
            self.user.password = plain.parse().unwrap();
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> UserBuild {
            UserBuild {
                user: User {
                    id: Id::new(),
                    name: "".into(),
                    email: "".into(),
                    password: Password::from_hash("".into()),
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}
