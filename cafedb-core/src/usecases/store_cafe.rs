use std::collections::HashMap;

use super::{
    prelude::*,
    resolve_location::{geocode, location_geocoding_query, resolve_location, ResolvedLocation},
};
use crate::{
    gateways::geocode::address_to_forward_query_string,
    util::validate::{self, CafeInvalidation, Validate},
};

// Slugs that would collide with static routes
const RESERVED_SLUGS: &[&str] = &["new"];

/// User supplied fields of a cafe.
#[rustfmt::skip]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CafeFields {
    pub name        : String,
    pub description : String,
    pub address     : String,
    pub city        : String,
    pub state       : Option<String>,
}

impl CafeFields {
    fn normalized(self) -> Self {
        let Self {
            name,
            description,
            address,
            city,
            state,
        } = self;
        Self {
            name: name.trim().to_owned(),
            description: description.trim().to_owned(),
            address: address.trim().to_owned(),
            city: city.trim().to_owned(),
            state: state
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty()),
        }
    }
}

impl From<&Cafe> for CafeFields {
    fn from(from: &Cafe) -> Self {
        Self {
            name: from.name.clone(),
            description: from.description.clone(),
            address: from.address.clone(),
            city: from.city.clone(),
            state: from.state.clone(),
        }
    }
}

impl Validate for CafeFields {
    type Error = Vec<CafeInvalidation>;

    fn validate(&self) -> std::result::Result<(), Self::Error> {
        let mut errors = vec![];
        if validate::is_blank(&self.name) {
            errors.push(CafeInvalidation::NameBlank);
        } else if self.name.chars().count() > validate::MAX_NAME_LEN {
            errors.push(CafeInvalidation::NameTooLong);
        }
        if validate::is_blank(&self.address) {
            errors.push(CafeInvalidation::AddressBlank);
        }
        if validate::is_blank(&self.city) {
            errors.push(CafeInvalidation::CityBlank);
        }
        if self.description.chars().count() > validate::MAX_DESCRIPTION_LEN {
            errors.push(CafeInvalidation::DescriptionTooLong);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geocoding {
    /// The address did not change and the cafe already had a position.
    Unchanged,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct StoredCafe {
    pub cafe: Cafe,
    pub geocoding: Geocoding,
    pub location: Option<ResolvedLocation>,
}

fn unique_slug<R: CafeRepo>(repo: &R, name: &str) -> Result<Slug> {
    let base = Slug::from_name(name);
    let mut slug = base.clone();
    let mut n = 1;
    while RESERVED_SLUGS.contains(&slug.as_str()) || repo.try_get_cafe_by_slug(slug.as_str())?.is_some()
    {
        n += 1;
        slug = base.with_suffix(n);
    }
    Ok(slug)
}

fn load_owner<R: UserRepo>(repo: &R, user_id: &Id) -> Result<CafeOwner> {
    match repo.get_user(user_id.as_str()) {
        Ok(User { id, name, .. }) => Ok(CafeOwner { id, name }),
        Err(RepoError::NotFound) => Err(Error::Unauthorized),
        Err(err) => Err(err.into()),
    }
}

fn address_changed(cafe: &Cafe, fields: &CafeFields) -> bool {
    cafe.address != fields.address || cafe.city != fields.city || cafe.state != fields.state
}

/// Lists the geocoder queries that storing the given fields will issue.
///
/// Pass `None` as `slug` for a new cafe. Invalid fields and unknown
/// cafes need no queries, storing them fails anyway.
pub fn geocoding_queries<R>(
    repo: &R,
    slug: Option<&str>,
    fields: &CafeFields,
    default_country: Option<&str>,
) -> Result<Vec<String>>
where
    R: CafeRepo + LocationRepo,
{
    let fields = fields.clone().normalized();
    if fields.validate().is_err() {
        return Ok(vec![]);
    }
    let country = match slug {
        None => default_country.map(ToOwned::to_owned),
        Some(slug) => {
            let Some(cafe) = repo.try_get_cafe_by_slug(slug)? else {
                return Ok(vec![]);
            };
            if cafe.pos.is_some() && !address_changed(&cafe, &fields) {
                return Ok(vec![]);
            }
            cafe.country.or_else(|| default_country.map(ToOwned::to_owned))
        }
    };
    let CafeFields {
        address,
        city,
        state,
        ..
    } = fields;
    let location_query = if repo.try_get_location_by_name(&city)?.is_none() {
        Some(location_geocoding_query(
            &city,
            state.as_deref(),
            country.as_deref(),
        ))
    } else {
        None
    };
    let address_query = address_to_forward_query_string(&Address {
        street: Some(address),
        city: Some(city),
        state,
        country,
    });
    Ok(std::iter::once(address_query).chain(location_query).collect())
}

/// Geocoder answers that have been looked up in advance.
///
/// Storing a cafe runs inside a write transaction that must
/// not wait for a remote geocoder. Queries that have not been
/// looked up in advance are treated as unresolvable.
#[derive(Debug, Default)]
pub struct PrefetchedGeocoding {
    results: HashMap<String, Option<(f64, f64)>>,
}

impl PrefetchedGeocoding {
    pub fn lookup<I>(geocoder: &dyn GeoCodingGateway, queries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let results = queries
            .into_iter()
            .map(|query| {
                let lat_lng = geocoder.resolve_lat_lng(&query);
                (query, lat_lng)
            })
            .collect();
        Self { results }
    }
}

impl GeoCodingGateway for PrefetchedGeocoding {
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)> {
        let Some(lat_lng) = self.results.get(query) else {
            log::warn!("Geocoding of '{query}' has not been prefetched");
            return None;
        };
        *lat_lng
    }
}

// Geocodes the address of the cafe and, only on success, assigns
// the location that corresponds to its city.
fn geocode_and_locate<R: LocationRepo>(
    repo: &R,
    geocoder: &dyn GeoCodingGateway,
    cafe: &mut Cafe,
) -> Result<(Geocoding, Option<ResolvedLocation>)> {
    cafe.pos = geocode(
        geocoder,
        &address_to_forward_query_string(&cafe.postal_address()),
    );
    if cafe.pos.is_none() {
        // The previous location no longer matches the address
        cafe.location_id = None;
        return Ok((Geocoding::Failed, None));
    }
    let resolved = resolve_location(
        repo,
        geocoder,
        &cafe.city,
        cafe.state.as_deref(),
        cafe.country.as_deref(),
    )?;
    cafe.location_id = Some(resolved.location.id.clone());
    Ok((Geocoding::Succeeded, Some(resolved)))
}

pub fn create_new_cafe<R>(
    repo: &R,
    geocoder: &dyn GeoCodingGateway,
    owner_id: &Id,
    fields: CafeFields,
    country: Option<&str>,
) -> Result<StoredCafe>
where
    R: CafeRepo + LocationRepo + UserRepo,
{
    let fields = fields.normalized();
    fields.validate().map_err(Error::InvalidCafe)?;
    let owner = load_owner(repo, owner_id)?;
    let slug = unique_slug(repo, &fields.name)?;
    let CafeFields {
        name,
        description,
        address,
        city,
        state,
    } = fields;
    let now = Timestamp::now();
    let mut cafe = Cafe {
        id: Id::new(),
        slug,
        name,
        description,
        address,
        city,
        state,
        country: country.map(ToOwned::to_owned),
        pos: None,
        owner,
        location_id: None,
        votes: 0,
        created_at: now,
        updated_at: now,
    };
    let (geocoding, location) = geocode_and_locate(repo, geocoder, &mut cafe)?;
    log::debug!("Creating new cafe '{}'", cafe.slug);
    repo.create_cafe(&cafe)?;
    Ok(StoredCafe {
        cafe,
        geocoding,
        location,
    })
}

/// Only the owner is allowed to update a cafe. The slug is kept
/// even if the name changes.
pub fn update_cafe<R>(
    repo: &R,
    geocoder: &dyn GeoCodingGateway,
    editor_id: &Id,
    slug: &str,
    fields: CafeFields,
    default_country: Option<&str>,
) -> Result<StoredCafe>
where
    R: CafeRepo + LocationRepo,
{
    let mut cafe = repo.get_cafe_by_slug(slug)?;
    if !cafe.is_owned_by(editor_id) {
        return Err(Error::Forbidden);
    }
    let fields = fields.normalized();
    fields.validate().map_err(Error::InvalidCafe)?;
    let address_changed = address_changed(&cafe, &fields);
    let CafeFields {
        name,
        description,
        address,
        city,
        state,
    } = fields;
    cafe.name = name;
    cafe.description = description;
    cafe.address = address;
    cafe.city = city;
    cafe.state = state;
    if cafe.country.is_none() {
        cafe.country = default_country.map(ToOwned::to_owned);
    }
    cafe.updated_at = Timestamp::now();
    let (geocoding, location) = if address_changed || cafe.pos.is_none() {
        geocode_and_locate(repo, geocoder, &mut cafe)?
    } else {
        (Geocoding::Unchanged, None)
    };
    log::debug!("Updating cafe '{}'", cafe.slug);
    repo.update_cafe(&cafe)?;
    Ok(StoredCafe {
        cafe,
        geocoding,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    fn brew_co() -> CafeFields {
        CafeFields {
            name: "Brew Co".into(),
            description: "Single origin pour over".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: Some("IL".into()),
        }
    }

    fn geocoder() -> FakeGeoCoder {
        FakeGeoCoder::default()
            .with("1 Main St,Springfield,IL,USA", (39.7817, -89.6501))
            .with("Springfield,IL,USA", (39.78, -89.65))
            .with("2 Main St,Springfield,IL,USA", (39.7820, -89.6505))
    }

    #[test]
    fn create_cafe_with_new_location() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        let stored = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        assert_eq!(Geocoding::Succeeded, stored.geocoding);
        assert_eq!("brew-co", stored.cafe.slug.as_str());
        assert_eq!("Alice", stored.cafe.owner.name);
        assert_eq!(Some("USA"), stored.cafe.country.as_deref());
        assert_eq!(
            Some((39.7817, -89.6501)),
            stored.cafe.pos.map(MapPoint::to_lat_lng_deg)
        );
        let resolved = stored.location.unwrap();
        assert!(resolved.is_new);
        assert_eq!("Springfield", resolved.location.name);
        assert!(resolved.location.pos.is_some());
        assert_eq!(Some(resolved.location.id), stored.cafe.location_id);

        let found = db.get_cafe_by_slug("brew-co").unwrap();
        assert_eq!(found.name, "Brew Co");
        assert_eq!(found.address, "1 Main St");
        assert_eq!(found.description, "Single origin pour over");
    }

    #[test]
    fn second_cafe_reuses_location() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        let first = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let second = create_new_cafe(
            &db,
            &gw,
            &owner,
            CafeFields {
                name: "Bean There".into(),
                address: "2 Main St".into(),
                ..brew_co()
            },
            Some("USA"),
        )
        .unwrap();
        assert!(!second.location.as_ref().unwrap().is_new);
        assert_eq!(first.cafe.location_id, second.cafe.location_id);
        assert_eq!(1, db.locations.borrow().len());
    }

    #[test]
    fn unique_slugs() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        let a = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let b = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let c = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        assert_eq!("brew-co", a.cafe.slug.as_str());
        assert_eq!("brew-co-2", b.cafe.slug.as_str());
        assert_eq!("brew-co-3", c.cafe.slug.as_str());
    }

    #[test]
    fn reserved_slug() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let fields = CafeFields {
            name: "New".into(),
            ..brew_co()
        };
        let stored = create_new_cafe(&db, &geocoder(), &owner, fields, Some("USA")).unwrap();
        assert_eq!("new-2", stored.cafe.slug.as_str());
    }

    #[test]
    fn geocoding_failure_is_not_fatal() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = FakeGeoCoder::default();
        let stored = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        assert_eq!(Geocoding::Failed, stored.geocoding);
        assert!(stored.cafe.pos.is_none());
        assert!(stored.location.is_none());
        assert!(stored.cafe.location_id.is_none());
        assert!(db.locations.borrow().is_empty());
        assert_eq!(1, db.cafes.borrow().len());
    }

    #[test]
    fn accumulate_validation_errors() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let fields = CafeFields {
            name: "  ".into(),
            address: "".into(),
            ..brew_co()
        };
        let err = create_new_cafe(&db, &geocoder(), &owner, fields, None).unwrap_err();
        match &err {
            Error::InvalidCafe(errors) => assert_eq!(
                &vec![CafeInvalidation::NameBlank, CafeInvalidation::AddressBlank],
                errors
            ),
            _ => panic!("unexpected error: {err}"),
        }
        assert!(db.cafes.borrow().is_empty());
    }

    #[test]
    fn create_requires_existing_owner() {
        let db = MockDb::default();
        let err = create_new_cafe(&db, &geocoder(), &Id::new(), brew_co(), None).unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[test]
    fn update_without_address_change_skips_geocoding() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let queries_before = gw.queries().len();
        let fields = CafeFields {
            name: "Brew Co Espresso".into(),
            ..brew_co()
        };
        let stored = update_cafe(&db, &gw, &owner, "brew-co", fields, Some("USA")).unwrap();
        assert_eq!(Geocoding::Unchanged, stored.geocoding);
        assert_eq!(queries_before, gw.queries().len());
        assert_eq!("brew-co", stored.cafe.slug.as_str());
        assert_eq!(
            "Brew Co Espresso",
            db.get_cafe_by_slug("brew-co").unwrap().name
        );
    }

    #[test]
    fn update_with_new_address_geocodes_again() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let fields = CafeFields {
            address: "2 Main St".into(),
            ..brew_co()
        };
        let stored = update_cafe(&db, &gw, &owner, "brew-co", fields, Some("USA")).unwrap();
        assert_eq!(Geocoding::Succeeded, stored.geocoding);
        assert_eq!(
            Some((39.7820, -89.6505)),
            stored.cafe.pos.map(MapPoint::to_lat_lng_deg)
        );
    }

    #[test]
    fn failed_geocoding_on_update_drops_location() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        let created = create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        assert!(created.cafe.location_id.is_some());
        let fields = CafeFields {
            address: "9 Nowhere Rd".into(),
            city: "Nowhereville".into(),
            ..brew_co()
        };
        let stored = update_cafe(&db, &gw, &owner, "brew-co", fields, Some("USA")).unwrap();
        assert_eq!(Geocoding::Failed, stored.geocoding);
        assert!(stored.cafe.pos.is_none());
        assert!(stored.cafe.location_id.is_none());
        assert!(db.get_cafe_by_slug("brew-co").unwrap().location_id.is_none());
    }

    #[test]
    fn queries_of_a_new_cafe() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        assert_eq!(
            vec!["1 Main St,Springfield,IL,USA", "Springfield,IL,USA"],
            geocoding_queries(&db, None, &brew_co(), Some("USA")).unwrap()
        );
        create_new_cafe(&db, &geocoder(), &owner, brew_co(), Some("USA")).unwrap();
        // The location exists now
        let fields = CafeFields {
            address: " 2 Main St ".into(),
            ..brew_co()
        };
        assert_eq!(
            vec!["2 Main St,Springfield,IL,USA"],
            geocoding_queries(&db, None, &fields, Some("USA")).unwrap()
        );
        let invalid = CafeFields {
            name: "".into(),
            ..brew_co()
        };
        assert!(geocoding_queries(&db, None, &invalid, Some("USA"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn queries_of_an_updated_cafe() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        create_new_cafe(&db, &geocoder(), &owner, brew_co(), Some("USA")).unwrap();
        let renamed = CafeFields {
            name: "Brew Co Espresso".into(),
            ..brew_co()
        };
        assert!(geocoding_queries(&db, Some("brew-co"), &renamed, None)
            .unwrap()
            .is_empty());
        let moved = CafeFields {
            address: "5 Elm St".into(),
            city: "Shelbyville".into(),
            ..brew_co()
        };
        // The country of the stored cafe wins over the default
        assert_eq!(
            vec!["5 Elm St,Shelbyville,IL,USA", "Shelbyville,IL,USA"],
            geocoding_queries(&db, Some("brew-co"), &moved, Some("Canada")).unwrap()
        );
        assert!(geocoding_queries(&db, Some("unknown"), &moved, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn store_with_prefetched_geocoding() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let gw = geocoder();
        let queries = geocoding_queries(&db, None, &brew_co(), Some("USA")).unwrap();
        let prefetched = PrefetchedGeocoding::lookup(&gw, queries);
        assert_eq!(2, gw.queries().len());
        let stored = create_new_cafe(&db, &prefetched, &owner, brew_co(), Some("USA")).unwrap();
        assert_eq!(Geocoding::Succeeded, stored.geocoding);
        assert!(stored.location.unwrap().location.pos.is_some());
        // Nothing has been looked up while storing
        assert_eq!(2, gw.queries().len());
        assert_eq!(None, prefetched.resolve_lat_lng("2 Main St,Springfield,IL,USA"));
    }

    #[test]
    fn only_the_owner_may_update() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let other = db.add_user("Bob");
        let gw = geocoder();
        create_new_cafe(&db, &gw, &owner, brew_co(), Some("USA")).unwrap();
        let err = update_cafe(&db, &gw, &other, "brew-co", brew_co(), None).unwrap_err();
        assert!(matches!(err, Error::Forbidden));
    }

    #[test]
    fn update_unknown_cafe() {
        let db = MockDb::default();
        let owner = db.add_user("Alice");
        let err = update_cafe(&db, &geocoder(), &owner, "nope", brew_co(), None).unwrap_err();
        assert!(err.is_not_found());
    }
}
