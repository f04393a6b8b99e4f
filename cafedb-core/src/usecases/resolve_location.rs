use super::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub location: Location,
    // Created by this invocation
    pub is_new: bool,
}

/// The text that is sent to the geocoder for a new location.
///
/// Missing parts are rendered as empty strings and the
/// separators are always included.
pub fn location_geocoding_query(city: &str, state: Option<&str>, country: Option<&str>) -> String {
    format!(
        "{city},{},{}",
        state.unwrap_or_default(),
        country.unwrap_or_default()
    )
}

pub(crate) fn geocode(geocoder: &dyn GeoCodingGateway, query: &str) -> Option<MapPoint> {
    let Some((lat, lng)) = geocoder.resolve_lat_lng(query) else {
        log::warn!("Failed to geocode '{query}'");
        return None;
    };
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng);
    if pos.is_none() {
        log::warn!("Geocoder returned invalid coordinates for '{query}': ({lat}, {lng})");
    } else {
        log::debug!("Geocoded '{query}' as ({lat}, {lng})");
    }
    pos
}

/// Find the location with the given name or create it.
///
/// An existing location is returned as is, even if state or
/// country differ. New locations are geocoded. If geocoding
/// fails the location is stored without a position.
pub fn resolve_location<R>(
    repo: &R,
    geocoder: &dyn GeoCodingGateway,
    city: &str,
    state: Option<&str>,
    country: Option<&str>,
) -> Result<ResolvedLocation>
where
    R: LocationRepo,
{
    if let Some(location) = repo.try_get_location_by_name(city)? {
        return Ok(ResolvedLocation {
            location,
            is_new: false,
        });
    }
    let pos = geocode(geocoder, &location_geocoding_query(city, state, country));
    let location = Location {
        id: Id::new(),
        name: city.to_owned(),
        state: state.map(ToOwned::to_owned),
        country: country.map(ToOwned::to_owned),
        pos,
        created_at: Timestamp::now(),
    };
    match repo.create_location(&location) {
        Ok(()) => {
            log::info!("Created new location '{}'", location.name);
            Ok(ResolvedLocation {
                location,
                is_new: true,
            })
        }
        Err(RepoError::AlreadyExists) => {
            // Created concurrently in the meantime
            let location = repo
                .try_get_location_by_name(city)?
                .ok_or(RepoError::NotFound)?;
            Ok(ResolvedLocation {
                location,
                is_new: false,
            })
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    #[test]
    fn query_with_empty_parts() {
        assert_eq!(
            "Springfield,IL,USA",
            location_geocoding_query("Springfield", Some("IL"), Some("USA"))
        );
        assert_eq!(
            "Springfield,,Australia",
            location_geocoding_query("Springfield", None, Some("Australia"))
        );
        assert_eq!("Springfield,,", location_geocoding_query("Springfield", None, None));
    }

    #[test]
    fn create_geocoded_location() {
        let db = MockDb::default();
        let gw = FakeGeoCoder::default().with("Springfield,IL,USA", (39.78, -89.65));
        let resolved = resolve_location(&db, &gw, "Springfield", Some("IL"), Some("USA")).unwrap();
        assert!(resolved.is_new);
        assert_eq!("Springfield", resolved.location.name);
        assert_eq!(
            Some((39.78, -89.65)),
            resolved.location.pos.map(MapPoint::to_lat_lng_deg)
        );
        assert_eq!(1, db.locations.borrow().len());
        assert_eq!(vec!["Springfield,IL,USA".to_string()], gw.queries());
    }

    #[test]
    fn resolve_same_name_twice() {
        let db = MockDb::default();
        let gw = FakeGeoCoder::default().with("Springfield,IL,USA", (39.78, -89.65));
        let first = resolve_location(&db, &gw, "Springfield", Some("IL"), Some("USA")).unwrap();
        let second = resolve_location(&db, &gw, "Springfield", Some("IL"), Some("USA")).unwrap();
        assert!(!second.is_new);
        assert_eq!(first.location.id, second.location.id);
        assert_eq!(1, db.locations.borrow().len());
        // The existing location is not geocoded again
        assert_eq!(1, gw.queries().len());
    }

    #[test]
    fn reuse_location_with_different_state() {
        let db = MockDb::default();
        let gw = FakeGeoCoder::default().with("Springfield,IL,USA", (39.78, -89.65));
        let first = resolve_location(&db, &gw, "Springfield", Some("IL"), Some("USA")).unwrap();
        let second =
            resolve_location(&db, &gw, "Springfield", Some("MA"), Some("USA")).unwrap();
        assert_eq!(first.location.id, second.location.id);
        assert_eq!(Some("IL"), second.location.state.as_deref());
    }

    #[test]
    fn store_location_without_position_if_geocoding_fails() {
        let db = MockDb::default();
        let gw = FakeGeoCoder::default();
        let resolved = resolve_location(&db, &gw, "Nowhereville", None, None).unwrap();
        assert!(resolved.is_new);
        assert!(resolved.location.pos.is_none());
        assert_eq!(1, db.locations.borrow().len());
        assert_eq!(vec!["Nowhereville,,".to_string()], gw.queries());
    }

    #[test]
    fn reject_invalid_coordinates() {
        let db = MockDb::default();
        let gw = FakeGeoCoder::default().with("Atlantis,,", (123.0, 0.0));
        let resolved = resolve_location(&db, &gw, "Atlantis", None, None).unwrap();
        assert!(resolved.location.pos.is_none());
    }
}
