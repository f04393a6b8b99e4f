use std::{fmt, str::FromStr};

use thiserror::Error;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// A valid position on the surface of the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub fn is_valid_lat_deg(lat: f64) -> bool {
        (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat)
    }

    pub fn is_valid_lng_deg(lng: f64) -> bool {
        (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng)
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if Self::is_valid_lat_deg(lat) && Self::is_valid_lng_deg(lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Panics in debug builds on out of range values, use
    /// [`MapPoint::try_from_lat_lng_deg`] for unchecked input.
    pub fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        debug_assert!(Self::is_valid_lat_deg(lat));
        debug_assert!(Self::is_valid_lng_deg(lng));
        Self {
            lat: lat.clamp(LAT_DEG_MIN, LAT_DEG_MAX),
            lng: lng.clamp(LNG_DEG_MIN, LNG_DEG_MAX),
        }
    }

    pub const fn lat_deg(self) -> f64 {
        self.lat
    }

    pub const fn lng_deg(self) -> f64 {
        self.lng
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapPointParseError {
    #[error("expected '<lat>,<lng>'")]
    Format,
    #[error("invalid latitude")]
    Latitude,
    #[error("invalid longitude")]
    Longitude,
}

impl FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(MapPointParseError::Format)?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|lat| Self::is_valid_lat_deg(*lat))
            .ok_or(MapPointParseError::Latitude)?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|lng| Self::is_valid_lng_deg(*lng))
            .ok_or(MapPointParseError::Longitude)?;
        Ok(Self { lat, lng })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

const METERS_PER_MILE: f64 = 1_609.344;

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_miles(miles: f64) -> Self {
        Self(miles * METERS_PER_MILE)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn to_kilometers(self) -> f64 {
        self.0 / 1_000.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.0 < 1_000.0 {
            write!(f, "{:.0} m", self.0)
        } else {
            write!(f, "{:.1} km", self.to_kilometers())
        }
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Calculate the great-circle distance on the surface
    /// of the earth using a special case of the Vincenty
    /// formula for numerical accuracy.
    /// Reference: <https://en.wikipedia.org/wiki/Great-circle_distance>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Distance {
        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = lat1_rad.sin_cos();
        let (lat2_sin, lat2_cos) = lat2_rad.sin_cos();

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = dlng.sin_cos();

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom))
    }
}

/// Rectangular area between a south-west and a north-east corner.
///
/// If the longitude of the south-west corner is greater than the
/// one of the north-east corner the box wraps around the antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// The smallest box that contains all points within
    /// `radius` around `center`.
    pub fn centered_around(center: MapPoint, radius: Distance) -> Self {
        let dlat = (radius.to_meters() / MEAN_EARTH_RADIUS.to_meters()).to_degrees();
        let lat_min = center.lat - dlat;
        let lat_max = center.lat + dlat;
        if lat_min <= LAT_DEG_MIN || lat_max >= LAT_DEG_MAX {
            // A pole is inside the circle
            return Self::new(
                MapPoint::from_lat_lng_deg(lat_min.max(LAT_DEG_MIN), LNG_DEG_MIN),
                MapPoint::from_lat_lng_deg(lat_max.min(LAT_DEG_MAX), LNG_DEG_MAX),
            );
        }
        let dlng = dlat / center.lat.to_radians().cos();
        if dlng >= LNG_DEG_MAX {
            return Self::new(
                MapPoint::from_lat_lng_deg(lat_min, LNG_DEG_MIN),
                MapPoint::from_lat_lng_deg(lat_max, LNG_DEG_MAX),
            );
        }
        let wrap = |lng: f64| {
            if lng < LNG_DEG_MIN {
                lng + 360.0
            } else if lng > LNG_DEG_MAX {
                lng - 360.0
            } else {
                lng
            }
        };
        Self::new(
            MapPoint::from_lat_lng_deg(lat_min, wrap(center.lng - dlng)),
            MapPoint::from_lat_lng_deg(lat_max, wrap(center.lng + dlng)),
        )
    }

    pub const fn south_west(&self) -> MapPoint {
        self.sw
    }

    pub const fn north_east(&self) -> MapPoint {
        self.ne
    }

    pub fn wraps_antimeridian(&self) -> bool {
        self.sw.lng > self.ne.lng
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        if pt.lat < self.sw.lat || pt.lat > self.ne.lat {
            return false;
        }
        if self.wraps_antimeridian() {
            !(pt.lng > self.ne.lng && pt.lng < self.sw.lng)
        } else {
            pt.lng >= self.sw.lng && pt.lng <= self.ne.lng
        }
    }
}
