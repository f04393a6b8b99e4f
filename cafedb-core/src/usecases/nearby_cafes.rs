use super::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyCafe {
    pub cafe: Cafe,
    pub distance: Distance,
}

/// Other cafes within `radius` around the given cafe,
/// the closest first.
///
/// A cafe without a position has no neighbours.
pub fn nearby_cafes<R: CafeRepo>(repo: &R, cafe: &Cafe, radius: Distance) -> Result<Vec<NearbyCafe>> {
    let Some(center) = cafe.pos else {
        return Ok(vec![]);
    };
    let bbox = MapBbox::centered_around(center, radius);
    let mut nearby: Vec<_> = repo
        .cafes_within(&bbox)?
        .into_iter()
        .filter(|other| other.id != cafe.id)
        .filter_map(|other| {
            let distance = MapPoint::distance(center, other.pos?);
            (distance <= radius).then_some(NearbyCafe {
                cafe: other,
                distance,
            })
        })
        .collect();
    nearby.sort_by(|a, b| a.distance.to_meters().total_cmp(&b.distance.to_meters()));
    Ok(nearby)
}
