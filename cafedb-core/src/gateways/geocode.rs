use cafedb_entities::address::Address;
use itertools::Itertools;

/// Resolves free text into a position.
pub trait GeoCodingGateway {
    /// Returns `(latitude, longitude)` in degrees or `None` if the
    /// query could not be resolved for whatever reason.
    fn resolve_lat_lng(&self, query: &str) -> Option<(f64, f64)>;
}

pub fn address_to_forward_query_string(addr: &Address) -> String {
    addr.parts().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_to_forward_query_string_test() {
        let mut addr = Address {
            street: Some("42 Lygon St".into()),
            city: Some("Carlton".into()),
            state: Some("VIC".into()),
            country: Some("Australia".into()),
        };
        assert_eq!(
            "42 Lygon St,Carlton,VIC,Australia",
            address_to_forward_query_string(&addr)
        );
        addr.state = None;
        assert_eq!(
            "42 Lygon St,Carlton,Australia",
            address_to_forward_query_string(&addr)
        );
        addr.street = Some("".into());
        assert_eq!("Carlton,Australia", address_to_forward_query_string(&addr));
    }
}
