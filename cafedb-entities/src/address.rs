#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street  : Option<String>,
    pub city    : Option<String>,
    pub state   : Option<String>,
    pub country : Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.country.is_none()
    }

    /// All non-empty parts from the most to the least specific one.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.street, &self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_blank_parts() {
        let addr = Address {
            street: Some("1 Main St".into()),
            city: Some(" ".into()),
            state: None,
            country: Some("Australia".into()),
        };
        assert_eq!(vec!["1 Main St", "Australia"], addr.parts().collect::<Vec<_>>());
        assert!(!addr.is_empty());
        assert!(Address::default().is_empty());
    }
}
