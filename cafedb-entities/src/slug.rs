use std::fmt;

const FALLBACK_SLUG: &str = "cafe";

/// Human-readable, URL-safe identifier.
///
/// Consists of lowercase ASCII letters and digits in words
/// that are separated by a single `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut pending_separator = false;
        for c in name.chars().flat_map(char::to_lowercase).map(fold_diacritic) {
            if c.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            } else if c != '\'' {
                pending_separator = true;
            }
        }
        if slug.is_empty() {
            slug.push_str(FALLBACK_SLUG);
        }
        Self(slug)
    }

    /// Disambiguate colliding slugs by appending a sequence number.
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}-{n}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Slug {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<Slug> for String {
    fn from(from: Slug) -> Self {
        from.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_name() {
        assert_eq!("brew-co", Slug::from_name("Brew Co").as_str());
        assert_eq!("brew-co", Slug::from_name("  Brew   Co!  ").as_str());
        assert_eq!("joe-s-beans", Slug::from_name("Joe & S. Beans").as_str());
        assert_eq!("joes-place", Slug::from_name("Joe's Place").as_str());
        assert_eq!("cafe-42", Slug::from_name("Café 42").as_str());
    }

    #[test]
    fn fallback_for_names_without_ascii_chars() {
        assert_eq!("cafe", Slug::from_name("☕").as_str());
        assert_eq!("cafe", Slug::from_name("").as_str());
    }

    #[test]
    fn append_suffix() {
        assert_eq!("brew-co-2", Slug::from_name("Brew Co").with_suffix(2).as_str());
    }
}
