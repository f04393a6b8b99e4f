use std::{fmt, str::FromStr};

use pwhash::bcrypt;

/// A salted bcrypt password hash, never the plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_hash(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, plain: &str) -> bool {
        bcrypt::verify(plain, &self.0)
    }
}

impl FromStr for Password {
    type Err = pwhash::error::Error;

    fn from_str(plain: &str) -> Result<Self, Self::Err> {
        bcrypt::hash(plain).map(Self)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str("Password(***)")
    }
}
