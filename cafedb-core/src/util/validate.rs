use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2_000;
pub const MIN_PASSWORD_LEN: usize = 6;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CafeInvalidation {
    #[error("Name can't be blank")]
    NameBlank,
    #[error("Name is too long (maximum is 120 characters)")]
    NameTooLong,
    #[error("Address can't be blank")]
    AddressBlank,
    #[error("City can't be blank")]
    CityBlank,
    #[error("Description is too long (maximum is 2000 characters)")]
    DescriptionTooLong,
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}
