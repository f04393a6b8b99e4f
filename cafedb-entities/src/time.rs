use std::fmt;

use time::{macros::format_description, OffsetDateTime};

/// Point in time with millisecond precision.
///
/// Timestamps are persisted as milliseconds since the Unix epoch,
/// so the sub-millisecond part is dropped on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_millis(Self(OffsetDateTime::now_utc()).as_millis())
    }

    pub fn try_from_millis(millis: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .ok()
            .map(Self)
    }

    /// Out of range values are clamped to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        let res = Self::try_from_millis(millis);
        debug_assert!(res.is_some());
        res.unwrap_or(Self(OffsetDateTime::UNIX_EPOCH))
    }

    pub fn as_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn format_date(self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_default()
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self::from_millis(Self(from).as_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}
