use crate::{id::*, time::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub const fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub const fn try_from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }
}

/// The single active vote of a user for a cafe.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub cafe_id   : Id,
    pub user_id   : Id,
    pub direction : VoteDirection,
    pub voted_at  : Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_values() {
        for dir in [VoteDirection::Up, VoteDirection::Down] {
            assert_eq!(Some(dir), VoteDirection::try_from_value(dir.value()));
        }
        assert_eq!(None, VoteDirection::try_from_value(0));
    }
}
