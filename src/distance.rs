use serde::{Serialize, Serializer};
use std::{fmt, ops::AddAssign, str::FromStr};

use super::error::ParseError;

const MAX_WHOLE_DIGITS: usize = 8;

/// A distance with exactly one fractional digit, stored in tenths.
/// For example "12,3" is held as 123.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default, Hash)]
pub struct Distance(pub u64);

impl Distance {
    pub fn from_parts(whole: u64, frac: u8) -> Self {
        Distance(whole * 10 + frac as u64)
    }

    pub fn whole(&self) -> u64 {
        self.0 / 10
    }

    pub fn frac(&self) -> u8 {
        (self.0 % 10) as u8
    }

    /// Distance travelled between two points on the same road.
    pub fn between(self, other: Distance) -> Distance {
        Distance(self.0.abs_diff(other.0))
    }
}

impl FromStr for Distance {
    type Err = ParseError;

    // Accepts "0,d" or "[1-9]\d{0,7},d".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Distance(s.to_string());
        let (whole, frac) = s.split_once(',').ok_or_else(invalid)?;

        let digits_only = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(whole)
            || whole.len() > MAX_WHOLE_DIGITS
            || frac.len() != 1
            || !digits_only(frac)
        {
            return Err(invalid());
        }
        if whole.len() > 1 && whole.starts_with('0') {
            return Err(invalid());
        }

        let whole = whole.parse::<u64>().map_err(|_| invalid())?;
        let frac = frac.parse::<u8>().map_err(|_| invalid())?;
        Ok(Distance::from_parts(whole, frac))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.whole(), self.frac())
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

// Serialised in the same "w,f" form the queries print.
impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
