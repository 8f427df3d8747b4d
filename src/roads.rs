use serde::{Deserialize, Serialize, Serializer};
use std::{cmp::Ordering, fmt};

use super::error::{ConfigError, ParseError};

const MAX_ROAD_NUMBER_DIGITS: usize = 3;

/// Identifies a road, e.g. "A1" or "S113".
/// Roads are ordered by number first, with the category letter breaking ties,
/// so A1 < S1 < A2.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct RoadKey {
    pub category: char,
    pub number: u16,
}

impl RoadKey {
    pub fn new(category: char, number: u16) -> Self {
        RoadKey { category, number }
    }
}

impl Ord for RoadKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.category.cmp(&other.category))
    }
}

impl PartialOrd for RoadKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RoadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category, self.number)
    }
}

impl Serialize for RoadKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which of the car's two totals a journey counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadCategory {
    Motorway,
    Ordinary,
}

/// The two road category letters the tool recognises.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadClasses {
    pub motorway: char,
    pub ordinary: char,
}

impl Default for RoadClasses {
    fn default() -> Self {
        RoadClasses::new('A', 'S')
    }
}

impl RoadClasses {
    pub fn new(motorway: char, ordinary: char) -> Self {
        RoadClasses { motorway, ordinary }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for letter in [self.motorway, self.ordinary] {
            if !letter.is_ascii_uppercase() {
                return Err(ConfigError::InvalidCategory(letter));
            }
        }
        if self.motorway == self.ordinary {
            return Err(ConfigError::DuplicateCategory(self.motorway));
        }
        Ok(())
    }

    pub fn category_of(&self, road: &RoadKey) -> RoadCategory {
        if road.category == self.motorway {
            RoadCategory::Motorway
        } else {
            RoadCategory::Ordinary
        }
    }

    pub fn label(&self, category: RoadCategory) -> char {
        match category {
            RoadCategory::Motorway => self.motorway,
            RoadCategory::Ordinary => self.ordinary,
        }
    }

    /// Parses a road label such as "A12": a known category letter followed by
    /// a number from 1 to 999 with no leading zero.
    pub fn parse_road(&self, s: &str) -> Result<RoadKey, ParseError> {
        let invalid = || ParseError::Road(s.to_string());
        let mut chars = s.chars();
        let category = chars.next().ok_or_else(invalid)?;
        if category != self.motorway && category != self.ordinary {
            return Err(invalid());
        }

        let digits = chars.as_str();
        if digits.is_empty()
            || digits.len() > MAX_ROAD_NUMBER_DIGITS
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let number = digits.parse::<u16>().map_err(|_| invalid())?;
        Ok(RoadKey::new(category, number))
    }
}
