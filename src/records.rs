use serde::Serialize;
use std::{fmt, ops::RangeInclusive, str::FromStr};

use super::distance::Distance;
use super::error::ParseError;
use super::roads::{RoadClasses, RoadKey};

const PLATE_LENGTH: RangeInclusive<usize> = 3..=11;
const QUERY_MARKER: char = '?';

/// A car's registration plate: 3 to 11 ASCII letters or digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
pub struct Plate(pub String);

impl FromStr for Plate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if PLATE_LENGTH.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Plate(s.to_string()))
        } else {
            Err(ParseError::Plate(s.to_string()))
        }
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A car seen at a point on a road.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    pub plate: Plate,
    pub road: RoadKey,
    pub point: Distance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Update(UpdateRecord),
    QueryAll,
    QueryCar(Plate),
    QueryRoad(RoadKey),
    // "?A12" names both a possible car and a possible road; both are answered.
    QueryCarAndRoad(Plate, RoadKey),
}

// Matches the `\s` class: space, \t, \n, \v, \f and \r.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Parses one non-empty input line into a command.
pub fn parse_line(line: &str, classes: &RoadClasses) -> Result<Command, ParseError> {
    let trimmed = line.trim_matches(is_separator);
    match trimmed.strip_prefix(QUERY_MARKER) {
        Some(target) => parse_query(target.trim_start_matches(is_separator), classes),
        None => parse_update(trimmed, classes).map(Command::Update),
    }
}

fn parse_update(s: &str, classes: &RoadClasses) -> Result<UpdateRecord, ParseError> {
    let fields = s
        .split(is_separator)
        .filter(|field| !field.is_empty())
        .collect::<Vec<&str>>();
    let [plate, road, point] = fields.as_slice() else {
        return Err(ParseError::Malformed);
    };
    Ok(UpdateRecord {
        plate: plate.parse()?,
        road: classes.parse_road(road)?,
        point: point.parse()?,
    })
}

fn parse_query(target: &str, classes: &RoadClasses) -> Result<Command, ParseError> {
    if target.is_empty() {
        return Ok(Command::QueryAll);
    }
    match (target.parse::<Plate>(), classes.parse_road(target)) {
        (Ok(plate), Ok(road)) => Ok(Command::QueryCarAndRoad(plate, road)),
        (Ok(plate), Err(_)) => Ok(Command::QueryCar(plate)),
        (Err(_), Ok(road)) => Ok(Command::QueryRoad(road)),
        (Err(_), Err(_)) => Err(ParseError::Malformed),
    }
}
