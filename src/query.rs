use super::database::{CarTotals, TrafficDatabase};
use super::distance::Distance;
use super::records::Plate;
use super::roads::{RoadCategory, RoadKey};

pub fn all(db: &TrafficDatabase) -> Vec<String> {
    let cars = db.cars().map(|(plate, totals)| car_line(db, plate, totals));
    let roads = db.roads().map(|(road, distance)| road_line(road, distance));
    cars.chain(roads).collect()
}

/// Nothing is returned for a car without a completed journey.
pub fn car(db: &TrafficDatabase, plate: &Plate) -> Option<String> {
    db.car(plate).map(|totals| car_line(db, plate, totals))
}

pub fn road(db: &TrafficDatabase, road: &RoadKey) -> Option<String> {
    db.road(road).map(|distance| road_line(road, distance))
}

// "ABC123 A 10,5 S 2,0", listing only the totals that have been set.
fn car_line(db: &TrafficDatabase, plate: &Plate, totals: &CarTotals) -> String {
    let mut line = plate.to_string();
    for category in [RoadCategory::Motorway, RoadCategory::Ordinary] {
        if let Some(distance) = totals.slot(category).get() {
            line.push_str(&format!(" {} {distance}", db.classes().label(category)));
        }
    }
    line
}

fn road_line(road: &RoadKey, distance: Distance) -> String {
    format!("{road} {distance}")
}
