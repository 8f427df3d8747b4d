use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::distance::Distance;
use super::error::LineError;
use super::records::{Plate, UpdateRecord};
use super::roads::{RoadCategory, RoadClasses, RoadKey};

/// A running total that stays unset until its first contribution,
/// so a set total of 0,0 is distinguishable from one never touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Total(Option<Distance>);

impl Total {
    pub fn add(&mut self, delta: Distance) {
        *self.0.get_or_insert(Distance(0)) += delta;
    }

    pub fn get(&self) -> Option<Distance> {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CarTotals {
    pub motorway: Total,
    pub ordinary: Total,
}

impl CarTotals {
    pub fn slot(&self, category: RoadCategory) -> &Total {
        match category {
            RoadCategory::Motorway => &self.motorway,
            RoadCategory::Ordinary => &self.ordinary,
        }
    }

    fn slot_mut(&mut self, category: RoadCategory) -> &mut Total {
        match category {
            RoadCategory::Motorway => &mut self.motorway,
            RoadCategory::Ordinary => &mut self.ordinary,
        }
    }
}

/// A car that has been seen once on a road and not yet seen leaving it.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenJourney {
    pub line_number: usize,
    // Kept only for the diagnostic if the journey turns out to be inconsistent.
    pub line: String,
    pub road: RoadKey,
    pub entry: Distance,
}

/// What applying one record did to the car's journey.
#[derive(Debug, Clone, PartialEq)]
pub enum JourneyEvent {
    Started,
    Completed { road: RoadKey, distance: Distance },
    /// The car turned up on a different road than its open journey. The
    /// stale journey was dropped and a new one started from this record.
    Restarted { stale: LineError },
}

pub struct TrafficDatabase {
    classes: RoadClasses,
    open_journeys: HashMap<Plate, OpenJourney>,
    cars: BTreeMap<Plate, CarTotals>,
    roads: BTreeMap<RoadKey, Total>,
}

impl TrafficDatabase {
    pub fn new(classes: RoadClasses) -> Self {
        TrafficDatabase {
            classes,
            open_journeys: HashMap::new(),
            cars: BTreeMap::new(),
            roads: BTreeMap::new(),
        }
    }

    pub fn classes(&self) -> &RoadClasses {
        &self.classes
    }

    /// Applies one update record read from `line_number`.
    pub fn apply(&mut self, line_number: usize, line: &str, record: UpdateRecord) -> JourneyEvent {
        let UpdateRecord { plate, road, point } = record;
        let journey = OpenJourney {
            line_number,
            line: line.to_string(),
            road,
            entry: point,
        };

        match self.open_journeys.remove(&plate) {
            None => {
                debug!("{plate} entered {road} at {point}");
                self.open_journeys.insert(plate, journey);
                JourneyEvent::Started
            }
            Some(open) if open.road == road => {
                let distance = point.between(open.entry);
                self.end_of_journey(plate, road, distance);
                JourneyEvent::Completed { road, distance }
            }
            Some(open) => {
                debug!(
                    "{plate} left {} without an exit record, restarting on {road} at {point}",
                    open.road
                );
                self.open_journeys.insert(plate, journey);
                JourneyEvent::Restarted {
                    stale: LineError {
                        line_number: open.line_number,
                        line: open.line,
                    },
                }
            }
        }
    }

    fn end_of_journey(&mut self, plate: Plate, road: RoadKey, distance: Distance) {
        debug!("{plate} completed {distance} on {road}");
        let category = self.classes.category_of(&road);
        self.cars
            .entry(plate)
            .or_default()
            .slot_mut(category)
            .add(distance);
        self.roads.entry(road).or_default().add(distance);
    }

    pub fn open_journey_count(&self) -> usize {
        self.open_journeys.len()
    }

    pub fn car(&self, plate: &Plate) -> Option<&CarTotals> {
        self.cars.get(plate)
    }

    pub fn road(&self, road: &RoadKey) -> Option<Distance> {
        self.roads.get(road).and_then(Total::get)
    }

    /// Cars with at least one completed journey, in plate order.
    pub fn cars(&self) -> impl Iterator<Item = (&Plate, &CarTotals)> {
        self.cars.iter()
    }

    /// Roads with at least one completed journey, in road order.
    pub fn roads(&self) -> impl Iterator<Item = (&RoadKey, Distance)> {
        self.roads
            .iter()
            .filter_map(|(road, total)| total.get().map(|distance| (road, distance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(plate: &str, road: &str, point: &str) -> UpdateRecord {
        UpdateRecord {
            plate: Plate(plate.to_string()),
            road: RoadClasses::default().parse_road(road).unwrap(),
            point: point.parse().unwrap(),
        }
    }

    fn apply(
        db: &mut TrafficDatabase,
        line_number: usize,
        plate: &str,
        road: &str,
        point: &str,
    ) -> JourneyEvent {
        let line = format!("{plate} {road} {point}");
        db.apply(line_number, &line, record(plate, road, point))
    }

    fn a1() -> RoadKey {
        RoadKey::new('A', 1)
    }

    #[test]
    fn test_first_contribution_is_exactly_the_delta() {
        let mut total = Total::default();
        assert_eq!(total.get(), None);
        total.add(Distance(42));
        assert_eq!(total.get(), Some(Distance(42)));
        total.add(Distance(8));
        assert_eq!(total.get(), Some(Distance(50)));
    }

    #[test]
    fn test_zero_delta_sets_the_total() {
        let mut total = Total::default();
        total.add(Distance(0));
        assert_eq!(total.get(), Some(Distance(0)));
    }

    #[test]
    fn test_same_road_completes_journey() {
        let mut db = TrafficDatabase::new(RoadClasses::default());
        assert_eq!(apply(&mut db, 1, "ABC123", "A1", "0,0"), JourneyEvent::Started);
        assert!(db.open_journeys.get(&Plate("ABC123".to_string())).is_some());
        assert!(db.car(&Plate("ABC123".to_string())).is_none());

        assert_eq!(
            apply(&mut db, 2, "ABC123", "A1", "10,5"),
            JourneyEvent::Completed {
                road: a1(),
                distance: Distance(105),
            }
        );
        let car = db.car(&Plate("ABC123".to_string())).unwrap();
        assert_eq!(car.motorway.get(), Some(Distance(105)));
        assert_eq!(car.ordinary.get(), None);
        assert_eq!(db.road(&a1()), Some(Distance(105)));
        assert_eq!(db.open_journey_count(), 0);
    }

    #[test]
    fn test_delta_is_absolute_and_accumulates() {
        let mut db = TrafficDatabase::new(RoadClasses::default());
        apply(&mut db, 1, "CAR1", "S2", "20,0");
        apply(&mut db, 2, "CAR1", "S2", "7,5");
        apply(&mut db, 3, "CAR2", "S2", "1,0");
        apply(&mut db, 4, "CAR2", "S2", "2,1");
        apply(&mut db, 5, "CAR1", "S2", "0,0");
        apply(&mut db, 6, "CAR1", "S2", "3,0");

        let car1 = db.car(&Plate("CAR1".to_string())).unwrap();
        assert_eq!(car1.ordinary.get(), Some(Distance(155)));
        assert_eq!(car1.motorway.get(), None);
        let s2 = RoadKey::new('S', 2);
        assert_eq!(db.road(&s2), Some(Distance(125 + 11 + 30)));
    }

    #[test]
    fn test_different_road_restarts_journey() {
        let mut db = TrafficDatabase::new(RoadClasses::default());
        apply(&mut db, 1, "ABC123", "A1", "0,0");
        assert_eq!(
            apply(&mut db, 2, "ABC123", "S2", "5,0"),
            JourneyEvent::Restarted {
                stale: LineError {
                    line_number: 1,
                    line: "ABC123 A1 0,0".to_string(),
                },
            }
        );

        let open = db.open_journeys.get(&Plate("ABC123".to_string())).unwrap();
        assert_eq!(open.line_number, 2);
        assert_eq!(open.road, RoadKey::new('S', 2));
        assert_eq!(open.entry, Distance(50));
        assert!(db.car(&Plate("ABC123".to_string())).is_none());
        assert_eq!(db.roads().count(), 0);
    }

    #[test]
    fn test_roads_iterate_in_road_order() {
        let mut db = TrafficDatabase::new(RoadClasses::default());
        let journeys = [("CAR1", "A2"), ("CAR2", "S1"), ("CAR3", "A1")];
        for (line, (plate, road)) in journeys.into_iter().enumerate() {
            apply(&mut db, 2 * line + 1, plate, road, "0,0");
            apply(&mut db, 2 * line + 2, plate, road, "1,0");
        }
        let order = db
            .roads()
            .map(|(road, _)| road.to_string())
            .collect::<Vec<String>>();
        assert_eq!(order, vec!["A1", "S1", "A2"]);
    }
}
