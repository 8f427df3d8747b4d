use anyhow::Result;
use fs_err::File;
use log::info;
use serde::Serialize;
use std::io::{BufWriter, Write};

use super::database::TrafficDatabase;
use super::distance::Distance;
use super::records::Plate;
use super::roads::RoadKey;

#[derive(Debug, Serialize)]
pub struct CarSnapshot<'a> {
    pub plate: &'a Plate,
    pub motorway: Option<Distance>,
    pub ordinary: Option<Distance>,
}

#[derive(Debug, Serialize)]
pub struct RoadSnapshot<'a> {
    pub road: &'a RoadKey,
    pub distance: Distance,
}

/// The accumulated totals at the end of a run.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub cars: Vec<CarSnapshot<'a>>,
    pub roads: Vec<RoadSnapshot<'a>>,
    pub open_journeys: usize,
}

impl<'a> Snapshot<'a> {
    pub fn of(db: &'a TrafficDatabase) -> Self {
        Snapshot {
            cars: db
                .cars()
                .map(|(plate, totals)| CarSnapshot {
                    plate,
                    motorway: totals.motorway.get(),
                    ordinary: totals.ordinary.get(),
                })
                .collect(),
            roads: db
                .roads()
                .map(|(road, distance)| RoadSnapshot { road, distance })
                .collect(),
            open_journeys: db.open_journey_count(),
        }
    }
}

pub fn write_json_file<T: Serialize>(path: &str, data: T) -> Result<()> {
    info!("Writing to {path}");
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &data)?;
    writer.flush()?;
    Ok(())
}
