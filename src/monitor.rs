use anyhow::Result;
use log::trace;
use std::io::{BufRead, Write};

use super::database::{JourneyEvent, TrafficDatabase};
use super::query;
use super::records::{Command, parse_line};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub records: usize,
    pub queries: usize,
    pub errors: usize,
}

/// Reads `input` line by line until it is exhausted, applying records and
/// answering queries against `db`. Query results go to `out`, bad lines
/// and inconsistent journeys to `err`. Only I/O failures end the run early.
pub fn run<R: BufRead, W: Write, E: Write>(
    db: &mut TrafficDatabase,
    mut input: R,
    mut out: W,
    mut err: E,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        summary.lines += 1;
        let line_number = summary.lines;

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }
        if buffer.is_empty() {
            continue;
        }
        let line = String::from_utf8_lossy(&buffer);

        let command = match parse_line(&line, db.classes()) {
            Ok(command) => command,
            Err(e) => {
                trace!("line {line_number} rejected: {e}");
                // Reported as the raw bytes read, not the lossy decoding.
                report(&mut err, &mut summary, line_number, &buffer)?;
                continue;
            }
        };
        trace!("line {line_number}: {command:?}");

        match command {
            Command::Update(record) => {
                summary.records += 1;
                match db.apply(line_number, &line, record) {
                    JourneyEvent::Started => {}
                    JourneyEvent::Completed { road, distance } => {
                        trace!("line {line_number} closed a journey of {distance} on {road}")
                    }
                    JourneyEvent::Restarted { stale } => report(
                        &mut err,
                        &mut summary,
                        stale.line_number,
                        stale.line.as_bytes(),
                    )?,
                }
            }
            Command::QueryAll => answer(&mut out, &mut summary, query::all(db))?,
            Command::QueryCar(plate) => answer(&mut out, &mut summary, query::car(db, &plate))?,
            Command::QueryRoad(road) => answer(&mut out, &mut summary, query::road(db, &road))?,
            Command::QueryCarAndRoad(plate, road) => {
                let lines = query::car(db, &plate)
                    .into_iter()
                    .chain(query::road(db, &road));
                answer(&mut out, &mut summary, lines)?
            }
        }
    }

    out.flush()?;
    err.flush()?;
    Ok(summary)
}

fn answer<W: Write>(
    out: &mut W,
    summary: &mut RunSummary,
    lines: impl IntoIterator<Item = String>,
) -> Result<()> {
    summary.queries += 1;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn report<E: Write>(
    err: &mut E,
    summary: &mut RunSummary,
    line_number: usize,
    line: &[u8],
) -> Result<()> {
    summary.errors += 1;
    write!(err, "Error in line {line_number}: ")?;
    err.write_all(line)?;
    err.write_all(b"\n")?;
    Ok(())
}
