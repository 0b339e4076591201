//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `pdp_events.csv`
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! Absent parcel or vehicle ids are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

pub const EVENTS_FILE: &str = "pdp_events.csv";
pub const SNAPSHOTS_FILE: &str = "vehicle_snapshots.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["time", "event", "issuer", "parcel", "vehicle"])?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(["vehicle", "time", "x", "y", "state", "load", "capacity", "parcels"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record(["tick", "start", "events", "pickups", "unloads"])?;

        Ok(Self {
            events,
            snapshots,
            summaries,
            finished: false,
        })
    }
}

fn opt(id: Option<u32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.time.to_string(),
                row.event_type.as_str().to_owned(),
                row.issuer.to_string(),
                opt(row.parcel),
                opt(row.vehicle),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle.to_string(),
                row.time.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.state.as_str().to_owned(),
                row.load.to_string(),
                row.capacity.to_string(),
                row.parcels.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.start.to_string(),
            row.events.to_string(),
            row.pickups.to_string(),
            row.unloads.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
