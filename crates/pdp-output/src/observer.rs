//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use pdp_core::TimeLapse;
use pdp_model::{PdpEvent, PdpEventType, PdpModel};
use pdp_road::RoadModel;
use pdp_sim::SimObserver;
use tracing::warn;

use crate::row::{EventRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes PDP events, vehicle snapshots, and tick
/// summaries to any [`OutputWriter`] backend.
///
/// Events are buffered during a tick and written as one batch when it ends.
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    tick:       u64,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            tick:       0,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }

    fn flush_tick(&mut self, time: &TimeLapse) -> OutputResult<()> {
        let events = std::mem::take(&mut self.pending);
        let count = |t: PdpEventType| events.iter().filter(|e| e.event_type == t).count() as u64;
        let row = TickSummaryRow {
            tick:    self.tick,
            start:   time.start(),
            events:  events.len() as u64,
            pickups: count(PdpEventType::EndPickup),
            unloads: count(PdpEventType::EndDelivery),
        };
        if !events.is_empty() {
            self.writer.write_events(&events)?;
        }
        self.writer.write_tick_summary(&row)
    }
}

/// One row per vehicle known to `pdp`, in ascending id order.
pub fn vehicle_rows(time: u64, road: &dyn RoadModel, pdp: &dyn PdpModel) -> OutputResult<Vec<VehicleSnapshotRow>> {
    pdp.vehicles()
        .into_iter()
        .map(|v| -> OutputResult<VehicleSnapshotRow> {
            let at = road.position(v)?;
            Ok(VehicleSnapshotRow {
                vehicle:  v.0,
                time,
                x:        at.x,
                y:        at.y,
                state:    pdp.vehicle_state(v)?,
                load:     pdp.content_size(v)?,
                capacity: pdp.capacity(v)?,
                parcels:  pdp.contents(v)?.len() as u32,
            })
        })
        .collect()
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, event: &PdpEvent) {
        self.pending.push(event.into());
    }

    fn on_tick_end(&mut self, time: &TimeLapse, _events: usize) {
        let result = self.flush_tick(time);
        self.store_err(result);
        self.tick += 1;
    }

    fn on_snapshot(&mut self, time: u64, road: &dyn RoadModel, pdp: &dyn PdpModel) {
        let result = vehicle_rows(time, road, pdp).and_then(|rows| {
            if rows.is_empty() {
                Ok(())
            } else {
                self.writer.write_snapshots(&rows)
            }
        });
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_time: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
