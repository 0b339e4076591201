//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Sink for simulation output rows.
///
/// Errors are returned to [`SimOutputObserver`](crate::SimOutputObserver),
/// which stores the first one for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of PDP events, in emission order.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
