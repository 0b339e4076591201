//! Simulation observer trait for progress reporting and data collection.

use pdp_core::TimeLapse;
use pdp_model::{PdpEvent, PdpModel};
use pdp_road::RoadModel;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(usize);
///
/// impl SimObserver for Deliveries {
///     fn on_event(&mut self, event: &PdpEvent) {
///         if event.event_type == PdpEventType::EndDelivery {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any model is ticked.
    fn on_tick_start(&mut self, _time: &TimeLapse) {}

    /// Called once per PDP event, in emission order, after the tick's
    /// vehicles have acted.
    fn on_event(&mut self, _event: &PdpEvent) {}

    /// Called at the end of each tick with the number of events it produced.
    fn on_tick_end(&mut self, _time: &TimeLapse, _events: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Gives read-only access to both models so output writers can record
    /// positions and loads without the sim knowing any output format.
    fn on_snapshot(&mut self, _time: u64, _road: &dyn RoadModel, _pdp: &dyn PdpModel) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_time: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
