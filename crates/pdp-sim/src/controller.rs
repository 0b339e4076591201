//! Per-vehicle decision hook.
//!
//! The simulation owns no routing or dispatch logic.  Each tick, after any
//! pending PDP action has been continued, every vehicle with time left is
//! handed to the [`VehicleController`] together with a [`VehicleContext`]
//! borrowing both models and the vehicle's own time budget.

use pdp_core::{ObjectId, Point, TimeLapse};
use pdp_model::{PdpModel, PdpResult};
use pdp_road::{PathProgress, RoadModel, RoadResult};

use crate::SimResult;

/// Mutable view handed to a controller for one vehicle and one tick.
pub struct VehicleContext<'a> {
    pub road: &'a mut dyn RoadModel,
    pub pdp:  &'a mut dyn PdpModel,
    /// The vehicle's remaining budget for this tick.
    pub time: &'a mut TimeLapse,
}

impl VehicleContext<'_> {
    pub fn has_time_left(&self) -> bool {
        self.time.has_time_left()
    }

    pub fn move_to(&mut self, vehicle: ObjectId, destination: Point) -> RoadResult<PathProgress> {
        self.road.move_to(vehicle, destination, &mut *self.time)
    }

    pub fn pickup(&mut self, vehicle: ObjectId, parcel: ObjectId) -> PdpResult<()> {
        self.pdp.pickup(&mut *self.road, vehicle, parcel, &mut *self.time)
    }

    pub fn deliver(&mut self, vehicle: ObjectId, parcel: ObjectId) -> PdpResult<()> {
        self.pdp.deliver(&mut *self.road, vehicle, parcel, &mut *self.time)
    }

    pub fn drop_parcel(&mut self, vehicle: ObjectId, parcel: ObjectId) -> PdpResult<()> {
        self.pdp.drop_parcel(&mut *self.road, vehicle, parcel, &mut *self.time)
    }
}

/// Decides what a vehicle does with its time.
pub trait VehicleController {
    /// Spend some or all of `ctx.time` on behalf of `vehicle`.
    ///
    /// Returning an error aborts the current tick and the run.
    fn act(&mut self, vehicle: ObjectId, ctx: &mut VehicleContext<'_>) -> SimResult<()>;
}

/// Leaves every vehicle where it is.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdleController;

impl VehicleController for IdleController {
    fn act(&mut self, _vehicle: ObjectId, _ctx: &mut VehicleContext<'_>) -> SimResult<()> {
        Ok(())
    }
}

impl<F> VehicleController for F
where
    F: FnMut(ObjectId, &mut VehicleContext<'_>) -> SimResult<()>,
{
    fn act(&mut self, vehicle: ObjectId, ctx: &mut VehicleContext<'_>) -> SimResult<()> {
        (self)(vehicle, ctx)
    }
}
