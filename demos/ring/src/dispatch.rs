//! A greedy dispatcher.
//!
//! Each idle vehicle, while it has time left:
//! 1. delivers any cargo whose destination is here and whose window allows it,
//! 2. loads any available parcel here that fits and is not claimed by another vehicle,
//! 3. otherwise drives toward the nearest cargo destination, or claims and
//!    drives toward the nearest unclaimed parcel that fits.
//!
//! "Nearest" is by shortest-path length from the vehicle's next node.

use std::collections::BTreeMap;

use pdp_core::{ObjectId, Point};
use pdp_model::{ParcelState, VehicleState};
use pdp_road::RoadError;
use pdp_sim::{SimResult, VehicleContext, VehicleController};
use tracing::debug;

#[derive(Default)]
pub struct Greedy {
    /// parcel → the vehicle heading to collect it
    claims: BTreeMap<ObjectId, ObjectId>,
}

impl Greedy {
    fn deliverable_here(ctx: &VehicleContext<'_>, v: ObjectId, here: Point) -> SimResult<Option<ObjectId>> {
        let now = ctx.time.time();
        for p in ctx.pdp.contents(v)? {
            let parcel = ctx.pdp.parcel(p)?;
            if parcel.destination == here
                && ctx.pdp.time_window_policy().can_deliver(
                    &parcel.delivery_time_window,
                    now,
                    parcel.delivery_duration,
                )
            {
                return Ok(Some(p));
            }
        }
        Ok(None)
    }

    fn pickable_here(&self, ctx: &VehicleContext<'_>, v: ObjectId) -> SimResult<Option<ObjectId>> {
        let now = ctx.time.time();
        for p in ctx.pdp.parcels(&[ParcelState::Available]) {
            if self.claims.get(&p).is_some_and(|&owner| owner != v) {
                continue;
            }
            if !ctx.road.equal_position(v, p)? || !fits(ctx, v, p)? {
                continue;
            }
            let parcel = ctx.pdp.parcel(p)?;
            if ctx.pdp.time_window_policy().can_pickup(&parcel.pickup_time_window, now, parcel.pickup_duration) {
                return Ok(Some(p));
            }
        }
        Ok(None)
    }

    fn target(&mut self, ctx: &mut VehicleContext<'_>, v: ObjectId) -> SimResult<Option<Point>> {
        let cargo = ctx.pdp.contents(v)?;
        if !cargo.is_empty() {
            let dests = cargo
                .iter()
                .map(|&p| ctx.pdp.parcel(p).map(|parcel| parcel.destination))
                .collect::<Result<Vec<_>, _>>()?;
            return nearest(ctx, v, dests);
        }

        // Drop claims on parcels someone else already took.
        let pdp = &*ctx.pdp;
        self.claims
            .retain(|&p, _| pdp.parcel_state(p).is_ok_and(|s| s == ParcelState::Available));

        if let Some((&p, _)) = self.claims.iter().find(|&(_, &owner)| owner == v) {
            return Ok(Some(ctx.road.position(p)?));
        }

        let mut candidates = Vec::new();
        for p in ctx.pdp.parcels(&[ParcelState::Available]) {
            if !self.claims.contains_key(&p) && fits(ctx, v, p)? {
                candidates.push((p, ctx.road.position(p)?));
            }
        }
        let Some(at) = nearest(ctx, v, candidates.iter().map(|&(_, at)| at).collect())? else {
            return Ok(None);
        };
        if let Some(&(p, _)) = candidates.iter().find(|&&(_, pos)| pos == at) {
            debug!(vehicle = %v, parcel = %p, "claimed");
            self.claims.insert(p, v);
        }
        Ok(Some(at))
    }
}

fn fits(ctx: &VehicleContext<'_>, v: ObjectId, p: ObjectId) -> SimResult<bool> {
    let free = ctx.pdp.capacity(v)? - ctx.pdp.content_size(v)?;
    Ok(ctx.pdp.parcel(p)?.magnitude <= free)
}

fn nearest(ctx: &mut VehicleContext<'_>, v: ObjectId, points: Vec<Point>) -> SimResult<Option<Point>> {
    let mut best: Option<(f64, Point)> = None;
    for to in points {
        let path = ctx.road.shortest_path_from(v, to)?;
        let len = ctx.road.graph().path_length(&path).map_err(RoadError::from)?;
        if best.is_none_or(|(d, _)| len < d) {
            best = Some((len, to));
        }
    }
    Ok(best.map(|(_, at)| at))
}

impl VehicleController for Greedy {
    fn act(&mut self, v: ObjectId, ctx: &mut VehicleContext<'_>) -> SimResult<()> {
        while ctx.has_time_left() && ctx.pdp.vehicle_state(v)? == VehicleState::Idle {
            let here = ctx.road.position(v)?;

            if let Some(p) = Self::deliverable_here(ctx, v, here)? {
                ctx.deliver(v, p)?;
                continue;
            }
            if let Some(p) = self.pickable_here(ctx, v)? {
                self.claims.remove(&p);
                ctx.pickup(v, p)?;
                continue;
            }

            let Some(target) = self.target(ctx, v)? else {
                break;
            };
            // Already there: waiting for a window to open.
            if target == here || !ctx.move_to(v, target)?.moved() {
                break;
            }
        }
        Ok(())
    }
}
