//! The `PdpModel` trait.

use pdp_core::{ModelId, ObjectId, ObjectKind, TimeLapse};
use pdp_road::RoadModel;

use crate::{Parcel, ParcelState, PdpEvent, PdpObject, PdpResult, PendingAction, TimeWindowPolicy, VehicleState};

/// Capacity accounting and the pickup/delivery state machine.
///
/// Operations that touch physical presence receive the road model as an
/// explicit `&mut dyn RoadModel`, so the two models can be built in any
/// order and wired by the driver.
///
/// # Time
///
/// Vehicle operations consume from the vehicle's [`TimeLapse`].  When the
/// lapse cannot cover an operation, the rest is stored as a
/// [`PendingAction`], the whole lapse is consumed, and the driver must call
/// [`continue_previous_actions`](Self::continue_previous_actions) on later
/// ticks until it completes.
///
/// # Errors
///
/// Every operation checks all of its guards before changing anything, so a
/// failed call leaves the model, the road, and the lapse untouched.
pub trait PdpModel {
    /// Identity stamped on every emitted event.
    fn issuer(&self) -> ModelId;

    /// Make every event report `issuer`.  Decorators call this on the model
    /// they wrap.
    ///
    /// # Errors
    /// [`PdpError::AlreadyInitialized`](crate::PdpError::AlreadyInitialized)
    /// once any object has been registered.
    fn bind_issuer(&mut self, issuer: ModelId) -> PdpResult<()>;

    /// `true` for the object kinds this model registers.
    fn accepts(&self, kind: ObjectKind) -> bool;

    /// Record `object` and assign its initial state.
    fn register(&mut self, object: PdpObject) -> PdpResult<()>;

    fn is_registered(&self, id: ObjectId) -> bool;

    // ── Vehicle operations ────────────────────────────────────────────────

    fn pickup(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()>;

    fn deliver(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()>;

    /// Unload a carried parcel at the vehicle's position.  Takes the
    /// parcel's delivery duration; the parcel ends up available again.
    fn drop_parcel(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()>;

    /// Spend `time` on the pending action of `vehicle`, if any.
    fn continue_previous_actions(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()>;

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Move the model's clock to `time` without ticking.  Registrations made
    /// before the first tick are classified and stamped at this time.
    fn set_current_time(&mut self, time: u64);

    /// Called once per step before any vehicle acts.
    fn tick(&mut self, time: &TimeLapse);

    /// Called once per step after every vehicle has acted.
    fn after_tick(&mut self, time: &TimeLapse);

    // ── Queries ───────────────────────────────────────────────────────────

    /// Start of the most recent tick.
    fn current_time(&self) -> u64;

    fn parcel(&self, id: ObjectId) -> PdpResult<&Parcel>;

    fn parcel_state(&self, id: ObjectId) -> PdpResult<ParcelState>;

    fn vehicle_state(&self, id: ObjectId) -> PdpResult<VehicleState>;

    fn pending_action(&self, vehicle: ObjectId) -> PdpResult<Option<PendingAction>>;

    fn contents(&self, container: ObjectId) -> PdpResult<Vec<ObjectId>>;

    /// Sum of the magnitudes of the contents.
    fn content_size(&self, container: ObjectId) -> PdpResult<f64>;

    fn capacity(&self, container: ObjectId) -> PdpResult<f64>;

    fn container_contains(&self, container: ObjectId, parcel: ObjectId) -> PdpResult<bool>;

    /// Parcels in any of `states`, ascending by id.
    fn parcels(&self, states: &[ParcelState]) -> Vec<ObjectId>;

    fn vehicles(&self) -> Vec<ObjectId>;

    fn depots(&self) -> Vec<ObjectId>;

    fn time_window_policy(&self) -> &dyn TimeWindowPolicy;

    /// Drain buffered events in emission order.
    fn take_events(&mut self) -> Vec<PdpEvent>;
}
