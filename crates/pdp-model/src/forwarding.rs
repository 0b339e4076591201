//! `ForwardingPdpModel`: base for decorators around a [`PdpModel`].
//!
//! The wrapper forwards every call unchanged.  Construction binds the
//! wrapper's issuer on the wrapped model, so a chain of wrappers ends up with
//! every event reporting the outermost one.  Custom decorators embed a
//! `ForwardingPdpModel` (or follow the same pattern) and override only the
//! operations they intercept.

use tracing::trace;

use pdp_core::{ModelId, ObjectId, ObjectKind, TimeLapse};
use pdp_road::RoadModel;

use crate::{
    Parcel, ParcelState, PdpEvent, PdpModel, PdpObject, PdpResult, PendingAction, TimeWindowPolicy,
    VehicleState,
};

pub struct ForwardingPdpModel<M: PdpModel> {
    inner:  M,
    issuer: ModelId,
}

impl<M: PdpModel> ForwardingPdpModel<M> {
    /// Wrap `inner`, reporting `issuer` on all of its events.
    ///
    /// # Errors
    /// [`PdpError::AlreadyInitialized`](crate::PdpError::AlreadyInitialized)
    /// if `inner` has already registered an object.
    pub fn new(mut inner: M, issuer: ModelId) -> PdpResult<Self> {
        inner.bind_issuer(issuer)?;
        Ok(Self { inner, issuer })
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: PdpModel> PdpModel for ForwardingPdpModel<M> {
    fn issuer(&self) -> ModelId {
        self.issuer
    }

    fn bind_issuer(&mut self, issuer: ModelId) -> PdpResult<()> {
        self.inner.bind_issuer(issuer)?;
        self.issuer = issuer;
        Ok(())
    }

    fn accepts(&self, kind: ObjectKind) -> bool {
        self.inner.accepts(kind)
    }

    fn register(&mut self, object: PdpObject) -> PdpResult<()> {
        trace!(issuer = %self.issuer, object = %object.id(), "forward register");
        self.inner.register(object)
    }

    fn is_registered(&self, id: ObjectId) -> bool {
        self.inner.is_registered(id)
    }

    fn pickup(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        trace!(issuer = %self.issuer, %vehicle, %parcel, "forward pickup");
        self.inner.pickup(road, vehicle, parcel, time)
    }

    fn deliver(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        trace!(issuer = %self.issuer, %vehicle, %parcel, "forward deliver");
        self.inner.deliver(road, vehicle, parcel, time)
    }

    fn drop_parcel(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        trace!(issuer = %self.issuer, %vehicle, %parcel, "forward drop");
        self.inner.drop_parcel(road, vehicle, parcel, time)
    }

    fn continue_previous_actions(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        self.inner.continue_previous_actions(road, vehicle, time)
    }

    fn set_current_time(&mut self, time: u64) {
        self.inner.set_current_time(time)
    }

    fn tick(&mut self, time: &TimeLapse) {
        self.inner.tick(time)
    }

    fn after_tick(&mut self, time: &TimeLapse) {
        self.inner.after_tick(time)
    }

    fn current_time(&self) -> u64 {
        self.inner.current_time()
    }

    fn parcel(&self, id: ObjectId) -> PdpResult<&Parcel> {
        self.inner.parcel(id)
    }

    fn parcel_state(&self, id: ObjectId) -> PdpResult<ParcelState> {
        self.inner.parcel_state(id)
    }

    fn vehicle_state(&self, id: ObjectId) -> PdpResult<VehicleState> {
        self.inner.vehicle_state(id)
    }

    fn pending_action(&self, vehicle: ObjectId) -> PdpResult<Option<PendingAction>> {
        self.inner.pending_action(vehicle)
    }

    fn contents(&self, container: ObjectId) -> PdpResult<Vec<ObjectId>> {
        self.inner.contents(container)
    }

    fn content_size(&self, container: ObjectId) -> PdpResult<f64> {
        self.inner.content_size(container)
    }

    fn capacity(&self, container: ObjectId) -> PdpResult<f64> {
        self.inner.capacity(container)
    }

    fn container_contains(&self, container: ObjectId, parcel: ObjectId) -> PdpResult<bool> {
        self.inner.container_contains(container, parcel)
    }

    fn parcels(&self, states: &[ParcelState]) -> Vec<ObjectId> {
        self.inner.parcels(states)
    }

    fn vehicles(&self) -> Vec<ObjectId> {
        self.inner.vehicles()
    }

    fn depots(&self) -> Vec<ObjectId> {
        self.inner.depots()
    }

    fn time_window_policy(&self) -> &dyn TimeWindowPolicy {
        self.inner.time_window_policy()
    }

    fn take_events(&mut self) -> Vec<PdpEvent> {
        self.inner.take_events()
    }
}
