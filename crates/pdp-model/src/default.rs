//! `DefaultPdpModel`: the reference implementation of [`PdpModel`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use pdp_core::{ModelId, ObjectId, ObjectKind, TimeLapse};
use pdp_road::{RoadError, RoadModel};

use crate::container::validate_capacity;
use crate::{
    ActionKind, Admission, Parcel, ParcelState, PdpError, PdpEvent, PdpEventType, PdpModel, PdpObject,
    PdpResult, PendingAction, TimeWindowPolicies, TimeWindowPolicy, VehicleState,
};

struct ParcelEntry {
    parcel: Parcel,
    state:  ParcelState,
}

struct ContainerEntry {
    kind:     ObjectKind,
    capacity: f64,
    size:     f64,
    contents: BTreeSet<ObjectId>,
}

/// Ordered maps everywhere: listing queries and tick promotions iterate in
/// ascending id order, which keeps event streams reproducible.
pub struct DefaultPdpModel<T: TimeWindowPolicy = TimeWindowPolicies> {
    issuer:       ModelId,
    policy:       T,
    current_time: u64,
    parcels:      BTreeMap<ObjectId, ParcelEntry>,
    containers:   BTreeMap<ObjectId, ContainerEntry>,
    pending:      BTreeMap<ObjectId, PendingAction>,
    events:       Vec<PdpEvent>,
}

impl<T: TimeWindowPolicy> DefaultPdpModel<T> {
    pub fn new(issuer: ModelId, policy: T) -> Self {
        Self {
            issuer,
            policy,
            current_time: 0,
            parcels:      BTreeMap::new(),
            containers:   BTreeMap::new(),
            pending:      BTreeMap::new(),
            events:       Vec::new(),
        }
    }

    /// Set the time used for registrations made before the first tick.
    pub fn with_current_time(mut self, time: u64) -> Self {
        self.current_time = time;
        self
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    fn parcel_entry(&self, id: ObjectId) -> PdpResult<&ParcelEntry> {
        match self.parcels.get(&id) {
            Some(entry) => Ok(entry),
            None if self.containers.contains_key(&id) => Err(PdpError::NotAParcel(id)),
            None => Err(PdpError::NotRegistered(id)),
        }
    }

    fn container(&self, id: ObjectId) -> PdpResult<&ContainerEntry> {
        match self.containers.get(&id) {
            Some(entry) => Ok(entry),
            None if self.parcels.contains_key(&id) => Err(PdpError::NotAContainer(id)),
            None => Err(PdpError::NotRegistered(id)),
        }
    }

    fn vehicle(&self, id: ObjectId) -> PdpResult<&ContainerEntry> {
        match self.container(id) {
            Ok(entry) if entry.kind == ObjectKind::Vehicle => Ok(entry),
            Ok(_) | Err(PdpError::NotAContainer(_)) => Err(PdpError::NotAVehicle(id)),
            Err(e) => Err(e),
        }
    }

    fn state_of_vehicle(&self, id: ObjectId) -> VehicleState {
        self.pending
            .get(&id)
            .map_or(VehicleState::Idle, |action| action.kind.vehicle_state())
    }

    // ── Guards ────────────────────────────────────────────────────────────

    fn ensure_on_road(road: &dyn RoadModel, vehicle: ObjectId) -> PdpResult<()> {
        if !road.contains_object(vehicle) {
            return Err(PdpError::VehicleNotOnRoad(vehicle));
        }
        Ok(())
    }

    fn ensure_idle(&self, vehicle: ObjectId) -> PdpResult<()> {
        match self.state_of_vehicle(vehicle) {
            VehicleState::Idle => Ok(()),
            state => Err(PdpError::VehicleBusy { vehicle, state }),
        }
    }

    /// Guards shared by deliver and drop: the vehicle exists, is on the road,
    /// is idle, and carries `parcel`.
    fn check_unload(&self, road: &dyn RoadModel, vehicle: ObjectId, parcel: ObjectId) -> PdpResult<&Parcel> {
        let entry = self.vehicle(vehicle)?;
        Self::ensure_on_road(road, vehicle)?;
        self.ensure_idle(vehicle)?;
        let p = self.parcel_entry(parcel)?;
        if !entry.contents.contains(&parcel) {
            return Err(PdpError::NotInContainer { container: vehicle, parcel });
        }
        Ok(&p.parcel)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    fn emit(&mut self, event_type: PdpEventType, time: u64, parcel: Option<ObjectId>, vehicle: Option<ObjectId>) {
        self.events.push(PdpEvent { event_type, issuer: self.issuer, time, parcel, vehicle });
    }

    fn set_parcel_state(&mut self, parcel: ObjectId, state: ParcelState) {
        if let Some(entry) = self.parcels.get_mut(&parcel) {
            entry.state = state;
        }
    }

    /// Run `action` now if the lapse covers it, otherwise defer the rest.
    fn start_action(&mut self, road: &mut dyn RoadModel, action: PendingAction, time: &mut TimeLapse) -> PdpResult<()> {
        if action.remaining <= time.time_left() {
            return self.finish(road, action, time);
        }
        let remaining = action.remaining - time.time_left();
        time.consume_all();
        let in_progress = match action.kind {
            ActionKind::Pickup => ParcelState::PickingUp,
            ActionKind::Delivery | ActionKind::Drop => ParcelState::Delivering,
        };
        self.set_parcel_state(action.parcel, in_progress);
        self.pending.insert(action.vehicle, PendingAction { remaining, ..action });
        debug!(
            vehicle = %action.vehicle,
            parcel = %action.parcel,
            kind = ?action.kind,
            remaining,
            "action deferred to later ticks"
        );
        Ok(())
    }

    /// Spend the remaining time of `action` and apply its effect.
    ///
    /// The caller guarantees `action.remaining <= time.time_left()`.
    fn finish(&mut self, road: &mut dyn RoadModel, action: PendingAction, time: &mut TimeLapse) -> PdpResult<()> {
        let PendingAction { vehicle, parcel, kind, remaining } = action;
        if kind == ActionKind::Drop {
            road.add_object_at_same_position(parcel, vehicle)?;
        }
        time.consume(remaining)?;
        self.pending.remove(&vehicle);

        let parcels = &self.parcels;
        if let Some(entry) = self.containers.get_mut(&vehicle) {
            match kind {
                ActionKind::Pickup => entry.contents.insert(parcel),
                ActionKind::Delivery | ActionKind::Drop => entry.contents.remove(&parcel),
            };
            entry.size = entry
                .contents
                .iter()
                .filter_map(|p| parcels.get(p))
                .map(|p| p.parcel.magnitude)
                .sum();
        }

        let now = time.time();
        let (state, event) = match kind {
            ActionKind::Pickup   => (ParcelState::InCargo, PdpEventType::EndPickup),
            ActionKind::Delivery => (ParcelState::Delivered, PdpEventType::EndDelivery),
            ActionKind::Drop     => (ParcelState::Available, PdpEventType::EndDelivery),
        };
        self.set_parcel_state(parcel, state);
        self.emit(event, now, Some(parcel), Some(vehicle));
        debug!(vehicle = %vehicle, parcel = %parcel, ?kind, time = now, %state, "action completed");
        Ok(())
    }
}

impl Default for DefaultPdpModel<TimeWindowPolicies> {
    fn default() -> Self {
        Self::new(ModelId(0), TimeWindowPolicies::default())
    }
}

impl<T: TimeWindowPolicy> PdpModel for DefaultPdpModel<T> {
    fn issuer(&self) -> ModelId {
        self.issuer
    }

    fn bind_issuer(&mut self, issuer: ModelId) -> PdpResult<()> {
        if !self.parcels.is_empty() || !self.containers.is_empty() {
            return Err(PdpError::AlreadyInitialized(issuer));
        }
        self.issuer = issuer;
        Ok(())
    }

    fn accepts(&self, kind: ObjectKind) -> bool {
        matches!(kind, ObjectKind::Parcel | ObjectKind::Vehicle | ObjectKind::Depot)
    }

    fn register(&mut self, object: PdpObject) -> PdpResult<()> {
        let id = object.id();
        if self.is_registered(id) {
            return Err(PdpError::AlreadyRegistered(id));
        }
        let now = self.current_time;
        match object {
            PdpObject::Parcel(parcel) => {
                parcel.validate()?;
                let state = if parcel.pickup_time_window.is_before_start(now) {
                    ParcelState::Announced
                } else {
                    ParcelState::Available
                };
                self.parcels.insert(id, ParcelEntry { parcel, state });
                self.emit(PdpEventType::NewParcel, now, Some(id), None);
                debug!(parcel = %id, %state, "parcel registered");
            }
            PdpObject::Vehicle(vehicle) => {
                validate_capacity(id, vehicle.capacity)?;
                self.containers.insert(id, ContainerEntry {
                    kind:     ObjectKind::Vehicle,
                    capacity: vehicle.capacity,
                    size:     0.0,
                    contents: BTreeSet::new(),
                });
                self.emit(PdpEventType::NewVehicle, now, None, Some(id));
                debug!(vehicle = %id, capacity = vehicle.capacity, "vehicle registered");
            }
            PdpObject::Depot(depot) => {
                validate_capacity(id, depot.capacity)?;
                self.containers.insert(id, ContainerEntry {
                    kind:     ObjectKind::Depot,
                    capacity: depot.capacity,
                    size:     0.0,
                    contents: BTreeSet::new(),
                });
                debug!(depot = %id, capacity = depot.capacity, "depot registered");
            }
        }
        Ok(())
    }

    fn is_registered(&self, id: ObjectId) -> bool {
        self.parcels.contains_key(&id) || self.containers.contains_key(&id)
    }

    fn pickup(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        let entry = self.vehicle(vehicle)?;
        Self::ensure_on_road(road, vehicle)?;

        let p = self.parcel_entry(parcel)?;
        if !road.contains_object(parcel) {
            return Err(PdpError::ParcelNotOnRoad(parcel));
        }
        if !p.state.is_pickable() {
            return Err(PdpError::ParcelUnavailable { parcel, state: p.state });
        }
        self.ensure_idle(vehicle)?;
        if !road.equal_position(vehicle, parcel)? {
            return Err(PdpError::NotColocated { vehicle, parcel });
        }

        let magnitude = p.parcel.magnitude;
        if entry.size + magnitude > entry.capacity {
            return Err(PdpError::InsufficientCapacity {
                container: vehicle,
                parcel,
                magnitude,
                free: entry.capacity - entry.size,
            });
        }

        let start = time.time();
        let duration = p.parcel.pickup_duration;
        if !self.policy.can_pickup(&p.parcel.pickup_time_window, start, duration) {
            return Err(PdpError::OutsideTimeWindow { parcel, action: ActionKind::Pickup, time: start });
        }
        let admission = Admission { action: ActionKind::Pickup, parcel, vehicle, time: start };
        if !p.parcel.admits(&admission) {
            return Err(PdpError::Refused { parcel, vehicle, action: ActionKind::Pickup });
        }

        road.remove_object(parcel)?;
        self.emit(PdpEventType::StartPickup, start, Some(parcel), Some(vehicle));
        debug!(vehicle = %vehicle, parcel = %parcel, time = start, "pickup started");

        let action = PendingAction { vehicle, parcel, kind: ActionKind::Pickup, remaining: duration };
        self.start_action(road, action, time)
    }

    fn deliver(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        let p = self.check_unload(road, vehicle, parcel)?;
        if road.position(vehicle)? != p.destination {
            return Err(PdpError::NotAtDestination { vehicle, parcel });
        }

        let start = time.time();
        let duration = p.delivery_duration;
        if !self.policy.can_deliver(&p.delivery_time_window, start, duration) {
            return Err(PdpError::OutsideTimeWindow { parcel, action: ActionKind::Delivery, time: start });
        }
        let admission = Admission { action: ActionKind::Delivery, parcel, vehicle, time: start };
        if !p.admits(&admission) {
            return Err(PdpError::Refused { parcel, vehicle, action: ActionKind::Delivery });
        }

        self.emit(PdpEventType::StartDelivery, start, Some(parcel), Some(vehicle));
        debug!(vehicle = %vehicle, parcel = %parcel, time = start, "delivery started");

        let action = PendingAction { vehicle, parcel, kind: ActionKind::Delivery, remaining: duration };
        self.start_action(road, action, time)
    }

    fn drop_parcel(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        parcel:  ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        let p = self.check_unload(road, vehicle, parcel)?;
        // Completion puts the parcel back next to the vehicle.
        if !road.is_registered(parcel) {
            return Err(RoadError::NotRegistered(parcel).into());
        }
        if road.contains_object(parcel) {
            return Err(RoadError::AlreadyPlaced(parcel).into());
        }

        let start = time.time();
        let duration = p.delivery_duration;
        self.emit(PdpEventType::StartDelivery, start, Some(parcel), Some(vehicle));
        debug!(vehicle = %vehicle, parcel = %parcel, time = start, "drop started");

        let action = PendingAction { vehicle, parcel, kind: ActionKind::Drop, remaining: duration };
        self.start_action(road, action, time)
    }

    fn continue_previous_actions(
        &mut self,
        road:    &mut dyn RoadModel,
        vehicle: ObjectId,
        time:    &mut TimeLapse,
    ) -> PdpResult<()> {
        self.vehicle(vehicle)?;
        let Some(action) = self.pending.get(&vehicle).copied() else {
            return Ok(());
        };
        if action.remaining <= time.time_left() {
            return self.finish(road, action, time);
        }
        let remaining = action.remaining - time.time_left();
        time.consume_all();
        self.pending.insert(vehicle, PendingAction { remaining, ..action });
        Ok(())
    }

    fn set_current_time(&mut self, time: u64) {
        self.current_time = time;
    }

    fn tick(&mut self, time: &TimeLapse) {
        self.current_time = time.start();
        let now = time.start();
        let promoted: Vec<ObjectId> = self
            .parcels
            .iter()
            .filter(|(_, e)| e.state == ParcelState::Announced && !e.parcel.pickup_time_window.is_before_start(now))
            .map(|(&id, _)| id)
            .collect();

        for id in promoted {
            self.set_parcel_state(id, ParcelState::Available);
            self.emit(PdpEventType::ParcelAvailable, now, Some(id), None);
            debug!(parcel = %id, time = now, "parcel available");
        }
    }

    fn after_tick(&mut self, _time: &TimeLapse) {}

    fn current_time(&self) -> u64 {
        self.current_time
    }

    fn parcel(&self, id: ObjectId) -> PdpResult<&Parcel> {
        Ok(&self.parcel_entry(id)?.parcel)
    }

    fn parcel_state(&self, id: ObjectId) -> PdpResult<ParcelState> {
        Ok(self.parcel_entry(id)?.state)
    }

    fn vehicle_state(&self, id: ObjectId) -> PdpResult<VehicleState> {
        self.vehicle(id)?;
        Ok(self.state_of_vehicle(id))
    }

    fn pending_action(&self, vehicle: ObjectId) -> PdpResult<Option<PendingAction>> {
        self.vehicle(vehicle)?;
        Ok(self.pending.get(&vehicle).copied())
    }

    fn contents(&self, container: ObjectId) -> PdpResult<Vec<ObjectId>> {
        Ok(self.container(container)?.contents.iter().copied().collect())
    }

    fn content_size(&self, container: ObjectId) -> PdpResult<f64> {
        Ok(self.container(container)?.size)
    }

    fn capacity(&self, container: ObjectId) -> PdpResult<f64> {
        Ok(self.container(container)?.capacity)
    }

    fn container_contains(&self, container: ObjectId, parcel: ObjectId) -> PdpResult<bool> {
        Ok(self.container(container)?.contents.contains(&parcel))
    }

    fn parcels(&self, states: &[ParcelState]) -> Vec<ObjectId> {
        self.parcels
            .iter()
            .filter(|(_, e)| states.contains(&e.state))
            .map(|(&id, _)| id)
            .collect()
    }

    fn vehicles(&self) -> Vec<ObjectId> {
        self.containers
            .iter()
            .filter(|(_, e)| e.kind == ObjectKind::Vehicle)
            .map(|(&id, _)| id)
            .collect()
    }

    fn depots(&self) -> Vec<ObjectId> {
        self.containers
            .iter()
            .filter(|(_, e)| e.kind == ObjectKind::Depot)
            .map(|(&id, _)| id)
            .collect()
    }

    fn time_window_policy(&self) -> &dyn TimeWindowPolicy {
        &self.policy
    }

    fn take_events(&mut self) -> Vec<PdpEvent> {
        std::mem::take(&mut self.events)
    }
}
