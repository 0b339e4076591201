//! The `Sim` struct and its tick loop.

use pdp_core::{ObjectId, Point, SimClock, SimConfig, TimeLapse};
use pdp_model::{PdpModel, PdpObject};
use pdp_road::{RoadModel, RoadUser};
use tracing::{debug, info, trace};

use crate::{
    CapabilityTable, ModelSlot, RegistrationHook, SimError, SimObserver, SimResult, VehicleContext,
    VehicleController,
};

/// The main simulation runner.
///
/// `Sim<R, P, C>` owns both models and drives the tick loop:
///
/// 1. **Tick**: build the lapse `[now, now + tick_length)` and tick the PDP
///    model (announced parcels whose pickup window has opened become
///    available).
/// 2. **Vehicles** (ascending `ObjectId` for determinism): each vehicle gets
///    a fresh copy of the lapse.  Any pending pickup or delivery is
///    continued first; if time remains the [`VehicleController`] spends it.
/// 3. **After tick**: the PDP model's post-tick hook runs.
/// 4. **Events**: everything the PDP model emitted is drained to the
///    observer in emission order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RoadModel, P: PdpModel, C: VehicleController> {
    /// Global configuration (start time, tick length, total ticks, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the start of the next tick.
    pub clock: SimClock,

    /// Where everything is and how it moves.
    pub road: R,

    /// Parcel, vehicle, and depot bookkeeping.
    pub pdp: P,

    /// Called once per vehicle with time left per tick.
    pub controller: C,

    pub(crate) capabilities: CapabilityTable,

    pub(crate) hooks: Vec<Box<dyn RegistrationHook>>,
}

impl<R: RoadModel, P: PdpModel, C: VehicleController> Sim<R, P, C> {
    // ── Registration ──────────────────────────────────────────────────────

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    /// Add a hook told about every object registered from now on.
    pub fn add_registration_hook(&mut self, hook: impl RegistrationHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Register a parcel, vehicle, or depot with every model whose
    /// capabilities include its kind.
    ///
    /// The object is registered with the road model and placed at its
    /// initial position (a parcel's origin) before the PDP model sees it.
    /// If a later model refuses the object, earlier registrations are undone
    /// and the error is returned.  Registration hooks run only once every
    /// model has accepted it.
    pub fn register(&mut self, object: PdpObject) -> SimResult<()> {
        let id = object.id();
        let kind = object.kind();
        let to_road = self.capabilities.accepts(kind, ModelSlot::Road);
        let to_pdp = self.capabilities.accepts(kind, ModelSlot::Pdp);
        if !to_road && !to_pdp {
            return Err(SimError::Unsupported { id, kind });
        }

        let mut object = object;
        if to_road {
            let at = object.initial_position();
            self.place(&mut object, at)?;
        }
        if to_pdp {
            if let Err(e) = self.pdp.register(object) {
                if to_road {
                    self.road.unregister(id)?;
                }
                return Err(e.into());
            }
        }
        debug!(%id, %kind, to_road, to_pdp, "registered");
        for hook in &mut self.hooks {
            hook.on_registered(id, kind, &self.road, &self.pdp);
        }
        Ok(())
    }

    /// Register a plain road user (anything that is not a parcel, vehicle,
    /// or depot) and place it at `at`.
    pub fn register_road_user(&mut self, user: &mut dyn RoadUser, at: Point) -> SimResult<()> {
        let id = user.id();
        let kind = user.kind();
        if !self.capabilities.accepts(kind, ModelSlot::Road) {
            return Err(SimError::Unsupported { id, kind });
        }
        self.place(user, at)?;
        debug!(%id, %kind, "registered road user");
        Ok(())
    }

    fn place(&mut self, user: &mut dyn RoadUser, at: Point) -> SimResult<()> {
        let id = user.id();
        self.road.register(user)?;
        if let Err(e) = self.road.add_object_at(id, at) {
            self.road.unregister(id)?;
            return Err(e.into());
        }
        Ok(())
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current time to `config.end_time()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_time();
        info!(start = self.clock.current_time, end, tick_length = self.config.tick_length, "simulation started");
        while self.clock.current_time < end {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_time);
        info!(final_time = self.clock.current_time, ticks = self.clock.ticks_elapsed(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_time`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let lapse = self.clock.lapse()?;
        let tick = self.clock.ticks_elapsed();

        observer.on_tick_start(&lapse);
        self.process_tick(&lapse)?;

        let events = self.pdp.take_events();
        for event in &events {
            observer.on_event(event);
        }
        observer.on_tick_end(&lapse, events.len());

        if self.config.output_interval_ticks > 0
            && tick.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(lapse.start(), &self.road, &self.pdp);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, lapse: &TimeLapse) -> SimResult<()> {
        trace!(%lapse, "tick");
        self.pdp.tick(lapse);

        for vehicle in self.pdp.vehicles() {
            let mut time = lapse.renewed();
            self.pdp.continue_previous_actions(&mut self.road, vehicle, &mut time)?;
            if time.has_time_left() {
                self.act(vehicle, &mut time)?;
            }
        }

        self.pdp.after_tick(lapse);
        Ok(())
    }

    fn act(&mut self, vehicle: ObjectId, time: &mut TimeLapse) -> SimResult<()> {
        let mut ctx = VehicleContext {
            road: &mut self.road,
            pdp:  &mut self.pdp,
            time,
        };
        self.controller.act(vehicle, &mut ctx)
    }
}
