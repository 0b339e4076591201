//! Fluent builder for constructing a [`Sim`].

use pdp_core::SimConfig;
use pdp_model::{PdpModel, PdpObject};
use pdp_road::RoadModel;
use tracing::debug;

use crate::{CapabilityTable, IdleController, RegistrationHook, Sim, SimError, SimResult, VehicleController};

/// Fluent builder for [`Sim<R, P, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start time, tick length, total ticks, time units per hour
/// - `R: RoadModel`: the road model (e.g. [`pdp_road::GraphRoadModel`])
/// - `P: PdpModel`: the PDP model (e.g. [`pdp_model::DefaultPdpModel`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                      |
/// |---------------------|------------------------------|
/// | `.controller(c)`    | [`IdleController`]           |
/// | `.objects(v)`       | nothing registered           |
/// | `.on_registered(h)` | no hooks                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, GraphRoadModel::new(graph), DefaultPdpModel::default())
///     .controller(Greedy::default())
///     .objects(fleet_and_parcels)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: RoadModel, P: PdpModel, C: VehicleController = IdleController> {
    config:     SimConfig,
    road:       R,
    pdp:        P,
    controller: C,
    objects:    Vec<PdpObject>,
    hooks:      Vec<Box<dyn RegistrationHook>>,
}

impl<R: RoadModel, P: PdpModel> SimBuilder<R, P, IdleController> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, road: R, pdp: P) -> Self {
        Self {
            config,
            road,
            pdp,
            controller: IdleController,
            objects:    Vec::new(),
            hooks:      Vec::new(),
        }
    }
}

impl<R: RoadModel, P: PdpModel, C: VehicleController> SimBuilder<R, P, C> {
    /// Replace the controller deciding what vehicles do each tick.
    pub fn controller<C2: VehicleController>(self, controller: C2) -> SimBuilder<R, P, C2> {
        SimBuilder {
            config: self.config,
            road: self.road,
            pdp: self.pdp,
            controller,
            objects: self.objects,
            hooks: self.hooks,
        }
    }

    /// Objects to register, in order, when the simulation is built.
    pub fn objects(mut self, objects: impl IntoIterator<Item = PdpObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    /// Add a hook told about every registered object, including the ones
    /// passed to [`objects`][Self::objects].
    pub fn on_registered(mut self, hook: impl RegistrationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Validate the configuration, build the capability table, register the
    /// supplied objects, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R, P, C>> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        let road_units = self.road.time_units_per_hour();
        if road_units != self.config.time_units_per_hour {
            return Err(SimError::Config(format!(
                "road model uses {road_units} time units per hour, config says {}",
                self.config.time_units_per_hour
            )));
        }

        // ── Clock, capabilities, then registration ────────────────────────
        let mut pdp = self.pdp;
        pdp.set_current_time(self.config.start_time);
        let capabilities = CapabilityTable::build(&pdp);
        debug!(?capabilities, "capability table built");

        let mut sim = Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            road:       self.road,
            pdp,
            controller: self.controller,
            capabilities,
            hooks:      self.hooks,
        };
        for object in self.objects {
            sim.register(object)?;
        }
        Ok(sim)
    }
}
