//! `pdp-sim`: tick driver for the road and PDP models.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`capability`] | `CapabilityTable`, `ModelSlot`                         |
//! | [`controller`] | `VehicleController`, `VehicleContext`, `IdleController`|
//! | [`observer`]   | `SimObserver`, `NoopObserver`                          |
//! | [`hook`]       | `RegistrationHook`                                     |
//! | [`builder`]    | `SimBuilder`                                           |
//! | [`sim`]        | `Sim` and its tick loop                                |
//! | [`error`]      | `SimError`, `SimResult<T>`                             |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pdp_sim::{SimBuilder, NoopObserver};
//!
//! let mut sim = SimBuilder::new(config, road, pdp)
//!     .controller(my_controller)
//!     .objects(objects)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod capability;
pub mod controller;
pub mod error;
pub mod hook;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use capability::{CapabilityTable, ModelSlot};
pub use controller::{IdleController, VehicleContext, VehicleController};
pub use error::{SimError, SimResult};
pub use hook::RegistrationHook;
pub use observer::{NoopObserver, SimObserver};
pub use pdp_core::SimConfig;
pub use sim::Sim;
