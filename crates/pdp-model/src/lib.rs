//! `pdp-model`: pickup-and-delivery bookkeeping.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`parcel`]     | `Parcel`, `ParcelBuilder`, `Admission`, `AdmissionHook`         |
//! | [`container`]  | `Vehicle`, `Depot`                                              |
//! | [`object`]     | `PdpObject`: closed enum over the three kinds                  |
//! | [`state`]      | `ParcelState`, `VehicleState`, `ActionKind`, `PendingAction`    |
//! | [`policy`]     | `TimeWindowPolicy` trait, `TimeWindowPolicies`                  |
//! | [`event`]      | `PdpEvent`, `PdpEventType`                                      |
//! | [`model`]      | `PdpModel` trait                                                |
//! | [`default`]    | `DefaultPdpModel<T>`                                            |
//! | [`forwarding`] | `ForwardingPdpModel<M>`: decorator base                        |
//! | [`error`]      | `PdpError`, `PdpResult<T>`                                      |
//!
//! # Lifecycle
//!
//! ```text
//! Announced ─tick─▶ Available ─pickup─▶ PickingUp ─done─▶ InCargo
//! InCargo ─deliver─▶ Delivering ─done─▶ Delivered
//! InCargo ─drop────▶ Delivering ─done─▶ Available
//! ```
//!
//! Intermediate states are skipped when the lapse covers the whole
//! operation.  A parcel is always in exactly one place: on the road
//! (`Announced`/`Available`), held by a pending pickup (`PickingUp`), inside
//! one vehicle (`InCargo`/`Delivering`), or nowhere once `Delivered`.

pub mod container;
pub mod default;
pub mod error;
pub mod event;
pub mod forwarding;
pub mod model;
pub mod object;
pub mod parcel;
pub mod policy;
pub mod state;


pub use container::{Depot, Vehicle};
pub use default::DefaultPdpModel;
pub use error::{PdpError, PdpResult};
pub use event::{PdpEvent, PdpEventType};
pub use forwarding::ForwardingPdpModel;
pub use model::PdpModel;
pub use object::PdpObject;
pub use parcel::{Admission, AdmissionHook, Parcel, ParcelBuilder};
pub use policy::{TimeWindowPolicies, TimeWindowPolicy};
pub use state::{ActionKind, ParcelState, PendingAction, VehicleState};
