//! Parcels: immutable transport orders.
//!
//! A parcel says where it starts, where it must go, how much room it takes,
//! how long loading and unloading take, and when each is on time.  Its
//! lifecycle state lives in the PDP model, never on the parcel.
//!
//! # Usage
//!
//! ```rust
//! use pdp_core::{ObjectId, Point, TimeWindow};
//! use pdp_model::Parcel;
//!
//! let parcel = Parcel::builder(ObjectId(7), Point::new(0.0, 0.0), Point::new(10.0, 0.0))
//!     .magnitude(2.5)
//!     .service_duration(60_000)
//!     .pickup_time_window(TimeWindow::new(0, 3_600_000).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(parcel.delivery_duration, 60_000);
//! ```

use std::fmt;
use std::sync::Arc;

use pdp_core::{ObjectId, Point, TimeWindow};

use crate::{ActionKind, PdpError, PdpResult};

/// The request a parcel's admission hook is asked about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Admission {
    pub action:  ActionKind,
    pub parcel:  ObjectId,
    pub vehicle: ObjectId,
    /// The instant the action would start.
    pub time:    u64,
}

/// Per-parcel veto over pickups and deliveries, checked after the time-window
/// policy.  Returning `false` rejects the action.
pub type AdmissionHook = Arc<dyn Fn(&Admission) -> bool + Send + Sync>;

#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parcel {
    pub id:                   ObjectId,
    /// Node where the parcel is placed on the road at registration.
    pub origin:               Point,
    pub destination:          Point,
    /// Capacity the parcel occupies in a container.
    pub magnitude:            f64,
    pub pickup_duration:      u64,
    pub pickup_time_window:   TimeWindow,
    pub delivery_duration:    u64,
    pub delivery_time_window: TimeWindow,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub hook:                 Option<AdmissionHook>,
}

impl Parcel {
    pub fn builder(id: ObjectId, origin: Point, destination: Point) -> ParcelBuilder {
        ParcelBuilder {
            parcel: Parcel {
                id,
                origin,
                destination,
                magnitude:            1.0,
                pickup_duration:      0,
                pickup_time_window:   TimeWindow::ALWAYS,
                delivery_duration:    0,
                delivery_time_window: TimeWindow::ALWAYS,
                hook:                 None,
            },
        }
    }

    /// Ask the admission hook, if any.
    pub fn admits(&self, admission: &Admission) -> bool {
        self.hook.as_ref().is_none_or(|hook| hook(admission))
    }

    pub(crate) fn validate(&self) -> PdpResult<()> {
        if !(self.magnitude.is_finite() && self.magnitude >= 0.0) {
            return Err(PdpError::InvalidObject {
                id:     self.id,
                reason: format!("magnitude must be finite and non-negative, got {}", self.magnitude),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parcel")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("magnitude", &self.magnitude)
            .field("pickup_duration", &self.pickup_duration)
            .field("pickup_time_window", &self.pickup_time_window)
            .field("delivery_duration", &self.delivery_duration)
            .field("delivery_time_window", &self.delivery_time_window)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Fluent builder for [`Parcel`].
///
/// Defaults: magnitude `1.0`, zero durations, windows always open, no hook.
pub struct ParcelBuilder {
    parcel: Parcel,
}

impl ParcelBuilder {
    pub fn magnitude(mut self, magnitude: f64) -> Self {
        self.parcel.magnitude = magnitude;
        self
    }

    pub fn pickup_duration(mut self, duration: u64) -> Self {
        self.parcel.pickup_duration = duration;
        self
    }

    pub fn delivery_duration(mut self, duration: u64) -> Self {
        self.parcel.delivery_duration = duration;
        self
    }

    /// Set both the pickup and the delivery duration.
    pub fn service_duration(self, duration: u64) -> Self {
        self.pickup_duration(duration).delivery_duration(duration)
    }

    pub fn pickup_time_window(mut self, window: TimeWindow) -> Self {
        self.parcel.pickup_time_window = window;
        self
    }

    pub fn delivery_time_window(mut self, window: TimeWindow) -> Self {
        self.parcel.delivery_time_window = window;
        self
    }

    pub fn admission(mut self, hook: impl Fn(&Admission) -> bool + Send + Sync + 'static) -> Self {
        self.parcel.hook = Some(Arc::new(hook));
        self
    }

    /// # Errors
    /// [`PdpError::InvalidObject`] if the magnitude is negative or not finite.
    pub fn build(self) -> PdpResult<Parcel> {
        self.parcel.validate()?;
        Ok(self.parcel)
    }
}
