//! The road-user capability and a plain moving agent.

use pdp_core::{ObjectId, ObjectKind};

use crate::RoadModel;

/// Anything that can be registered with a [`RoadModel`].
///
/// An object that returns `Some(speed)` is a moving road user and may call
/// `follow_path`; the speed is constant, in distance units per hour.
pub trait RoadUser {
    fn id(&self) -> ObjectId;

    fn kind(&self) -> ObjectKind;

    fn speed(&self) -> Option<f64> {
        None
    }

    /// Called once, right after the road model accepted the registration.
    fn on_road_registered(&mut self, _road: &dyn RoadModel) {}
}

/// A road user with no cargo, only an identity and an optional speed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Agent {
    pub id:    ObjectId,
    pub speed: Option<f64>,
}

impl Agent {
    pub fn moving(id: ObjectId, speed: f64) -> Self {
        Self { id, speed: Some(speed) }
    }

    pub fn stationary(id: ObjectId) -> Self {
        Self { id, speed: None }
    }
}

impl RoadUser for Agent {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Agent
    }

    fn speed(&self) -> Option<f64> {
        self.speed
    }
}
