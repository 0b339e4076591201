//! Registration hooks: told about every object the models accepted.

use pdp_core::{ObjectId, ObjectKind};
use pdp_model::PdpModel;
use pdp_road::RoadModel;

/// Called by [`Sim::register`][crate::Sim::register] once every model whose
/// capabilities include the object's kind has accepted it.
///
/// Never called for an object that was refused or rolled back.
pub trait RegistrationHook {
    fn on_registered(&mut self, id: ObjectId, kind: ObjectKind, road: &dyn RoadModel, pdp: &dyn PdpModel);
}

impl<F> RegistrationHook for F
where
    F: FnMut(ObjectId, ObjectKind, &dyn RoadModel, &dyn PdpModel),
{
    fn on_registered(&mut self, id: ObjectId, kind: ObjectKind, road: &dyn RoadModel, pdp: &dyn PdpModel) {
        (self)(id, kind, road, pdp)
    }
}
