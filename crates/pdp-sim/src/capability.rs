//! Which model registers which object kind.
//!
//! Built once by [`SimBuilder`](crate::SimBuilder) from each model's
//! declared kinds, then consulted on every registration.  Dispatch is a
//! direct `match` on [`ModelSlot`]; nothing is discovered at runtime.

use pdp_core::ObjectKind;
use pdp_model::PdpModel;

/// A model owned by the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ModelSlot {
    Road,
    Pdp,
}

/// `ObjectKind → [ModelSlot]`, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    slots: [Vec<ModelSlot>; ObjectKind::ALL.len()],
}

impl CapabilityTable {
    /// The road model accepts every kind; the PDP model declares its own.
    /// The road always comes first so objects are placed before the PDP
    /// model sees them.
    pub fn build(pdp: &dyn PdpModel) -> Self {
        let mut table = Self::default();
        for kind in ObjectKind::ALL {
            table.allow(kind, ModelSlot::Road);
            if pdp.accepts(kind) {
                table.allow(kind, ModelSlot::Pdp);
            }
        }
        table
    }

    pub fn allow(&mut self, kind: ObjectKind, slot: ModelSlot) {
        let slots = &mut self.slots[kind_index(kind)];
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }

    pub fn models_for(&self, kind: ObjectKind) -> &[ModelSlot] {
        &self.slots[kind_index(kind)]
    }

    pub fn accepts(&self, kind: ObjectKind, slot: ModelSlot) -> bool {
        self.models_for(kind).contains(&slot)
    }
}

fn kind_index(kind: ObjectKind) -> usize {
    match kind {
        ObjectKind::Parcel  => 0,
        ObjectKind::Vehicle => 1,
        ObjectKind::Depot   => 2,
        ObjectKind::Agent   => 3,
    }
}
