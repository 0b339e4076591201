//! The closed set of object kinds known to the kernel.
//!
//! Registration dispatches on this tag with an exhaustive `match`, and the
//! cached road model indexes placed objects by it.

/// What an object registered with the models is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    /// A transportable parcel.
    Parcel,
    /// A moving container.
    Vehicle,
    /// A stationary container.
    Depot,
    /// Any other road user (e.g. a plain moving agent without cargo).
    Agent,
}

impl ObjectKind {
    /// Every kind, in declaration order.
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Parcel,
        ObjectKind::Vehicle,
        ObjectKind::Depot,
        ObjectKind::Agent,
    ];

    /// `true` for kinds that hold parcels.
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, ObjectKind::Vehicle | ObjectKind::Depot)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Parcel  => "parcel",
            ObjectKind::Vehicle => "vehicle",
            ObjectKind::Depot   => "depot",
            ObjectKind::Agent   => "agent",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
