use std::fmt;

/// Unique identifier for an entity taking part in a scenario.
///
/// Identifiers are assigned by whoever builds the roster and are never
/// reassigned. Zero is reserved as "unassigned" and rejected by
/// [`Scenario::new`](crate::state::Scenario::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder for an identifier that has not been assigned.
    pub const UNASSIGNED: Self = Self(0);

    /// Returns true if this identifier is a valid (positive) entity id.
    #[inline]
    pub const fn is_assigned(self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
