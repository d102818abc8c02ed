use std::fmt;

/// Tag of the entity whose position is the origin for relative coordinates.
pub const CAMERA_TAG: &str = "camera";

/// Stable handle to an entity in a [`Scene`](crate::Scene).
/// Handles are allocated from 1 upwards and never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried by an entity that has not been spawned yet.
    pub const UNSPAWNED: EntityId = EntityId(0);

    /// Whether this handle was assigned by a scene.
    pub fn is_spawned(self) -> bool {
        self != Self::UNSPAWNED
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_not_spawned() {
        assert!(!EntityId::UNSPAWNED.is_spawned());
        assert!(EntityId(1).is_spawned());
    }

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(EntityId(42).to_string(), "#42");
    }
}
