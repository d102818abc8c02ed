use thiserror::Error;

use crate::api::types::EntityId;
use crate::components::component::ComponentKind;

/// Errors raised by scene, entity and component operations.
///
/// Every variant is surfaced to the caller of the operation that triggered it;
/// nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// An entity with this tag is already live.
    #[error("tried to create two objects with the same tag: {0}")]
    DuplicateTag(String),

    /// No live entity carries this tag.
    #[error("no object with tag: {0}")]
    TagNotFound(String),

    /// The handle does not refer to a live entity (never spawned, or destroyed).
    #[error("no live entity {0}")]
    EntityNotFound(EntityId),

    /// The entity has no component of the requested kind or type.
    #[error("no such component: {kind} on entity {entity}")]
    ComponentNotFound { entity: EntityId, kind: ComponentKind },

    /// The operation is permanently unsupported.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// The child is already linked under another parent.
    #[error("entity {child} already has parent {parent}")]
    AlreadyParented { child: EntityId, parent: EntityId },

    /// Linking would make an entity its own ancestor.
    #[error("making {child} a child of {parent} would create a cycle")]
    CyclicParent { parent: EntityId, child: EntityId },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while loading a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tag_message_names_the_tag() {
        let err = SceneError::DuplicateTag("enemy".into());
        assert_eq!(
            err.to_string(),
            "tried to create two objects with the same tag: enemy"
        );
    }

    #[test]
    fn component_not_found_names_kind_and_entity() {
        let err = SceneError::ComponentNotFound {
            entity: EntityId(3),
            kind: ComponentKind::new("shape"),
        };
        assert_eq!(err.to_string(), "no such component: shape on entity #3");
    }
}
