use serde::Serialize;
use serde_json::Value;

/// Anything kept in a collection document under a numeric id.
pub trait Entity {
    fn id(&self) -> u64;
}

/// One element of a collection document.
///
/// Elements that decode into `T` are editable; the rest are carried as the
/// JSON they were read as and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stored<T> {
    Entity(T),
    Raw(Value),
}

impl<T> Stored<T> {
    pub fn entity(&self) -> Option<&T> {
        match self {
            Stored::Entity(entity) => Some(entity),
            Stored::Raw(_) => None,
        }
    }

    pub fn entity_mut(&mut self) -> Option<&mut T> {
        match self {
            Stored::Entity(entity) => Some(entity),
            Stored::Raw(_) => None,
        }
    }

    pub fn into_entity(self) -> Option<T> {
        match self {
            Stored::Entity(entity) => Some(entity),
            Stored::Raw(_) => None,
        }
    }
}

impl<T: Entity> Stored<T> {
    /// Id used for allocation; raw elements count when they carry an integer id.
    pub fn id(&self) -> Option<u64> {
        match self {
            Stored::Entity(entity) => Some(entity.id()),
            Stored::Raw(value) => value.get("id").and_then(Value::as_u64),
        }
    }
}
