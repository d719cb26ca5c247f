use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Items that carry a unique identifier.
pub trait Identified {
    type Id: Eq + Hash + Clone + fmt::Debug + Send + 'static;

    fn id(&self) -> Self::Id;
}

/// Backend identifier: numeric or textual, as the endpoint sends it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Untyped items are identified by their `id` field. Items without one are
/// identified by their full JSON text, so only exact repeats collapse.
impl Identified for Value {
    type Id = EntityId;

    fn id(&self) -> EntityId {
        match self.get("id") {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(n) => EntityId::Num(n),
                None => EntityId::Text(n.to_string()),
            },
            Some(Value::String(s)) => EntityId::Text(s.clone()),
            _ => EntityId::Text(self.to_string()),
        }
    }
}
