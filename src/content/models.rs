//! Localized records as the backend returns them for the requested locale.

use serde::{Deserialize, Serialize};

use crate::paginate::{EntityId, Identified};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: EntityId,
    pub name: String,
    /// Rich text.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dean: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub id: EntityId,
    pub name: String,
    /// Tab the center is listed under (e.g. "scientific", "service").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub college_id: Option<EntityId>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: EntityId,
    pub title: String,
    /// Rich text.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// International relations partner institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

macro_rules! identified_by_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                type Id = EntityId;

                fn id(&self) -> EntityId {
                    self.id.clone()
                }
            }
        )*
    };
}

identified_by_id!(College, Center, StaffMember, NewsArticle, Partner, Event);
