//! Tag model: a label linked to a project or a task.

use super::item::Searchable;
use crate::domain::ItemId;
use serde::{Deserialize, Serialize};

/// What kind of record a tag is attached to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinkedType {
    #[default]
    Project,
    Task,
}

/// A tag as shown in the tag list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Tag {
    /// Database identifier
    pub id: u64,

    /// Tag label
    pub name: String,

    /// Kind of the linked record
    pub linked_type: LinkedType,

    /// Identifier of the linked record
    pub linked_id: u64,
}

impl Tag {
    /// Create a tag linked to a record.
    pub fn new(id: u64, name: impl Into<String>, linked_type: LinkedType, linked_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            linked_type,
            linked_id,
        }
    }
}

impl Searchable for Tag {
    fn id(&self) -> ItemId {
        ItemId::from(self.id)
    }

    fn field_values(&self) -> Vec<(&str, &str)> {
        vec![("name", self.name.as_str())]
    }
}
