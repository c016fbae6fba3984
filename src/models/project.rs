//! Project model: a named container of tasks.

use super::item::Searchable;
use crate::domain::ItemId;
use serde::{Deserialize, Serialize};

/// A project as shown in the project list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Project {
    /// Database identifier
    pub id: u64,

    /// Project name
    pub name: String,

    /// Free-form description (may be empty)
    pub description: String,

    /// Names of the tags attached to the project
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Project {
    /// Create a project with a name and no description or tags.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach tag names.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Searchable for Project {
    fn id(&self) -> ItemId {
        ItemId::from(self.id)
    }

    fn field_values(&self) -> Vec<(&str, &str)> {
        let mut fields = vec![("name", self.name.as_str())];
        if !self.description.trim().is_empty() {
            fields.push(("description", self.description.as_str()));
        }
        fields.extend(self.tags.iter().map(|t| ("tags", t.as_str())));
        fields
    }
}
