//! The searchable record contract and its generic implementation.

use crate::domain::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A record that can be searched.
///
/// Implementors expose an identifier and their searchable text as
/// `(field name, raw text)` pairs. A field name that appears more than once
/// is a multi-valued field, such as one pair per tag.
pub trait Searchable {
    /// Identifier used for the final ranking tie-break.
    fn id(&self) -> ItemId;

    /// Raw searchable text, grouped by field name.
    fn field_values(&self) -> Vec<(&str, &str)>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn id(&self) -> ItemId {
        (**self).id()
    }

    fn field_values(&self) -> Vec<(&str, &str)> {
        (**self).field_values()
    }
}

/// A generic searchable record: an ID plus named text fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchableItem {
    /// Record identifier
    pub id: ItemId,

    /// Field name to raw values (more than one value for multi-valued fields)
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl SearchableItem {
    /// Create an item with no fields.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Add a single value to a field.
    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.entry(name.into()).or_default().push(text.into());
        self
    }

    /// Add several values to a (multi-valued) field.
    pub fn with_values<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Get the first value of a field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl Searchable for SearchableItem {
    fn id(&self) -> ItemId {
        self.id.clone()
    }

    fn field_values(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v.as_str())))
            .collect()
    }
}
