//! # Parameter store
//!
//! Live mapping `group → key → current value`, seeded from the schema defaults.
//!
//! Every key of the schema has exactly one entry at all times: [`ParamStore::set`] only
//! overwrites existing entries. Values are not validated here; the field controller validates
//! before it writes.
//!
//! The [`Serialize`] impl produces the request body expected by the simulation service, groups
//! and fields in schema order:
//!
//! ```text
//! { "star": { "M_s": 0.2, ... }, "planet": { ... }, "cone": { ... }, "obs": { "epoch": "2026-01-01", ... } }
//! ```
use std::{collections::BTreeMap, fmt};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use super::{schema, DefaultValue, ParamGroup};
use crate::{constants::ParamKey, maser_errors::MaserError};

/// Current value of a field: a number, or the raw text of a date/time input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }
}

impl From<DefaultValue> for ParamValue {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Number(n) => ParamValue::Number(n),
            DefaultValue::Text(t) => ParamValue::Text(t.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(t) => f.write_str(t),
        }
    }
}

/// Entries of one group, kept in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
struct GroupValues(Vec<(ParamKey, ParamValue)>);

impl GroupValues {
    fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut ParamValue> {
        self.0.iter_mut().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

impl Serialize for GroupValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The `ParamGroup` ordering is its declaration order, so the outer map iterates groups in
/// schema order too.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParamStore {
    groups: BTreeMap<ParamGroup, GroupValues>,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::initialize()
    }
}

impl ParamStore {
    /// Build the store from the schema defaults.
    ///
    /// Return
    /// ------
    /// * a store holding exactly one entry per schema field, set to its default value
    pub fn initialize() -> Self {
        let mut groups: BTreeMap<ParamGroup, GroupValues> = BTreeMap::new();
        for (group, desc) in schema::all_fields() {
            groups
                .entry(group)
                .or_default()
                .0
                .push((desc.key, desc.default.into()));
        }
        ParamStore { groups }
    }

    /// Overwrite one entry.
    ///
    /// Arguments
    /// ---------
    /// * `group`: the group of the field
    /// * `key`: the field key
    /// * `value`: the new value, already validated by the caller
    ///
    /// Return
    /// ------
    /// * `MaserError::UnknownParameter` if `(group, key)` is not part of the schema
    pub fn set(&mut self, group: ParamGroup, key: &str, value: ParamValue) -> Result<(), MaserError> {
        let entry = self
            .groups
            .get_mut(&group)
            .and_then(|fields| fields.get_mut(key))
            .ok_or_else(|| MaserError::UnknownParameter(format!("{group}.{key}")))?;
        *entry = value;
        Ok(())
    }

    pub fn get(&self, group: ParamGroup, key: &str) -> Option<&ParamValue> {
        self.groups.get(&group).and_then(|fields| fields.get(key))
    }

    /// Number of entries over all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(|fields| fields.0.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full nested mapping as JSON text, in the shape sent to the simulation service.
    pub fn serialize(&self) -> Result<String, MaserError> {
        Ok(serde_json::to_string(self)?)
    }
}
