//! # Simulation parameters
//!
//! Declarative description of every input of the MASER front-end and the live values bound to
//! them.
//!
//! ## Structure
//!
//! ```text
//! parameters
//! ├── schema  (STAR, PLANET, CONE, OBSERVATION: ordered FieldDescriptor tables)
//! └── store   (ParamStore: group → key → current value)
//! ```
//!
//! The schema is pure data. Consumers must preserve its declaration order when building widgets
//! and must use [`FieldDescriptor::key`] as the merge key into the [`store::ParamStore`].
pub mod schema;
pub mod store;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{constants::ParamKey, maser_errors::MaserError};

/// Named collection of related fields.
///
/// The declaration order is the display order and never changes at runtime.
/// On the wire the observation group is called `obs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamGroup {
    #[serde(rename = "star")]
    Star,
    #[serde(rename = "planet")]
    Planet,
    #[serde(rename = "cone")]
    Cone,
    #[serde(rename = "obs")]
    Observation,
}

impl ParamGroup {
    pub const ALL: [ParamGroup; 4] = [
        ParamGroup::Star,
        ParamGroup::Planet,
        ParamGroup::Cone,
        ParamGroup::Observation,
    ];

    /// Key of the group in the request body sent to the simulation service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ParamGroup::Star => "star",
            ParamGroup::Planet => "planet",
            ParamGroup::Cone => "cone",
            ParamGroup::Observation => "obs",
        }
    }

    /// Name of the container region the widgets of this group are appended to.
    pub fn container(&self) -> &'static str {
        match self {
            ParamGroup::Star => "stellar_params",
            ParamGroup::Planet => "planet_params",
            ParamGroup::Cone => "cone_params",
            ParamGroup::Observation => "obs_params",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ParamGroup::Star => "Star",
            ParamGroup::Planet => "Planet",
            ParamGroup::Cone => "Emission cone",
            ParamGroup::Observation => "Observation",
        }
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ParamGroup {
    type Err = MaserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "star" => Ok(ParamGroup::Star),
            "planet" => Ok(ParamGroup::Planet),
            "cone" => Ok(ParamGroup::Cone),
            "obs" | "observation" => Ok(ParamGroup::Observation),
            other => Err(MaserError::UnknownGroup(other.to_string())),
        }
    }
}

/// Widget used to enter a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Number,
    Date,
    Time,
}

/// One side of the accepted interval of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    /// Whether `value` itself is accepted
    pub inclusive: bool,
}

impl Bound {
    pub const fn inclusive(value: f64) -> Self {
        Bound {
            value,
            inclusive: true,
        }
    }

    pub const fn exclusive(value: f64) -> Self {
        Bound {
            value,
            inclusive: false,
        }
    }
}

/// Default value of a field as declared in the schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Number(f64),
    Text(&'static str),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Number(n) => write!(f, "{n}"),
            DefaultValue::Text(t) => f.write_str(t),
        }
    }
}

/// Schema entry describing one input.
///
/// # Fields
///
/// * `key` - stable merge key into the parameter store, unique within the group
/// * `label` - text displayed next to the input
/// * `kind` - widget used to enter the value
/// * `default` - value displayed and stored at startup
/// * `min` / `max` - accepted interval for numeric fields, `None` means unbounded
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub key: ParamKey,
    pub label: &'static str,
    pub kind: InputKind,
    pub default: DefaultValue,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}
