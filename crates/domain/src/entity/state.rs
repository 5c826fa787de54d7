//! Entity state: the current value an entity publishes to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AttributeValue;

/// State of an entity as seen by the host.
///
/// Switches use [`On`](Self::On) / [`Off`](Self::Off); sensors and numbers
/// carry a typed [`Value`](Self::Value).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
    Unavailable,
    Value(AttributeValue),
}

impl EntityState {
    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// The typed value, for sensors and numbers.
    #[must_use]
    pub fn value(&self) -> Option<&AttributeValue> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<AttributeValue> for EntityState {
    fn from(value: AttributeValue) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
            Self::Value(v) => v.fmt(f),
        }
    }
}
