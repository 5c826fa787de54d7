//! Entity descriptors: static presentation metadata an entity is built from.

use serde::{Deserialize, Serialize};

/// Host platform an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Sensor,
    Switch,
    Number,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Switch => "switch",
            Self::Number => "number",
        }
    }
}

/// Where the host shows an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// How a sensor value evolves over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    TotalIncreasing,
}

/// Static metadata of an entity.
///
/// Pure configuration data: no behaviour hangs off a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    pub key: String,
    pub translation_key: Option<String>,
    /// Explicit display name, when the translation key is not enough.
    pub name: Option<String>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub device_class: Option<String>,
    pub state_class: Option<StateClass>,
    pub category: Option<EntityCategory>,
    pub enabled_by_default: bool,
}

impl EntityDescription {
    /// Start a description whose translation key equals `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            translation_key: Some(key.clone()),
            key,
            name: None,
            icon: None,
            unit: None,
            device_class: None,
            state_class: None,
            category: None,
            enabled_by_default: true,
        }
    }

    /// Drop the translation key, relying on [`name`](Self::name) only.
    #[must_use]
    pub fn untranslated(mut self) -> Self {
        self.translation_key = None;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = Some(device_class.into());
        self
    }

    #[must_use]
    pub fn state_class(mut self, state_class: StateClass) -> Self {
        self.state_class = Some(state_class);
        self
    }

    #[must_use]
    pub fn category(mut self, category: EntityCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }
}
