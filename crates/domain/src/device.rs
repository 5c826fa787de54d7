//! Device: one physical bot managed by the integration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VacHubError, ValidationError};

/// Product line of a bot.
///
/// The two families expose disjoint entity catalogs; which one applies is
/// decided by the bot's `is_goat` capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    /// Indoor vacuum cleaners.
    #[default]
    Vacuum,
    /// GOAT lawn mowers.
    Mower,
}

impl DeviceFamily {
    /// Map the client's boolean capability flag onto a family.
    #[must_use]
    pub fn from_is_goat(is_goat: bool) -> Self {
        if is_goat { Self::Mower } else { Self::Vacuum }
    }

    #[must_use]
    pub fn is_goat(self) -> bool {
        matches!(self, Self::Mower)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vacuum => "vacuum",
            Self::Mower => "mower",
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a bot, as reported by the device client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Stable identifier of the unit.
    pub serial: String,
    pub name: String,
    pub manufacturer: String,
    pub model: Option<String>,
    pub family: DeviceFamily,
}

impl DeviceInfo {
    /// Create a builder for constructing a [`DeviceInfo`].
    #[must_use]
    pub fn builder() -> DeviceInfoBuilder {
        DeviceInfoBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Validation`] when `serial` or `name` is empty.
    pub fn validate(&self) -> Result<(), VacHubError> {
        if self.serial.is_empty() {
            return Err(ValidationError::EmptySerial.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceInfo`].
#[derive(Debug, Default)]
pub struct DeviceInfoBuilder {
    serial: Option<String>,
    name: Option<String>,
    manufacturer: Option<String>,
    model: Option<String>,
    family: DeviceFamily,
}

impl DeviceInfoBuilder {
    #[must_use]
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn family(mut self, family: DeviceFamily) -> Self {
        self.family = family;
        self
    }

    #[must_use]
    pub fn is_goat(self, is_goat: bool) -> Self {
        self.family(DeviceFamily::from_is_goat(is_goat))
    }

    /// Consume the builder, validate, and return a [`DeviceInfo`].
    ///
    /// The name falls back to the serial when not provided.
    ///
    /// # Errors
    ///
    /// Returns [`VacHubError::Validation`] if `serial` is missing or empty.
    pub fn build(self) -> Result<DeviceInfo, VacHubError> {
        let serial = self.serial.unwrap_or_default();
        let info = DeviceInfo {
            name: self.name.unwrap_or_else(|| serial.clone()),
            serial,
            manufacturer: self.manufacturer.unwrap_or_else(|| "Ecovacs".to_string()),
            model: self.model,
            family: self.family,
        };
        info.validate()?;
        Ok(info)
    }
}
