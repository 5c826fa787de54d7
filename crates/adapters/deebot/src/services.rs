//! Host service calls understood by the integration.

use serde::Deserialize;

use vachub_domain::event::EventKind;

use crate::error::DeebotError;

/// Parsed service call.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    TurnOn,
    TurnOff,
    SetValue(f64),
    /// Ask the bot to re-publish one kind of event.
    Refresh(EventKind),
}

#[derive(Debug, Deserialize)]
struct SetValueData {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct RefreshData {
    category: String,
}

impl ServiceCall {
    /// Parse a service name and its JSON data.
    ///
    /// # Errors
    ///
    /// Returns [`DeebotError::UnknownService`] for an unknown name,
    /// [`DeebotError::InvalidData`] when the data does not have the expected
    /// shape and [`DeebotError::UnknownRefreshCategory`] for a refresh of
    /// something the bot cannot re-publish.
    pub fn parse(service: &str, data: serde_json::Value) -> Result<Self, DeebotError> {
        match service {
            "turn_on" => Ok(Self::TurnOn),
            "turn_off" => Ok(Self::TurnOff),
            "set_value" => {
                let data: SetValueData =
                    serde_json::from_value(data).map_err(|source| DeebotError::InvalidData {
                        service: "set_value",
                        source,
                    })?;
                Ok(Self::SetValue(data.value))
            }
            "refresh" => {
                let data: RefreshData =
                    serde_json::from_value(data).map_err(|source| DeebotError::InvalidData {
                        service: "refresh",
                        source,
                    })?;
                refresh_kind(&data.category)
                    .map(Self::Refresh)
                    .ok_or(DeebotError::UnknownRefreshCategory(data.category))
            }
            other => Err(DeebotError::UnknownService(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::SetValue(_) => "set_value",
            Self::Refresh(_) => "refresh",
        }
    }
}

/// Event kind re-published by a `refresh` of `category`.
pub fn refresh_kind(category: &str) -> Option<EventKind> {
    let kind = match category {
        "battery" => EventKind::Battery,
        "clean_logs" => EventKind::CleanLog,
        "error" => EventKind::Error,
        "life_spans" => EventKind::LifeSpan,
        "goat_life_spans" => EventKind::GoatLifeSpan,
        "stats" => EventKind::Stats,
        "total_stats" => EventKind::TotalStats,
        "wifi" => EventKind::WifiInfo,
        "protect_state" => EventKind::ProtectState,
        "volume" => EventKind::Volume,
        _ => return None,
    };
    Some(kind)
}
