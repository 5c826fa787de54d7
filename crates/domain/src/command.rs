//! Bot commands: typed outbound instructions submitted to the device client.
//!
//! Each writable entity maps onto exactly one command shape and fills in only
//! the parameter it owns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::EnableSetting;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SetEnable { setting: EnableSetting, enable: bool },
    SetVolume { volume: u8 },
    SetCleanCount { count: u8 },
    SetCutDirection { angle: u16 },
    SetObstacleHeight { level: u8 },
}

impl Command {
    /// Wire-style name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetEnable { setting, .. } => match setting {
                EnableSetting::AdvancedMode => "setAdvancedMode",
                EnableSetting::ContinuousCleaning => "setContinuousCleaning",
                EnableSetting::CarpetAutoFanBoost => "setCarpertPressure",
                EnableSetting::CleanPreference => "setCleanPreference",
                EnableSetting::TrueDetect => "setTrueDetect",
                EnableSetting::AnimProtect => "setAnimProtect",
                EnableSetting::RainDelay => "setRainDelay",
                EnableSetting::SafeProtect => "setSafeProtect",
                EnableSetting::BorderSwitch => "setBorderSwitch",
                EnableSetting::Recognization => "setRecognization",
                EnableSetting::ChildLock => "setChildLock",
                EnableSetting::MoveupWarning => "setMoveupWarning",
                EnableSetting::CrossMapBorderWarning => "setCrossMapBorderWarning",
            },
            Self::SetVolume { .. } => "setVolume",
            Self::SetCleanCount { .. } => "setCleanCount",
            Self::SetCutDirection { .. } => "setCutDirection",
            Self::SetObstacleHeight { .. } => "setObstacleHeight",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetEnable { enable, .. } => write!(f, "{}({enable})", self.name()),
            Self::SetVolume { volume } => write!(f, "{}({volume})", self.name()),
            Self::SetCleanCount { count } => write!(f, "{}({count})", self.name()),
            Self::SetCutDirection { angle } => write!(f, "{}({angle})", self.name()),
            Self::SetObstacleHeight { level } => write!(f, "{}({level})", self.name()),
        }
    }
}
