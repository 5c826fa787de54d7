//! Bot events: immutable notifications published by the device client.
//!
//! Every payload shape is a struct; [`Event`] is the tagged union of all of
//! them and [`EventKind`] is the tag subscribers register against. Enable
//! events share one payload and are told apart by their [`EnableSetting`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Consumable parts of a vacuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeSpan {
    Brush,
    Filter,
    SideBrush,
}

impl LifeSpan {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Filter => "filter",
            Self::SideBrush => "side_brush",
        }
    }
}

/// Consumable parts of a mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoatLifeSpan {
    Blade,
    LensBrush,
    /// Ultra-wideband positioning beacons; one event per cell, keyed by serial.
    UwbCell,
}

impl GoatLifeSpan {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blade => "blade",
            Self::LensBrush => "lensbrush",
            Self::UwbCell => "uwbcell",
        }
    }
}

/// Boolean device settings, each with its own event and set-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnableSetting {
    AdvancedMode,
    ContinuousCleaning,
    CarpetAutoFanBoost,
    CleanPreference,
    TrueDetect,
    AnimProtect,
    RainDelay,
    SafeProtect,
    BorderSwitch,
    Recognization,
    ChildLock,
    MoveupWarning,
    CrossMapBorderWarning,
}

impl EnableSetting {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdvancedMode => "advanced_mode",
            Self::ContinuousCleaning => "continuous_cleaning",
            Self::CarpetAutoFanBoost => "carpet_auto_fan_boost",
            Self::CleanPreference => "clean_preference",
            Self::TrueDetect => "true_detect",
            Self::AnimProtect => "anim_protect",
            Self::RainDelay => "rain_delay",
            Self::SafeProtect => "safe_protect",
            Self::BorderSwitch => "border_switch",
            Self::Recognization => "recognization",
            Self::ChildLock => "child_lock",
            Self::MoveupWarning => "moveup_warning",
            Self::CrossMapBorderWarning => "cross_map_border_warning",
        }
    }
}

/// Why a cleaning job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanJobStatus {
    NoStatus,
    Cleaning,
    Finished,
    ManuallyStopped,
    FinishedWithWarnings,
}

impl CleanJobStatus {
    /// Human-readable name shown as the last-cleaning sensor state.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::NoStatus => "no status",
            Self::Cleaning => "cleaning",
            Self::Finished => "finished",
            Self::ManuallyStopped => "manually stopped",
            Self::FinishedWithWarnings => "finished with warnings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEvent {
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryEvent {
    pub value: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub code: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSpanEvent {
    pub component: LifeSpan,
    pub percent: u8,
    /// Remaining lifetime in seconds.
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoatLifeSpanEvent {
    pub component: GoatLifeSpan,
    pub percent: u8,
    /// Remaining lifetime in seconds.
    pub remaining: i64,
    /// Cell serial, only set for [`GoatLifeSpan::UwbCell`].
    pub serial: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUwbCellEvent {
    pub serial: String,
}

/// Statistics of the current or last cleaning job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsEvent {
    /// Square meters.
    pub area: Option<u32>,
    /// Seconds.
    pub time: Option<u32>,
    pub clean_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStatsEvent {
    /// Square meters.
    pub area: u32,
    /// Seconds.
    pub time: u32,
    pub cleanings: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProtectStateEvent {
    pub is_anim_protect: Option<bool>,
    pub is_e_stop: Option<bool>,
    pub is_locked: Option<bool>,
    pub is_rain_delay: Option<bool>,
    pub is_rain_protect: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WifiInfoEvent {
    pub mac: Option<String>,
    pub ssid: Option<String>,
    pub rssi: Option<i32>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanLogEntry {
    /// Unix seconds.
    pub timestamp: i64,
    pub image_url: String,
    pub clean_type: String,
    /// Square meters.
    pub area: u32,
    /// Seconds.
    pub duration: u32,
    pub stop_reason: CleanJobStatus,
}

/// Cleaning history, most recent job first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanLogEvent {
    pub logs: Vec<CleanLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableEvent {
    pub setting: EnableSetting,
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEvent {
    pub volume: u8,
    /// Model-specific upper bound, when the bot reports one.
    pub maximum: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanCountEvent {
    pub count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutDirectionEvent {
    /// Degrees.
    pub angle: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleHeightEvent {
    pub level: u8,
}

/// Subscription key: one channel per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Availability,
    Battery,
    Error,
    LifeSpan,
    GoatLifeSpan,
    NewUwbCell,
    Stats,
    TotalStats,
    ProtectState,
    WifiInfo,
    CleanLog,
    Enable(EnableSetting),
    Volume,
    CleanCount,
    CutDirection,
    ObstacleHeight,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Availability => f.write_str("availability"),
            Self::Battery => f.write_str("battery"),
            Self::Error => f.write_str("error"),
            Self::LifeSpan => f.write_str("life_span"),
            Self::GoatLifeSpan => f.write_str("goat_life_span"),
            Self::NewUwbCell => f.write_str("new_uwb_cell"),
            Self::Stats => f.write_str("stats"),
            Self::TotalStats => f.write_str("total_stats"),
            Self::ProtectState => f.write_str("protect_state"),
            Self::WifiInfo => f.write_str("wifi_info"),
            Self::CleanLog => f.write_str("clean_log"),
            Self::Enable(setting) => write!(f, "enable:{}", setting.as_str()),
            Self::Volume => f.write_str("volume"),
            Self::CleanCount => f.write_str("clean_count"),
            Self::CutDirection => f.write_str("cut_direction"),
            Self::ObstacleHeight => f.write_str("obstacle_height"),
        }
    }
}

/// Any event a bot can publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Availability(AvailabilityEvent),
    Battery(BatteryEvent),
    Error(ErrorEvent),
    LifeSpan(LifeSpanEvent),
    GoatLifeSpan(GoatLifeSpanEvent),
    NewUwbCell(NewUwbCellEvent),
    Stats(StatsEvent),
    TotalStats(TotalStatsEvent),
    ProtectState(ProtectStateEvent),
    WifiInfo(WifiInfoEvent),
    CleanLog(CleanLogEvent),
    Enable(EnableEvent),
    Volume(VolumeEvent),
    CleanCount(CleanCountEvent),
    CutDirection(CutDirectionEvent),
    ObstacleHeight(ObstacleHeightEvent),
}

impl Event {
    /// The channel this event is delivered on.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Availability(_) => EventKind::Availability,
            Self::Battery(_) => EventKind::Battery,
            Self::Error(_) => EventKind::Error,
            Self::LifeSpan(_) => EventKind::LifeSpan,
            Self::GoatLifeSpan(_) => EventKind::GoatLifeSpan,
            Self::NewUwbCell(_) => EventKind::NewUwbCell,
            Self::Stats(_) => EventKind::Stats,
            Self::TotalStats(_) => EventKind::TotalStats,
            Self::ProtectState(_) => EventKind::ProtectState,
            Self::WifiInfo(_) => EventKind::WifiInfo,
            Self::CleanLog(_) => EventKind::CleanLog,
            Self::Enable(e) => EventKind::Enable(e.setting),
            Self::Volume(_) => EventKind::Volume,
            Self::CleanCount(_) => EventKind::CleanCount,
            Self::CutDirection(_) => EventKind::CutDirection,
            Self::ObstacleHeight(_) => EventKind::ObstacleHeight,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        $(
            impl From<$payload> for Event {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload!(
    Availability(AvailabilityEvent),
    Battery(BatteryEvent),
    Error(ErrorEvent),
    LifeSpan(LifeSpanEvent),
    GoatLifeSpan(GoatLifeSpanEvent),
    NewUwbCell(NewUwbCellEvent),
    Stats(StatsEvent),
    TotalStats(TotalStatsEvent),
    ProtectState(ProtectStateEvent),
    WifiInfo(WifiInfoEvent),
    CleanLog(CleanLogEvent),
    Enable(EnableEvent),
    Volume(VolumeEvent),
    CleanCount(CleanCountEvent),
    CutDirection(CutDirectionEvent),
    ObstacleHeight(ObstacleHeightEvent),
);
