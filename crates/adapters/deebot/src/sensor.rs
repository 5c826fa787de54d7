//! Read-only sensor entities and their catalogs.

use std::sync::Arc;

use vachub_app::ports::Bot;
use vachub_domain::device::DeviceFamily;
use vachub_domain::entity::{
    AttributeValue, Entity, EntityCategory, EntityDescription, EntityState, Platform, StateClass,
};
use vachub_domain::error::VacHubError;
use vachub_domain::event::{Event, EventKind, GoatLifeSpan, LifeSpan};
use vachub_domain::time::now;

use crate::entity::{BotEntity, SharedHost, snapshot_builder};

/// Pure extraction from an event to the sensor value. `None` means "no update".
pub type Extract = fn(&Event) -> Option<AttributeValue>;

/// A consumable part, on either product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeSpanComponent {
    Vacuum(LifeSpan),
    Mower(GoatLifeSpan),
}

impl LifeSpanComponent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Vacuum(part) => part.as_str(),
            Self::Mower(part) => part.as_str(),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Vacuum(LifeSpan::Brush | LifeSpan::SideBrush)
            | Self::Mower(GoatLifeSpan::LensBrush) => "mdi:broom",
            Self::Vacuum(LifeSpan::Filter) => "mdi:air-filter",
            Self::Mower(GoatLifeSpan::Blade) => "mdi:saw-blade",
            Self::Mower(GoatLifeSpan::UwbCell) => "mdi:lighthouse-on",
        }
    }
}

/// How a sensor reacts to bot events.
#[derive(Debug, Clone)]
pub enum SensorKind {
    /// One event kind, one pure extraction.
    Generic { kind: EventKind, extract: Extract },
    /// Error code, with the description as attribute.
    LastError,
    /// One consumable part out of the life-span event stream.
    LifeSpan(LifeSpanComponent),
    /// One UWB positioning cell, discovered at runtime.
    UwbCell { serial: String },
    /// Most recent entry of the cleaning log.
    LastCleaning,
}

#[derive(Debug, Clone)]
pub struct SensorDescription {
    pub entity: EntityDescription,
    pub kind: SensorKind,
    /// Ignore availability events and always report as available.
    pub always_available: bool,
}

impl SensorDescription {
    fn generic(entity: EntityDescription, kind: EventKind, extract: Extract) -> Self {
        Self {
            entity,
            kind: SensorKind::Generic { kind, extract },
            always_available: false,
        }
    }
}

/// Sensors registered for every bot.
pub fn shared_catalog() -> Vec<SensorDescription> {
    vec![
        SensorDescription {
            entity: EntityDescription::new("last_error")
                .icon("mdi:alert-circle")
                .enabled_by_default(false)
                .category(EntityCategory::Diagnostic),
            kind: SensorKind::LastError,
            always_available: true,
        },
        SensorDescription::generic(
            EntityDescription::new("battery_level")
                .unit("%")
                .device_class("battery")
                .category(EntityCategory::Diagnostic),
            EventKind::Battery,
            |event| match event {
                Event::Battery(battery) => battery.value.map(AttributeValue::from),
                _ => None,
            },
        ),
    ]
}

/// Sensors registered for vacuums only.
pub fn vacuum_catalog() -> Vec<SensorDescription> {
    let mut sensors: Vec<SensorDescription> = [LifeSpan::Brush, LifeSpan::Filter, LifeSpan::SideBrush]
        .into_iter()
        .map(|part| life_span(LifeSpanComponent::Vacuum(part)))
        .collect();

    sensors.push(SensorDescription {
        entity: EntityDescription::new("last_cleaning")
            .icon("mdi:history")
            .enabled_by_default(false),
        kind: SensorKind::LastCleaning,
        always_available: true,
    });

    sensors.extend([
        SensorDescription::generic(
            EntityDescription::new("stats_area")
                .icon("mdi:floor-plan")
                .unit("m²")
                .enabled_by_default(false),
            EventKind::Stats,
            |event| match event {
                Event::Stats(stats) => stats.area.map(AttributeValue::from),
                _ => None,
            },
        ),
        SensorDescription::generic(
            EntityDescription::new("stats_time")
                .icon("mdi:timer-outline")
                .unit("min")
                .enabled_by_default(false),
            EventKind::Stats,
            |event| match event {
                Event::Stats(stats) => stats
                    .time
                    .filter(|secs| *secs != 0)
                    .map(|secs| AttributeValue::Int(round_div(secs, 60))),
                _ => None,
            },
        ),
        SensorDescription::generic(
            EntityDescription::new("stats_type")
                .icon("mdi:cog")
                .enabled_by_default(false),
            EventKind::Stats,
            |event| match event {
                Event::Stats(stats) => stats.clean_type.clone().map(AttributeValue::String),
                _ => None,
            },
        ),
        SensorDescription::generic(
            EntityDescription::new("stats_total_area")
                .icon("mdi:floor-plan")
                .unit("m²")
                .state_class(StateClass::TotalIncreasing)
                .enabled_by_default(false),
            EventKind::TotalStats,
            |event| match event {
                Event::TotalStats(stats) => Some(stats.area.into()),
                _ => None,
            },
        ),
        SensorDescription::generic(
            EntityDescription::new("stats_total_time")
                .icon("mdi:timer-outline")
                .unit("h")
                .state_class(StateClass::TotalIncreasing)
                .enabled_by_default(false),
            EventKind::TotalStats,
            |event| match event {
                Event::TotalStats(stats) => Some(AttributeValue::Int(round_div(stats.time, 3600))),
                _ => None,
            },
        ),
        SensorDescription::generic(
            EntityDescription::new("stats_total_cleanings")
                .icon("mdi:counter")
                .state_class(StateClass::TotalIncreasing)
                .enabled_by_default(false),
            EventKind::TotalStats,
            |event| match event {
                Event::TotalStats(stats) => Some(stats.cleanings.into()),
                _ => None,
            },
        ),
    ]);
    sensors
}

/// Sensors registered for mowers only. UWB cells are added later, on discovery.
pub fn mower_catalog() -> Vec<SensorDescription> {
    let mut sensors: Vec<SensorDescription> = [GoatLifeSpan::Blade, GoatLifeSpan::LensBrush]
        .into_iter()
        .map(|part| life_span(LifeSpanComponent::Mower(part)))
        .collect();

    sensors.extend([
        protect_state("is_anim_protect", "mdi:paw-off-outline", |event| match event {
            Event::ProtectState(state) => state.is_anim_protect.map(AttributeValue::from),
            _ => None,
        }),
        protect_state("is_e_stop", "mdi:car-brake-alert", |event| match event {
            Event::ProtectState(state) => state.is_e_stop.map(AttributeValue::from),
            _ => None,
        }),
        protect_state("is_locked", "mdi:lock-alert-outline", |event| match event {
            Event::ProtectState(state) => state.is_locked.map(AttributeValue::from),
            _ => None,
        }),
        protect_state("is_rain_delay", "mdi:clock-time-eight-outline", |event| match event {
            Event::ProtectState(state) => state.is_rain_delay.map(AttributeValue::from),
            _ => None,
        }),
        protect_state("is_rain_protect", "mdi:weather-pouring", |event| match event {
            Event::ProtectState(state) => state.is_rain_protect.map(AttributeValue::from),
            _ => None,
        }),
        wifi("wifi_mac", "mdi:desktop-classic", |event| match event {
            Event::WifiInfo(wifi) => wifi.mac.clone().map(AttributeValue::String),
            _ => None,
        }),
        wifi("wifi_ssid", "mdi:wifi", |event| match event {
            Event::WifiInfo(wifi) => wifi.ssid.clone().map(AttributeValue::String),
            _ => None,
        }),
        wifi("wifi_rssi", "mdi:signal-variant", |event| match event {
            Event::WifiInfo(wifi) => wifi.rssi.map(AttributeValue::from),
            _ => None,
        }),
        wifi("wifi_ip", "mdi:ip-network-outline", |event| match event {
            Event::WifiInfo(wifi) => wifi.ip.clone().map(AttributeValue::String),
            _ => None,
        }),
    ]);
    sensors
}

/// Every sensor a bot of `family` starts with.
pub fn catalog(family: DeviceFamily) -> Vec<SensorDescription> {
    let mut sensors = shared_catalog();
    match family {
        DeviceFamily::Vacuum => sensors.extend(vacuum_catalog()),
        DeviceFamily::Mower => sensors.extend(mower_catalog()),
    }
    sensors
}

/// Sensor for a UWB cell reported by a mower.
pub fn uwb_cell(serial: &str) -> SensorDescription {
    let lower = serial.to_lowercase();
    SensorDescription {
        entity: EntityDescription::new(format!("life_span_{lower}"))
            .untranslated()
            .name(format!("UWB Cell {lower}"))
            .icon(LifeSpanComponent::Mower(GoatLifeSpan::UwbCell).icon())
            .unit("%")
            .category(EntityCategory::Diagnostic)
            .enabled_by_default(false),
        kind: SensorKind::UwbCell {
            serial: serial.to_string(),
        },
        always_available: false,
    }
}

fn life_span(component: LifeSpanComponent) -> SensorDescription {
    SensorDescription {
        entity: EntityDescription::new(format!("life_span_{}", component.name()))
            .icon(component.icon())
            .unit("%")
            .category(EntityCategory::Diagnostic)
            .enabled_by_default(false),
        kind: SensorKind::LifeSpan(component),
        always_available: false,
    }
}

fn protect_state(key: &str, icon: &str, extract: Extract) -> SensorDescription {
    SensorDescription::generic(
        EntityDescription::new(key).icon(icon),
        EventKind::ProtectState,
        extract,
    )
}

fn wifi(key: &str, icon: &str, extract: Extract) -> SensorDescription {
    SensorDescription::generic(
        EntityDescription::new(key)
            .icon(icon)
            .category(EntityCategory::Diagnostic),
        EventKind::WifiInfo,
        extract,
    )
}

/// `value / divisor` rounded half to even.
fn round_div(value: u32, divisor: u32) -> i64 {
    let quotient = i64::from(value / divisor);
    let twice_remainder = 2 * u64::from(value % divisor);
    let divisor = u64::from(divisor);
    if twice_remainder > divisor || (twice_remainder == divisor && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

fn apply_life_span(entity: &mut Entity, percent: u8, remaining_secs: i64) {
    entity.update_state(AttributeValue::from(percent).into(), now());
    entity.set_attribute("remaining", remaining_secs.div_euclid(60));
}

/// A read-only sensor.
pub struct SensorEntity<B> {
    base: BotEntity<B>,
    kind: SensorKind,
}

impl<B: Bot> SensorEntity<B> {
    pub(crate) fn new(
        bot: Arc<B>,
        host: SharedHost,
        description: SensorDescription,
    ) -> Result<Self, VacHubError> {
        let initial = snapshot_builder(bot.as_ref(), Platform::Sensor, description.entity)
            .state(EntityState::Unknown)
            .build()?;
        Ok(Self {
            base: BotEntity::new(bot, host, initial, description.always_available),
            kind: description.kind,
        })
    }

    pub fn base(&self) -> &BotEntity<B> {
        &self.base
    }

    pub fn kind(&self) -> &SensorKind {
        &self.kind
    }

    pub(crate) fn mount(&self) {
        match &self.kind {
            SensorKind::Generic { kind, extract } => {
                let extract = *extract;
                self.base.listen(*kind, move |event, entity| match extract(event) {
                    Some(value) => {
                        entity.update_state(value.into(), now());
                        true
                    }
                    None => false,
                });
            }
            SensorKind::LastError => self.base.listen(EventKind::Error, |event, entity| {
                let Event::Error(error) = event else {
                    return false;
                };
                entity.update_state(AttributeValue::from(error.code).into(), now());
                let description = error
                    .description
                    .clone()
                    .map_or(AttributeValue::Json(serde_json::Value::Null), AttributeValue::String);
                entity.set_attribute("description", description);
                true
            }),
            SensorKind::LifeSpan(LifeSpanComponent::Vacuum(part)) => {
                let part = *part;
                self.base.listen(EventKind::LifeSpan, move |event, entity| {
                    let Event::LifeSpan(life_span) = event else {
                        return false;
                    };
                    if life_span.component != part {
                        return false;
                    }
                    apply_life_span(entity, life_span.percent, life_span.remaining);
                    true
                });
            }
            SensorKind::LifeSpan(LifeSpanComponent::Mower(part)) => {
                let part = *part;
                self.base.listen(EventKind::GoatLifeSpan, move |event, entity| {
                    let Event::GoatLifeSpan(life_span) = event else {
                        return false;
                    };
                    if life_span.component != part {
                        return false;
                    }
                    apply_life_span(entity, life_span.percent, life_span.remaining);
                    true
                });
            }
            SensorKind::UwbCell { serial } => {
                let serial = serial.clone();
                self.base.listen(EventKind::GoatLifeSpan, move |event, entity| {
                    let Event::GoatLifeSpan(life_span) = event else {
                        return false;
                    };
                    if life_span.component != GoatLifeSpan::UwbCell
                        || life_span.serial.as_deref() != Some(serial.as_str())
                    {
                        return false;
                    }
                    tracing::debug!(cell = %serial, percent = life_span.percent, "uwb cell life span");
                    apply_life_span(entity, life_span.percent, life_span.remaining);
                    true
                });
            }
            SensorKind::LastCleaning => self.base.listen(EventKind::CleanLog, |event, entity| {
                let Event::CleanLog(clean_log) = event else {
                    return false;
                };
                let Some(log) = clean_log.logs.first() else {
                    return false;
                };
                entity.update_state(
                    AttributeValue::from(log.stop_reason.display_name()).into(),
                    now(),
                );
                entity.set_attribute("timestamp", log.timestamp);
                entity.set_attribute("image_url", log.image_url.as_str());
                entity.set_attribute("type", log.clean_type.as_str());
                entity.set_attribute("area", log.area);
                entity.set_attribute("duration", f64::from(log.duration) / 60.0);
                true
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use vachub_domain::event::{
        AvailabilityEvent, BatteryEvent, CleanJobStatus, CleanLogEntry, CleanLogEvent, ErrorEvent,
        GoatLifeSpanEvent, LifeSpanEvent, ProtectStateEvent, StatsEvent, TotalStatsEvent,
        WifiInfoEvent,
    };

    use crate::testing::{FakeBot, RecordingHost};

    fn mounted(
        bot: &Arc<FakeBot>,
        host: &Arc<RecordingHost>,
        desc: SensorDescription,
    ) -> SensorEntity<FakeBot> {
        let sensor = SensorEntity::new(Arc::clone(bot), host.shared(), desc).unwrap();
        sensor.base().mount_availability();
        sensor.mount();
        sensor
    }

    fn find(catalog: Vec<SensorDescription>, key: &str) -> SensorDescription {
        catalog
            .into_iter()
            .find(|desc| desc.entity.key == key)
            .unwrap()
    }

    fn value(sensor: &SensorEntity<FakeBot>) -> Option<AttributeValue> {
        sensor.base().snapshot().state.value().cloned()
    }

    #[test]
    fn should_have_unique_keys_per_family() {
        for family in [DeviceFamily::Vacuum, DeviceFamily::Mower] {
            let keys: Vec<String> = catalog(family).into_iter().map(|d| d.entity.key).collect();
            let unique: HashSet<&String> = keys.iter().collect();
            assert_eq!(keys.len(), unique.len());
        }
    }

    #[test]
    fn should_split_catalogs_by_family() {
        let vacuum: Vec<String> = catalog(DeviceFamily::Vacuum)
            .into_iter()
            .map(|d| d.entity.key)
            .collect();
        let mower: Vec<String> = catalog(DeviceFamily::Mower)
            .into_iter()
            .map(|d| d.entity.key)
            .collect();

        for shared in ["last_error", "battery_level"] {
            assert!(vacuum.iter().any(|k| k == shared));
            assert!(mower.iter().any(|k| k == shared));
        }
        assert!(vacuum.iter().any(|k| k == "life_span_side_brush"));
        assert!(!mower.iter().any(|k| k == "life_span_side_brush"));
        assert!(mower.iter().any(|k| k == "life_span_lensbrush"));
        assert!(!vacuum.iter().any(|k| k == "wifi_ip"));
    }

    #[test]
    fn should_update_battery_level_from_event() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let sensor = mounted(&bot, &host, find(shared_catalog(), "battery_level"));

        bot.publish(BatteryEvent { value: Some(80) });

        assert_eq!(value(&sensor), Some(AttributeValue::Int(80)));
        assert_eq!(host.writes_for(sensor.base().id()).len(), 1);
    }

    #[test]
    fn should_keep_previous_value_when_extracted_value_is_absent() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let sensor = mounted(&bot, &host, find(shared_catalog(), "battery_level"));

        bot.publish(BatteryEvent { value: Some(55) });
        bot.publish(BatteryEvent { value: None });

        assert_eq!(value(&sensor), Some(AttributeValue::Int(55)));
        assert_eq!(host.writes_for(sensor.base().id()).len(), 1);
    }

    #[test]
    fn should_update_only_matching_life_span_component() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let brush = mounted(&bot, &host, find(vacuum_catalog(), "life_span_brush"));
        let filter = mounted(&bot, &host, find(vacuum_catalog(), "life_span_filter"));

        bot.publish(LifeSpanEvent {
            component: LifeSpan::Brush,
            percent: 42,
            remaining: 3600,
        });

        assert_eq!(value(&brush), Some(AttributeValue::Int(42)));
        assert_eq!(
            brush.base().snapshot().get_attribute("remaining"),
            Some(&AttributeValue::Int(60))
        );
        assert_eq!(value(&filter), None);
        assert!(host.writes_for(filter.base().id()).is_empty());
    }

    #[test]
    fn should_floor_remaining_minutes() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let filter = mounted(&bot, &host, find(vacuum_catalog(), "life_span_filter"));

        bot.publish(LifeSpanEvent {
            component: LifeSpan::Filter,
            percent: 7,
            remaining: 119,
        });

        assert_eq!(
            filter.base().snapshot().get_attribute("remaining"),
            Some(&AttributeValue::Int(1))
        );
    }

    #[test]
    fn should_match_mower_life_span_on_goat_events_only() {
        let bot = FakeBot::mower("G0001");
        let host = RecordingHost::new();
        let blade = mounted(&bot, &host, find(mower_catalog(), "life_span_blade"));

        bot.publish(GoatLifeSpanEvent {
            component: GoatLifeSpan::LensBrush,
            percent: 10,
            remaining: 60,
            serial: None,
        });
        assert_eq!(value(&blade), None);

        bot.publish(GoatLifeSpanEvent {
            component: GoatLifeSpan::Blade,
            percent: 90,
            remaining: 600,
            serial: None,
        });
        assert_eq!(value(&blade), Some(AttributeValue::Int(90)));
    }

    #[test]
    fn should_filter_uwb_cell_by_serial() {
        let bot = FakeBot::mower("G0001");
        let host = RecordingHost::new();
        let cell = mounted(&bot, &host, uwb_cell("AB12"));

        bot.publish(GoatLifeSpanEvent {
            component: GoatLifeSpan::UwbCell,
            percent: 30,
            remaining: 120,
            serial: Some("CD34".to_string()),
        });
        assert_eq!(value(&cell), None);

        bot.publish(GoatLifeSpanEvent {
            component: GoatLifeSpan::UwbCell,
            percent: 75,
            remaining: 120,
            serial: Some("AB12".to_string()),
        });
        assert_eq!(value(&cell), Some(AttributeValue::Int(75)));
    }

    #[test]
    fn should_describe_uwb_cell_with_lowercase_serial() {
        let desc = uwb_cell("AB12");
        assert_eq!(desc.entity.key, "life_span_ab12");
        assert_eq!(desc.entity.name.as_deref(), Some("UWB Cell ab12"));
        assert_eq!(desc.entity.translation_key, None);
        assert!(!desc.entity.enabled_by_default);
    }

    #[test]
    fn should_store_error_code_and_description() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let sensor = mounted(&bot, &host, find(shared_catalog(), "last_error"));

        bot.publish(ErrorEvent {
            code: 102,
            description: Some("HostHang".to_string()),
        });

        let snapshot = sensor.base().snapshot();
        assert_eq!(snapshot.state, EntityState::Value(AttributeValue::Int(102)));
        assert_eq!(
            snapshot.get_attribute("description"),
            Some(&AttributeValue::String("HostHang".to_string()))
        );
    }

    #[test]
    fn should_ignore_availability_when_always_available() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let error = mounted(&bot, &host, find(shared_catalog(), "last_error"));
        let battery = mounted(&bot, &host, find(shared_catalog(), "battery_level"));

        bot.publish(AvailabilityEvent { available: false });

        assert!(error.base().snapshot().available);
        assert!(!battery.base().snapshot().available);
    }

    #[test]
    fn should_round_stats_time_half_to_even() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let time = mounted(&bot, &host, find(vacuum_catalog(), "stats_time"));

        bot.publish(StatsEvent {
            area: Some(12),
            time: Some(150),
            clean_type: Some("auto".to_string()),
        });
        assert_eq!(value(&time), Some(AttributeValue::Int(2)));

        bot.publish(StatsEvent {
            time: Some(0),
            ..StatsEvent::default()
        });
        assert_eq!(value(&time), Some(AttributeValue::Int(2)));
    }

    #[test]
    fn should_round_total_time_in_hours() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let total = mounted(&bot, &host, find(vacuum_catalog(), "stats_total_time"));

        bot.publish(TotalStatsEvent {
            area: 500,
            time: 5400,
            cleanings: 12,
        });
        assert_eq!(value(&total), Some(AttributeValue::Int(2)));
    }

    #[test]
    fn should_compute_round_div_half_to_even() {
        assert_eq!(round_div(90, 60), 2);
        assert_eq!(round_div(150, 60), 2);
        assert_eq!(round_div(89, 60), 1);
        assert_eq!(round_div(29, 60), 0);
        assert_eq!(round_div(7200, 3600), 2);
    }

    #[test]
    fn should_publish_last_cleaning_job() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let sensor = mounted(&bot, &host, find(vacuum_catalog(), "last_cleaning"));

        bot.publish(CleanLogEvent { logs: Vec::new() });
        assert_eq!(value(&sensor), None);

        bot.publish(CleanLogEvent {
            logs: vec![CleanLogEntry {
                timestamp: 1_700_000_000,
                image_url: "https://example.invalid/map.png".to_string(),
                clean_type: "auto".to_string(),
                area: 30,
                duration: 1800,
                stop_reason: CleanJobStatus::Finished,
            }],
        });

        let snapshot = sensor.base().snapshot();
        assert_eq!(
            snapshot.state,
            EntityState::Value(AttributeValue::String("finished".to_string()))
        );
        assert_eq!(
            snapshot.get_attribute("duration"),
            Some(&AttributeValue::Float(30.0))
        );
        assert_eq!(snapshot.get_attribute("area"), Some(&AttributeValue::Int(30)));
    }

    #[test]
    fn should_extract_protect_state_and_wifi_fields() {
        let bot = FakeBot::mower("G0001");
        let host = RecordingHost::new();
        let locked = mounted(&bot, &host, find(mower_catalog(), "is_locked"));
        let rssi = mounted(&bot, &host, find(mower_catalog(), "wifi_rssi"));

        bot.publish(ProtectStateEvent {
            is_locked: Some(true),
            ..ProtectStateEvent::default()
        });
        bot.publish(WifiInfoEvent {
            rssi: Some(-61),
            ..WifiInfoEvent::default()
        });

        assert_eq!(value(&locked), Some(AttributeValue::Bool(true)));
        assert_eq!(value(&rssi), Some(AttributeValue::Int(-61)));
    }

    #[test]
    fn should_stop_updating_after_unmount() {
        let bot = FakeBot::vacuum("E0001");
        let host = RecordingHost::new();
        let sensor = mounted(&bot, &host, find(shared_catalog(), "battery_level"));

        sensor.base().unmount();
        bot.publish(BatteryEvent { value: Some(10) });

        assert_eq!(value(&sensor), None);
        assert!(bot.bus().is_empty());
    }
}
