//! Plausible initial state of a simulated bot, per product family.

use vachub_domain::device::DeviceFamily;
use vachub_domain::event::{
    AvailabilityEvent, BatteryEvent, CleanCountEvent, CleanJobStatus, CleanLogEntry,
    CleanLogEvent, CutDirectionEvent, EnableEvent, EnableSetting, ErrorEvent, Event, GoatLifeSpan,
    GoatLifeSpanEvent, LifeSpan, LifeSpanEvent, NewUwbCellEvent, ObstacleHeightEvent,
    ProtectStateEvent, StatsEvent, TotalStatsEvent, VolumeEvent, WifiInfoEvent,
};

/// Serial of the UWB cell reported by a seeded mower.
pub const SEED_UWB_CELL: &str = "UWB0001";

const VACUUM_SETTINGS: [(EnableSetting, bool); 5] = [
    (EnableSetting::AdvancedMode, false),
    (EnableSetting::ContinuousCleaning, true),
    (EnableSetting::CarpetAutoFanBoost, true),
    (EnableSetting::CleanPreference, false),
    (EnableSetting::TrueDetect, true),
];

const MOWER_SETTINGS: [(EnableSetting, bool); 8] = [
    (EnableSetting::AnimProtect, true),
    (EnableSetting::RainDelay, true),
    (EnableSetting::SafeProtect, false),
    (EnableSetting::BorderSwitch, true),
    (EnableSetting::Recognization, true),
    (EnableSetting::ChildLock, false),
    (EnableSetting::MoveupWarning, true),
    (EnableSetting::CrossMapBorderWarning, false),
];

/// Events a freshly connected bot of `family` would publish, in order.
pub fn seed_events(family: DeviceFamily) -> Vec<Event> {
    let mut events: Vec<Event> = vec![
        AvailabilityEvent { available: true }.into(),
        BatteryEvent { value: Some(87) }.into(),
        ErrorEvent {
            code: 0,
            description: Some("NoError: Robot is operational".to_string()),
        }
        .into(),
        VolumeEvent {
            volume: 6,
            maximum: Some(10),
        }
        .into(),
    ];

    match family {
        DeviceFamily::Vacuum => {
            events.extend(
                [
                    (LifeSpan::Brush, 82, 230_400),
                    (LifeSpan::Filter, 64, 97_200),
                    (LifeSpan::SideBrush, 47, 86_400),
                ]
                .into_iter()
                .map(|(component, percent, remaining)| {
                    Event::from(LifeSpanEvent {
                        component,
                        percent,
                        remaining,
                    })
                }),
            );
            events.push(
                StatsEvent {
                    area: Some(24),
                    time: Some(1_530),
                    clean_type: Some("auto".to_string()),
                }
                .into(),
            );
            events.push(
                TotalStatsEvent {
                    area: 1_262,
                    time: 301_320,
                    cleanings: 61,
                }
                .into(),
            );
            events.push(
                CleanLogEvent {
                    logs: vec![CleanLogEntry {
                        timestamp: 1_760_000_000,
                        image_url: "https://portal.ecouser.net/api/lg/image/last".to_string(),
                        clean_type: "auto".to_string(),
                        area: 24,
                        duration: 1_530,
                        stop_reason: CleanJobStatus::Finished,
                    }],
                }
                .into(),
            );
            events.extend(enable_events(&VACUUM_SETTINGS));
            events.push(CleanCountEvent { count: 1 }.into());
        }
        DeviceFamily::Mower => {
            events.extend(
                [(GoatLifeSpan::Blade, 73, 108_000), (GoatLifeSpan::LensBrush, 91, 324_000)]
                    .into_iter()
                    .map(|(component, percent, remaining)| {
                        Event::from(GoatLifeSpanEvent {
                            component,
                            percent,
                            remaining,
                            serial: None,
                        })
                    }),
            );
            events.push(
                NewUwbCellEvent {
                    serial: SEED_UWB_CELL.to_string(),
                }
                .into(),
            );
            events.push(
                GoatLifeSpanEvent {
                    component: GoatLifeSpan::UwbCell,
                    percent: 58,
                    remaining: 2_592_000,
                    serial: Some(SEED_UWB_CELL.to_string()),
                }
                .into(),
            );
            events.push(
                ProtectStateEvent {
                    is_anim_protect: Some(true),
                    is_e_stop: Some(false),
                    is_locked: Some(false),
                    is_rain_delay: Some(false),
                    is_rain_protect: Some(true),
                }
                .into(),
            );
            events.push(
                WifiInfoEvent {
                    mac: Some("8C:0F:FA:12:34:56".to_string()),
                    ssid: Some("garden".to_string()),
                    rssi: Some(-58),
                    ip: Some("192.168.1.42".to_string()),
                }
                .into(),
            );
            events.extend(enable_events(&MOWER_SETTINGS));
            events.push(CutDirectionEvent { angle: 90 }.into());
            events.push(ObstacleHeightEvent { level: 2 }.into());
        }
    }
    events
}

fn enable_events(settings: &[(EnableSetting, bool)]) -> impl Iterator<Item = Event> + '_ {
    settings
        .iter()
        .map(|&(setting, enable)| Event::from(EnableEvent { setting, enable }))
}
