//! End-to-end tests for the full vachubd stack.
//!
//! Each test wires virtual bots, the in-memory host and the Deebot
//! integration exactly like the daemon does, then drives them through bot
//! events and host service calls.

use std::sync::Arc;

use serde_json::json;

use vachub_adapter_deebot::DeebotIntegration;
use vachub_adapter_virtual::{SEED_UWB_CELL, VirtualBot};
use vachub_app::hub::Hub;
use vachub_app::ports::{Bot, Integration};
use vachub_app::state_store::{HostEvent, InMemoryStateStore};
use vachub_domain::command::Command;
use vachub_domain::device::{DeviceFamily, DeviceInfo};
use vachub_domain::entity::{AttributeValue, Entity, EntityState};
use vachub_domain::error::{VacHubError, ValidationError};
use vachub_domain::event::{
    AvailabilityEvent, BatteryEvent, EnableSetting, GoatLifeSpan, GoatLifeSpanEvent, LifeSpan,
    LifeSpanEvent, NewUwbCellEvent, VolumeEvent,
};
use vachub_domain::id::EntityId;

const VACUUM: &str = "E0001";
const MOWER: &str = "G0001";

struct Stack {
    vacuum: Arc<VirtualBot>,
    mower: Arc<VirtualBot>,
    store: Arc<InMemoryStateStore>,
    integration: DeebotIntegration<VirtualBot>,
}

fn virtual_bot(serial: &str, family: DeviceFamily) -> Arc<VirtualBot> {
    let info = DeviceInfo::builder()
        .serial(serial)
        .family(family)
        .build()
        .expect("device info should be valid");
    Arc::new(VirtualBot::new(info))
}

/// Build and set up a fully-wired stack with one vacuum and one mower.
async fn stack() -> Stack {
    let vacuum = virtual_bot(VACUUM, DeviceFamily::Vacuum);
    let mower = virtual_bot(MOWER, DeviceFamily::Mower);
    let store = Arc::new(InMemoryStateStore::default());
    let hub = Hub::new(vec![Arc::clone(&vacuum), Arc::clone(&mower)]);
    let mut integration = DeebotIntegration::new(hub, Arc::clone(&store));
    integration
        .setup()
        .await
        .expect("setup should succeed");
    Stack {
        vacuum,
        mower,
        store,
        integration,
    }
}

impl Stack {
    fn entity(&self, unique_id: &str) -> Entity {
        self.store
            .get_by_unique_id(unique_id)
            .unwrap_or_else(|| panic!("{unique_id} should be registered"))
    }

    fn id_of(&self, unique_id: &str) -> EntityId {
        self.entity(unique_id).id
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_register_every_entity_in_the_host() {
    let stack = stack().await;

    assert_eq!(stack.store.len(), stack.integration.entity_count());
    assert!(stack.store.get_by_unique_id("E0001_life_span_brush").is_some());
    assert!(stack.store.get_by_unique_id("G0001_life_span_blade").is_some());
    assert!(stack.store.get_by_unique_id("E0001_life_span_blade").is_none());
    assert!(stack.store.get_by_unique_id("G0001_clean_count").is_none());
}

#[tokio::test]
async fn should_build_lowercase_entity_ids() {
    let stack = stack().await;

    let battery = stack.entity("E0001_battery_level");

    assert_eq!(battery.entity_id, "sensor.e0001_battery_level");
    assert_eq!(battery.state, EntityState::Unknown);
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_update_only_brush_sensor_for_brush_life_span() {
    let stack = stack().await;
    let mut changes = stack.store.subscribe();

    stack.vacuum.publish(LifeSpanEvent {
        component: LifeSpan::Brush,
        percent: 42,
        remaining: 3600,
    });

    let brush = stack.entity("E0001_life_span_brush");
    assert_eq!(brush.state, EntityState::Value(AttributeValue::Int(42)));
    assert_eq!(
        brush.get_attribute("remaining"),
        Some(&AttributeValue::Int(60))
    );
    assert_eq!(
        stack.entity("E0001_life_span_filter").state,
        EntityState::Unknown
    );

    match changes.try_recv() {
        Ok(HostEvent::Updated(entity)) => assert_eq!(entity.unique_id, "E0001_life_span_brush"),
        other => panic!("unexpected host event: {other:?}"),
    }
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn should_keep_last_value_when_battery_is_absent() {
    let stack = stack().await;

    stack.vacuum.publish(BatteryEvent { value: Some(64) });
    stack.vacuum.publish(BatteryEvent { value: None });

    assert_eq!(
        stack.entity("E0001_battery_level").state,
        EntityState::Value(AttributeValue::Int(64))
    );
}

#[tokio::test]
async fn should_mark_entities_unavailable_with_their_bot() {
    let stack = stack().await;

    stack.mower.publish(AvailabilityEvent { available: false });

    assert!(!stack.entity("G0001_battery_level").available);
    assert!(stack.entity("G0001_last_error").available);
    assert!(stack.entity("E0001_battery_level").available);
}

#[tokio::test]
async fn should_register_uwb_cell_once_and_track_its_life_span() {
    let stack = stack().await;
    let before = stack.store.len();

    for _ in 0..2 {
        stack.mower.publish(NewUwbCellEvent {
            serial: "CELL7".to_string(),
        });
    }
    stack.mower.publish(GoatLifeSpanEvent {
        component: GoatLifeSpan::UwbCell,
        percent: 33,
        remaining: 7200,
        serial: Some("CELL7".to_string()),
    });

    assert_eq!(stack.store.len(), before + 1);
    let cell = stack.entity("G0001_life_span_cell7");
    assert_eq!(cell.state, EntityState::Value(AttributeValue::Int(33)));
    assert_eq!(cell.name.as_deref(), Some("UWB Cell cell7"));
}

#[tokio::test]
async fn should_populate_host_from_seeded_state() {
    let stack = stack().await;

    stack.vacuum.seed_state();
    stack.mower.seed_state();

    assert_eq!(
        stack.entity("E0001_last_cleaning").state,
        EntityState::Value(AttributeValue::String("finished".to_string()))
    );
    assert_eq!(stack.entity("E0001_continuous_cleaning").state, EntityState::On);
    assert_eq!(
        stack.entity("E0001_volume").get_attribute("max"),
        Some(&AttributeValue::Float(10.0))
    );
    let cell = stack.entity(&format!(
        "{MOWER}_life_span_{}",
        SEED_UWB_CELL.to_lowercase()
    ));
    assert_eq!(cell.state, EntityState::Value(AttributeValue::Int(58)));
}

// ---------------------------------------------------------------------------
// Service calls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_switch_setting_through_confirmation_event() {
    let stack = stack().await;
    let id = stack.id_of("G0001_child_lock");

    stack
        .integration
        .handle_service_call(id, "turn_on", json!({}))
        .await
        .unwrap();

    assert_eq!(
        stack.mower.executed_commands(),
        vec![Command::SetEnable {
            setting: EnableSetting::ChildLock,
            enable: true,
        }]
    );
    assert_eq!(stack.entity("G0001_child_lock").state, EntityState::On);

    stack
        .integration
        .handle_service_call(id, "turn_off", json!({}))
        .await
        .unwrap();
    assert_eq!(stack.entity("G0001_child_lock").state, EntityState::Off);
}

#[tokio::test]
async fn should_set_volume_within_reported_maximum() {
    let stack = stack().await;
    let id = stack.id_of("E0001_volume");
    stack.vacuum.publish(VolumeEvent {
        volume: 2,
        maximum: Some(8),
    });

    stack
        .integration
        .handle_service_call(id, "set_value", json!({"value": 7}))
        .await
        .unwrap();
    let rejected = stack
        .integration
        .handle_service_call(id, "set_value", json!({"value": 9}))
        .await;

    let volume = stack.entity("E0001_volume");
    assert_eq!(volume.state, EntityState::Value(AttributeValue::Int(7)));
    assert_eq!(volume.get_attribute("max"), Some(&AttributeValue::Float(8.0)));
    assert!(matches!(
        rejected,
        Err(VacHubError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert_eq!(
        stack.vacuum.executed_commands(),
        vec![Command::SetVolume { volume: 7 }]
    );
}

#[tokio::test]
async fn should_propagate_command_failure_of_unavailable_bot() {
    let stack = stack().await;
    let id = stack.id_of("E0001_clean_count");
    stack.vacuum.set_available(false);

    let result = stack
        .integration
        .handle_service_call(id, "set_value", json!({"value": 2}))
        .await;

    assert!(matches!(result, Err(VacHubError::Client(_))));
    assert!(stack.vacuum.executed_commands().is_empty());
}

#[tokio::test]
async fn should_refresh_cached_life_spans() {
    let stack = stack().await;
    stack.vacuum.publish(LifeSpanEvent {
        component: LifeSpan::Filter,
        percent: 55,
        remaining: 120,
    });
    let id = stack.id_of("E0001_life_span_filter");
    let mut changes = stack.store.subscribe();

    stack
        .integration
        .handle_service_call(id, "refresh", json!({"category": "life_spans"}))
        .await
        .unwrap();

    assert!(matches!(changes.try_recv(), Ok(HostEvent::Updated(_))));
}

#[tokio::test]
async fn should_reject_unknown_entity_and_service() {
    let stack = stack().await;

    let unknown = stack
        .integration
        .handle_service_call(EntityId::new(), "turn_on", json!({}))
        .await;
    let unsupported = stack
        .integration
        .handle_service_call(stack.id_of("E0001_battery_level"), "set_value", json!({"value": 1}))
        .await;

    assert!(matches!(unknown, Err(VacHubError::NotFound(_))));
    assert!(matches!(unsupported, Err(VacHubError::UnsupportedService(_))));
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stop_all_callbacks_after_teardown() {
    let mut stack = stack().await;

    stack.integration.teardown().await.unwrap();
    stack.vacuum.publish(BatteryEvent { value: Some(10) });
    stack.mower.publish(NewUwbCellEvent {
        serial: "CELL9".to_string(),
    });

    assert!(stack.store.is_empty());
    assert!(stack.vacuum.bus().is_empty());
    assert!(stack.mower.bus().is_empty());
    assert_eq!(stack.integration.entity_count(), 0);
    assert_eq!(stack.vacuum.device_info().serial, VACUUM);
}
