//! On/off configuration switches backed by bot enable settings.
//!
//! A switch never changes its own state on write: it submits the command and
//! waits for the bot to confirm through the matching enable event.

use std::sync::Arc;

use vachub_app::ports::Bot;
use vachub_domain::command::Command;
use vachub_domain::device::DeviceFamily;
use vachub_domain::entity::{EntityCategory, EntityDescription, EntityState, Platform};
use vachub_domain::error::VacHubError;
use vachub_domain::event::{EnableSetting, Event, EventKind};
use vachub_domain::time::now;

use crate::entity::{BotEntity, SharedHost, snapshot_builder};

#[derive(Debug, Clone)]
pub struct SwitchDescription {
    pub entity: EntityDescription,
    pub setting: EnableSetting,
}

fn vacuum_switch(key: &str, icon: &str, setting: EnableSetting) -> SwitchDescription {
    SwitchDescription {
        entity: EntityDescription::new(key)
            .icon(icon)
            .category(EntityCategory::Config)
            .enabled_by_default(false),
        setting,
    }
}

fn mower_switch(key: &str, name: &str, icon: &str, setting: EnableSetting) -> SwitchDescription {
    SwitchDescription {
        entity: EntityDescription::new(key)
            .name(name)
            .icon(icon)
            .category(EntityCategory::Config),
        setting,
    }
}

pub fn vacuum_catalog() -> Vec<SwitchDescription> {
    vec![
        vacuum_switch("advanced_mode", "mdi:tune", EnableSetting::AdvancedMode),
        vacuum_switch(
            "continuous_cleaning",
            "mdi:refresh-auto",
            EnableSetting::ContinuousCleaning,
        ),
        vacuum_switch(
            "carpet_auto_fan_speed_boost",
            "mdi:fan-auto",
            EnableSetting::CarpetAutoFanBoost,
        ),
        vacuum_switch("clean_preference", "mdi:broom", EnableSetting::CleanPreference),
        vacuum_switch("true_detect", "mdi:laser-pointer", EnableSetting::TrueDetect),
    ]
}

pub fn mower_catalog() -> Vec<SwitchDescription> {
    vec![
        mower_switch(
            "anim_protect",
            "Animal Protection",
            "mdi:paw-off-outline",
            EnableSetting::AnimProtect,
        ),
        mower_switch(
            "rain_protect",
            "Rain Protect",
            "mdi:weather-pouring",
            EnableSetting::RainDelay,
        ),
        mower_switch(
            "safe_protect",
            "Charging Station Theft Protection",
            "mdi:robber",
            EnableSetting::SafeProtect,
        ),
        mower_switch(
            "border_switch",
            "Border Cut Switch",
            "mdi:border-all-variant",
            EnableSetting::BorderSwitch,
        ),
        mower_switch(
            "recognization",
            "AI Recognization",
            "mdi:teddy-bear",
            EnableSetting::Recognization,
        ),
        mower_switch(
            "child_lock",
            "Child Lock",
            "mdi:human-male-boy",
            EnableSetting::ChildLock,
        ),
        mower_switch(
            "moveup_warning",
            "Moveup Warning",
            "mdi:arrow-up-bold-box-outline",
            EnableSetting::MoveupWarning,
        ),
        mower_switch(
            "border_warning",
            "Border Left Warning",
            "mdi:selection-marker",
            EnableSetting::CrossMapBorderWarning,
        ),
    ]
}

/// Switches of a bot of `family`. No switch is shared between families.
pub fn catalog(family: DeviceFamily) -> Vec<SwitchDescription> {
    match family {
        DeviceFamily::Vacuum => vacuum_catalog(),
        DeviceFamily::Mower => mower_catalog(),
    }
}

pub struct SwitchEntity<B> {
    base: BotEntity<B>,
    setting: EnableSetting,
}

impl<B: Bot> SwitchEntity<B> {
    pub(crate) fn new(
        bot: Arc<B>,
        host: SharedHost,
        description: SwitchDescription,
    ) -> Result<Self, VacHubError> {
        let initial = snapshot_builder(bot.as_ref(), Platform::Switch, description.entity)
            .state(EntityState::Off)
            .build()?;
        Ok(Self {
            base: BotEntity::new(bot, host, initial, false),
            setting: description.setting,
        })
    }

    pub fn base(&self) -> &BotEntity<B> {
        &self.base
    }

    pub fn setting(&self) -> EnableSetting {
        self.setting
    }

    pub(crate) fn mount(&self) {
        self.base
            .listen(EventKind::Enable(self.setting), |event, entity| {
                let Event::Enable(enable) = event else {
                    return false;
                };
                entity.update_state(enable.enable.into(), now());
                true
            });
    }

    /// Ask the bot to enable the setting.
    ///
    /// # Errors
    ///
    /// Returns the bot's error when the command cannot be submitted.
    pub async fn turn_on(&self) -> Result<(), VacHubError> {
        self.send(true).await
    }

    /// Ask the bot to disable the setting.
    ///
    /// # Errors
    ///
    /// Returns the bot's error when the command cannot be submitted.
    pub async fn turn_off(&self) -> Result<(), VacHubError> {
        self.send(false).await
    }

    async fn send(&self, enable: bool) -> Result<(), VacHubError> {
        let command = Command::SetEnable {
            setting: self.setting,
            enable,
        };
        tracing::debug!(entity = self.base.unique_id(), %command, "submitting command");
        self.base.bot().execute_command(command).await
    }
}
