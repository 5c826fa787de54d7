//! Bounded numeric controls.
//!
//! The current bounds are published as the `min`, `max` and `step`
//! attributes. Only the volume event can move a bound (its maximum).

use std::sync::Arc;

use vachub_app::ports::Bot;
use vachub_domain::command::Command;
use vachub_domain::device::DeviceFamily;
use vachub_domain::entity::{
    AttributeValue, Entity, EntityCategory, EntityDescription, EntityState, Platform,
};
use vachub_domain::error::{VacHubError, ValidationError};
use vachub_domain::event::{Event, EventKind};
use vachub_domain::time::now;

use crate::entity::{BotEntity, SharedHost, snapshot_builder};

const VOLUME_ICONS: [&str; 3] = ["mdi:volume-low", "mdi:volume-medium", "mdi:volume-high"];

/// Inclusive bounds and step of a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumberRange {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Volume,
    CleanCount,
    CutDirection,
    ObstacleHeight,
}

impl NumberKind {
    /// Bounds the entity starts with.
    pub fn default_range(self) -> NumberRange {
        let (min, max, step) = match self {
            Self::Volume => (0.0, 10.0, 1.0),
            Self::CleanCount => (1.0, 4.0, 1.0),
            Self::CutDirection => (0.0, 180.0, 5.0),
            Self::ObstacleHeight => (1.0, 3.0, 1.0),
        };
        NumberRange { min, max, step }
    }

    pub fn event_kind(self) -> EventKind {
        match self {
            Self::Volume => EventKind::Volume,
            Self::CleanCount => EventKind::CleanCount,
            Self::CutDirection => EventKind::CutDirection,
            Self::ObstacleHeight => EventKind::ObstacleHeight,
        }
    }

    /// Command carrying `value`, truncated to an integral step.
    ///
    /// `value` must already lie within the entity's range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn command(self, value: f64) -> Command {
        let value = value.trunc();
        match self {
            Self::Volume => Command::SetVolume {
                volume: value as u8,
            },
            Self::CleanCount => Command::SetCleanCount {
                count: value as u8,
            },
            Self::CutDirection => Command::SetCutDirection {
                angle: value as u16,
            },
            Self::ObstacleHeight => Command::SetObstacleHeight {
                level: value as u8,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberDescription {
    pub entity: EntityDescription,
    pub kind: NumberKind,
}

pub fn shared_catalog() -> Vec<NumberDescription> {
    vec![NumberDescription {
        entity: EntityDescription::new("volume")
            .category(EntityCategory::Config)
            .enabled_by_default(false),
        kind: NumberKind::Volume,
    }]
}

pub fn vacuum_catalog() -> Vec<NumberDescription> {
    vec![NumberDescription {
        entity: EntityDescription::new("clean_count")
            .icon("mdi:counter")
            .category(EntityCategory::Config)
            .enabled_by_default(false),
        kind: NumberKind::CleanCount,
    }]
}

pub fn mower_catalog() -> Vec<NumberDescription> {
    vec![
        NumberDescription {
            entity: EntityDescription::new("cut_direction")
                .icon("mdi:directions-fork")
                .category(EntityCategory::Config),
            kind: NumberKind::CutDirection,
        },
        NumberDescription {
            entity: EntityDescription::new("obstacle_height")
                .icon("mdi:image-size-select-large")
                .category(EntityCategory::Config),
            kind: NumberKind::ObstacleHeight,
        },
    ]
}

pub fn catalog(family: DeviceFamily) -> Vec<NumberDescription> {
    let mut numbers = shared_catalog();
    match family {
        DeviceFamily::Vacuum => numbers.extend(vacuum_catalog()),
        DeviceFamily::Mower => numbers.extend(mower_catalog()),
    }
    numbers
}

/// Icon for a volume of `value` within `min..=max`.
///
/// `min` is muted; `min + 1..=max` is split into three consecutive parts of
/// nearly equal length, the first ones one longer when it does not divide.
pub fn volume_icon(value: Option<i64>, min: i64, max: i64) -> &'static str {
    let Some(value) = value else {
        return "mdi:volume-medium";
    };
    if value == min {
        return "mdi:volume-off";
    }

    let len = (max - min).max(0);
    let (base, extra) = (len / 3, len % 3);
    let mut start = min + 1;
    for (index, icon) in (0_i64..).zip(VOLUME_ICONS) {
        let size = base + i64::from(index < extra);
        if (start..start + size).contains(&value) {
            return icon;
        }
        start += size;
    }
    "mdi:volume-medium"
}

#[allow(clippy::cast_possible_truncation)]
fn refresh_volume_icon(entity: &mut Entity, range: NumberRange) {
    let value = entity.state.value().and_then(AttributeValue::as_f64);
    entity.icon = Some(
        volume_icon(
            value.map(|v| v as i64),
            range.min as i64,
            range.max as i64,
        )
        .to_string(),
    );
}

fn current_range(entity: &Entity, kind: NumberKind) -> NumberRange {
    let mut range = kind.default_range();
    if let Some(max) = entity.get_attribute("max").and_then(AttributeValue::as_f64) {
        range.max = max;
    }
    range
}

pub struct NumberEntity<B> {
    base: BotEntity<B>,
    kind: NumberKind,
}

impl<B: Bot> NumberEntity<B> {
    pub(crate) fn new(
        bot: Arc<B>,
        host: SharedHost,
        description: NumberDescription,
    ) -> Result<Self, VacHubError> {
        let range = description.kind.default_range();
        let mut initial = snapshot_builder(bot.as_ref(), Platform::Number, description.entity)
            .state(EntityState::Unknown)
            .attribute("min", range.min)
            .attribute("max", range.max)
            .attribute("step", range.step)
            .build()?;
        if description.kind == NumberKind::Volume {
            refresh_volume_icon(&mut initial, range);
        }
        Ok(Self {
            base: BotEntity::new(bot, host, initial, false),
            kind: description.kind,
        })
    }

    pub fn base(&self) -> &BotEntity<B> {
        &self.base
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Bounds currently advertised to the host.
    pub fn range(&self) -> NumberRange {
        current_range(&self.base.snapshot(), self.kind)
    }

    pub(crate) fn mount(&self) {
        let kind = self.kind;
        self.base.listen(kind.event_kind(), move |event, entity| {
            let value: AttributeValue = match event {
                Event::Volume(volume) => {
                    if let Some(maximum) = volume.maximum {
                        entity.set_attribute("max", f64::from(maximum));
                    }
                    volume.volume.into()
                }
                Event::CleanCount(count) => count.count.into(),
                Event::CutDirection(direction) => direction.angle.into(),
                Event::ObstacleHeight(height) => height.level.into(),
                _ => return false,
            };
            entity.update_state(EntityState::Value(value), now());
            if kind == NumberKind::Volume {
                refresh_volume_icon(entity, current_range(entity, kind));
            }
            true
        });
    }

    /// Submit `value` to the bot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `value` is outside the
    /// current bounds, or the bot's error when the command cannot be
    /// submitted.
    pub async fn set_value(&self, value: f64) -> Result<(), VacHubError> {
        let range = self.range();
        if !range.contains(value) {
            return Err(ValidationError::OutOfRange {
                value,
                min: range.min,
                max: range.max,
            }
            .into());
        }
        let command = self.kind.command(value);
        tracing::debug!(entity = self.base.unique_id(), %command, "submitting command");
        self.base.bot().execute_command(command).await
    }
}
