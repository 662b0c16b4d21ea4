//! The record shape used before the compact codec existed.
//!
//! Older clients stored this uncompressed under the `wheels` storage key, and
//! the key-value API still accepts it. It points at the selected wheel by id
//! rather than by position.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::numbered_wheel_label;
use crate::error::MigrationError;
use crate::ids::{SegmentId, WheelId};
use crate::validation::validate_wheel_ids;
use crate::wheel_state::{Segment, Wheel, WheelManagerState};

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWheelManagerState {
    #[validate(length(min = 1), custom = "validate_wheel_ids")]
    pub wheels: Vec<LegacyWheel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_wheel_id: Option<String>,
    #[serde(default)]
    pub is_spinning: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWheel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub segments: Vec<LegacySegment>,
    #[serde(default)]
    pub is_spinning: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LegacySegment {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

impl LegacyWheelManagerState {
    pub fn parse(raw: &str) -> Result<Self, MigrationError> {
        let record: Self = serde_json::from_str(raw)?;
        record.validate()?;
        Ok(record)
    }

    /// Same checks as [`parse`](Self::parse), for a body that is already JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MigrationError> {
        let record: Self = serde_json::from_value(value)?;
        record.validate()?;
        Ok(record)
    }

    /// Index of the wheel named by `selectedWheelId`, if it exists.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_wheel_id.as_deref()?;
        self.wheels.iter().position(|wheel| wheel.id == selected)
    }

    /// Converts to the current model. Identifiers are regenerated and spin
    /// flags dropped; the selection is carried over by position.
    pub fn into_state(self) -> Result<WheelManagerState, MigrationError> {
        let selected = self.selected_index().unwrap_or(0);
        let wheels = self
            .wheels
            .into_iter()
            .enumerate()
            .map(|(i, legacy)| {
                let label = legacy
                    .label
                    .unwrap_or_else(|| numbered_wheel_label(i + 1));
                let mut wheel = Wheel::new(WheelId::new(), label);
                wheel.segments = legacy
                    .segments
                    .into_iter()
                    .map(|segment| Segment::new(SegmentId::new(), segment.label))
                    .collect();
                wheel
            })
            .collect();

        WheelManagerState::from_wheels(wheels, selected).ok_or(MigrationError::NoWheels)
    }
}

/// Reads a legacy record and converts it to the current model.
pub fn migrate_legacy(raw: &str) -> Result<WheelManagerState, MigrationError> {
    LegacyWheelManagerState::parse(raw)?.into_state()
}
