use std::collections::HashSet;

use validator::ValidationError;

use crate::legacy::LegacyWheel;

pub fn validate_record_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::new("empty_id"));
    }
    Ok(())
}

/// Wheel ids must be present and distinct, and so must the segment ids
/// within each wheel.
pub fn validate_wheel_ids(wheels: &[LegacyWheel]) -> Result<(), ValidationError> {
    let mut wheel_ids = HashSet::new();
    for wheel in wheels {
        validate_record_id(&wheel.id)?;
        if !wheel_ids.insert(wheel.id.as_str()) {
            return Err(ValidationError::new("duplicate_wheel_id"));
        }

        let mut segment_ids = HashSet::new();
        for segment in &wheel.segments {
            validate_record_id(&segment.id)?;
            if !segment_ids.insert(segment.id.as_str()) {
                return Err(ValidationError::new("duplicate_segment_id"));
            }
        }
    }
    Ok(())
}
