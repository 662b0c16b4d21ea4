use thiserror::Error;

use crate::ids::{SegmentId, WheelId};

/// Failures raised by the reducer and the spin selector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WheelError {
    #[error("wheel {0} not found")]
    WheelNotFound(WheelId),
    #[error("segment {segment} not found on wheel {wheel}")]
    SegmentNotFound { wheel: WheelId, segment: SegmentId },
    #[error("{}", crate::constants::LAST_WHEEL_ERROR)]
    LastWheel,
    #[error("no eligible segments to pick from")]
    NoEligibleSegments,
    #[error("invalid turn range {min}..={max}")]
    InvalidTurnRange { min: u32, max: u32 },
    #[error("invalid skip pattern: {0}")]
    InvalidSkipPattern(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload could not be decompressed: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("decompressed payload exceeds {0} bytes")]
    TooLarge(u64),
    #[error("payload does not match the saved state schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema version {0:?}")]
    UnsupportedVersion(String),
    #[error("no wheels found in saved state")]
    NoWheels,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize saved state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to compress saved state: {0}")]
    Compress(#[from] std::io::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("encoded state is {len} characters, share links allow {max}")]
    TooLong { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("legacy record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("legacy record failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("legacy record has no wheels")]
    NoWheels,
}
