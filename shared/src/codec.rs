//! Compact, versioned encoding of the persistent part of the wheel state.
//!
//! Layout: JSON of [`SavedState`], raw-DEFLATE compressed, then base64 with
//! the URL-safe alphabet and no padding so it can sit in a query string as-is.
//! Only labels and the selected index travel; ids and spin flags are runtime
//! state and are regenerated on decode.

use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{MAX_DECODED_BYTES, SCHEMA_VERSION};
use crate::error::{DecodeError, EncodeError, ShareError};
use crate::ids::{SegmentId, WheelId};
use crate::wheel_state::{Segment, Wheel, WheelManagerState};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    #[serde(rename = "1")]
    V1,
}

impl SchemaVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => SCHEMA_VERSION,
        }
    }
}

/// Saved form of the wheel state. Unknown keys are rejected at every level.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SavedState {
    /// Schema version
    pub v: SchemaVersion,
    /// Selected wheel index
    pub i: i32,
    /// Wheels, in display order
    pub w: Vec<SavedWheel>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SavedWheel {
    /// Label
    pub l: String,
    /// Trimmed, non-empty segment labels
    pub s: Vec<String>,
}

impl SavedState {
    pub fn from_state(state: &WheelManagerState) -> Self {
        Self {
            v: SchemaVersion::V1,
            i: i32::try_from(state.selected_index()).unwrap_or(0),
            w: state
                .wheels()
                .iter()
                .map(|wheel| SavedWheel {
                    l: wheel.label.clone(),
                    s: wheel
                        .segments
                        .iter()
                        .filter(|segment| segment.has_visible_label())
                        .map(|segment| segment.label.trim().to_string())
                        .collect(),
                })
                .collect(),
        }
    }

    /// Hydrates into a full state with fresh identifiers and cleared flags.
    pub fn into_state(self) -> Result<WheelManagerState, DecodeError> {
        if self.w.is_empty() {
            return Err(DecodeError::NoWheels);
        }

        let count = self.w.len();
        let selected = match usize::try_from(self.i) {
            Ok(index) if index < count => index,
            _ => {
                warn!("saved wheel index {} out of range for {} wheels", self.i, count);
                0
            }
        };

        let wheels = self
            .w
            .into_iter()
            .map(|saved| {
                let mut wheel = Wheel::new(WheelId::new(), saved.l);
                wheel.segments = saved
                    .s
                    .into_iter()
                    .map(|label| Segment::new(SegmentId::new(), label))
                    .collect();
                wheel
            })
            .collect();

        WheelManagerState::from_wheels(wheels, selected).ok_or(DecodeError::NoWheels)
    }
}

pub fn encode(state: &WheelManagerState) -> Result<String, EncodeError> {
    let json = serde_json::to_vec(&SavedState::from_state(state))?;
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(json.len() / 2), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

pub fn try_decode(data: &str) -> Result<WheelManagerState, DecodeError> {
    let compressed = URL_SAFE_NO_PAD.decode(data.trim())?;
    let json = inflate(&compressed)?;
    let value: Value = serde_json::from_slice(&json)?;

    // Report a newer schema as such rather than as a shape mismatch.
    if let Some(version) = value.get("v").and_then(Value::as_str) {
        if version != SchemaVersion::V1.as_str() {
            return Err(DecodeError::UnsupportedVersion(version.to_string()));
        }
    }

    let saved: SavedState = serde_json::from_value(value)?;
    saved.into_state()
}

/// Decodes `data`, or logs why it is unusable and returns `None`.
pub fn decode(data: &str) -> Option<WheelManagerState> {
    match try_decode(data) {
        Ok(state) => Some(state),
        Err(e) => {
            error!("Error deserializing wheel data: {}", e);
            None
        }
    }
}

/// Share links are refused once the encoding grows past `max_len`.
pub fn check_share_length(encoded: &str, max_len: usize) -> Result<(), ShareError> {
    if encoded.len() > max_len {
        return Err(ShareError::TooLong {
            len: encoded.len(),
            max: max_len,
        });
    }
    Ok(())
}

fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    DeflateDecoder::new(compressed)
        .take(MAX_DECODED_BYTES + 1)
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompress)?;
    if out.len() as u64 > MAX_DECODED_BYTES {
        return Err(DecodeError::TooLarge(MAX_DECODED_BYTES));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel_reducer::WheelAction;

    fn encode_raw(json: &str) -> String {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        URL_SAFE_NO_PAD.encode(encoder.finish().unwrap())
    }

    #[test]
    fn test_round_trip_keeps_labels_and_index() {
        let state = WheelManagerState::default();
        let first = state.selected_wheel_id();
        let state = state
            .apply_all([
                WheelAction::create_wheel(Some("Lunch".to_string())),
                WheelAction::SelectWheel { wheel_id: first },
            ])
            .unwrap();
        let lunch = state.wheels()[1].id;
        let state = state
            .apply(WheelAction::replace_segments(lunch, ["Pizza", "Tacos"]))
            .unwrap();

        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded.wheels().len(), 2);
        assert_eq!(decoded.selected_index(), 0);
        assert_eq!(decoded.wheels()[1].label, "Lunch");
        let labels: Vec<_> = decoded.wheels()[1].segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Pizza", "Tacos"]);
        assert_ne!(decoded.wheels()[0].id, first);
    }

    #[test]
    fn test_empty_labels_are_dropped_and_trimmed() {
        let state = WheelManagerState::default();
        let wheel_id = state.selected_wheel_id();
        let state = state
            .apply(WheelAction::replace_segments(wheel_id, ["Alice", "  ", "", " Bob "]))
            .unwrap();
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        let labels: Vec<_> = decoded.selected_wheel().segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_transient_flags_are_not_restored() {
        let state = WheelManagerState::default();
        let wheel_id = state.selected_wheel_id();
        let winner = state.selected_wheel().segments[0].id;
        let state = state.apply(WheelAction::StartSpin { wheel_id, winner }).unwrap();
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        let wheel = decoded.selected_wheel();
        assert!(!wheel.is_spinning);
        assert!(wheel.segments.iter().all(Segment::is_eligible));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(try_decode("***"), Err(DecodeError::Base64(_))));
        assert!(try_decode("").is_err());
        assert!(decode(&URL_SAFE_NO_PAD.encode(b"not deflate at all")).is_none());
    }

    #[test]
    fn test_rejects_schema_violations_and_empty_wheels() {
        let shapes = [
            r#"{"v":"1","i":0,"w":[{"l":"x","s":[1]}]}"#,
            r#"{"v":"1","w":[{"l":"x","s":[]}]}"#,
            r#"{"v":"1","i":0,"w":[{"l":"x","s":[]}],"extra":true}"#,
            r#"{"v":"1","i":0,"w":[{"l":"x","s":[],"id":"abc"}]}"#,
            r#"{"v":"1","i":1.5,"w":[{"l":"x","s":[]}]}"#,
            r#"{"v":"1","i":4294967296,"w":[{"l":"x","s":[]}]}"#,
            r#"{"i":0,"w":[{"l":"x","s":[]}]}"#,
            r#"[]"#,
        ];
        for shape in shapes {
            assert!(
                matches!(try_decode(&encode_raw(shape)), Err(DecodeError::Json(_))),
                "{}",
                shape
            );
        }

        let negative = encode_raw(r#"{"v":"1","i":-1,"w":[{"l":"x","s":[]}]}"#);
        assert_eq!(try_decode(&negative).unwrap().selected_index(), 0);

        let no_wheels = encode_raw(r#"{"v":"1","i":0,"w":[]}"#);
        assert!(matches!(try_decode(&no_wheels), Err(DecodeError::NoWheels)));

        let not_json = encode_raw("{{{{");
        assert!(matches!(try_decode(&not_json), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let future = encode_raw(r#"{"v":"2","wheels":[]}"#);
        match try_decode(&future) {
            Err(DecodeError::UnsupportedVersion(v)) => assert_eq!(v, "2"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }

        let numeric = encode_raw(r#"{"v":1,"i":0,"w":[{"l":"x","s":[]}]}"#);
        assert!(matches!(try_decode(&numeric), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_saved_state_shape() {
        let saved = SavedState::from_state(&WheelManagerState::default());
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["v"], "1");
        assert_eq!(json["i"], 0);
        assert_eq!(json["w"][0]["s"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_out_of_range_index_selects_first() {
        let data = encode_raw(r#"{"v":"1","i":9,"w":[{"l":"a","s":[]},{"l":"b","s":[]}]}"#);
        let state = try_decode(&data).unwrap();
        assert_eq!(state.selected_index(), 0);

        let data = encode_raw(r#"{"v":"1","i":1,"w":[{"l":"a","s":[]},{"l":"b","s":[]}]}"#);
        assert_eq!(try_decode(&data).unwrap().selected_index(), 1);
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let huge = format!(
            r#"{{"v":"1","i":0,"w":[{{"l":"{}","s":[]}}]}}"#,
            "a".repeat(MAX_DECODED_BYTES as usize)
        );
        assert!(matches!(try_decode(&encode_raw(&huge)), Err(DecodeError::TooLarge(_))));
    }

    #[test]
    fn test_share_length_limit() {
        assert!(check_share_length(&"x".repeat(1024), 1024).is_ok());
        assert_eq!(
            check_share_length(&"x".repeat(1025), 1024),
            Err(ShareError::TooLong { len: 1025, max: 1024 })
        );
    }

    #[test]
    fn test_output_is_query_safe() {
        let state = WheelManagerState::default();
        let encoded = encode(&state).unwrap();
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
