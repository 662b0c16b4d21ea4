//! Wheel state management and the compact state codec.
//!
//! Everything here is pure: no storage, no timers, no DOM. The frontend
//! crate wires these pieces to the browser and the backend reuses the legacy
//! record validation.

pub mod codec;
pub mod constants;
pub mod error;
pub mod ids;
pub mod legacy;
pub mod reconcile;
pub mod spin;
pub mod validation;
pub mod wheel_reducer;
pub mod wheel_state;

pub use codec::{check_share_length, decode, encode, try_decode, SavedState, SavedWheel, SchemaVersion};
pub use error::{DecodeError, EncodeError, MigrationError, ShareError, WheelError};
pub use ids::{SegmentId, WheelId};
pub use legacy::{migrate_legacy, LegacyWheelManagerState};
pub use reconcile::reconcile;
pub use spin::{pick_extra_turns, pick_index, SkipPattern, SpinSelector};
pub use wheel_reducer::WheelAction;
pub use wheel_state::{ScrollDirection, Segment, Wheel, WheelManagerState};
