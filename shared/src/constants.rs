pub const SCHEMA_VERSION: &str = "1";

pub const STORAGE_KEY: &str = "wheel_state";
pub const LEGACY_STORAGE_KEY: &str = "wheels";
pub const SHARE_QUERY_PARAM: &str = "wheels";

pub const SAVE_DEBOUNCE_MS: u64 = 1000;
pub const SHARE_LINK_MAX_LEN: usize = 1024;
pub const MAX_DECODED_BYTES: u64 = 1024 * 1024;

pub const DEFAULT_WHEEL_LABEL: &str = "Wheel of choosing";
pub const DEFAULT_SEGMENT_COUNT: usize = 5;

pub const MIN_EXTRA_TURNS: u32 = 5;
pub const MAX_EXTRA_TURNS: u32 = 8;

pub const LAST_WHEEL_ERROR: &str = "The last wheel cannot be deleted";
pub const SHARE_TOO_LONG_ERROR: &str = "There are too many names to create a link, sorry!";

pub fn numbered_wheel_label(number: usize) -> String {
    format!("Wheel {}", number)
}

pub fn placeholder_segment_label(number: usize) -> String {
    format!("Name {}", number)
}
