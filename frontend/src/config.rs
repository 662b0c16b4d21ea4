use log::warn;
use wheel_shared::constants::{
    LEGACY_STORAGE_KEY, SAVE_DEBOUNCE_MS, SHARE_LINK_MAX_LEN, SHARE_QUERY_PARAM, STORAGE_KEY,
};
use wheel_shared::{SkipPattern, SpinSelector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    pub storage_key: String,
    pub legacy_storage_key: String,
    pub query_param: String,
    pub debounce_ms: u64,
    pub share_link_max_len: usize,
    /// Labels matching this pattern are passed over while others remain.
    /// Baked in at build time from `WHEEL_SKIP_NAME`.
    pub skip_name: Option<String>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            legacy_storage_key: LEGACY_STORAGE_KEY.to_string(),
            query_param: SHARE_QUERY_PARAM.to_string(),
            debounce_ms: SAVE_DEBOUNCE_MS,
            share_link_max_len: SHARE_LINK_MAX_LEN,
            skip_name: option_env!("WHEEL_SKIP_NAME").map(str::to_string),
        }
    }
}

impl FrontendConfig {
    pub fn spin_selector(&self) -> SpinSelector {
        let skip = self
            .skip_name
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .and_then(|pattern| match SkipPattern::new(pattern) {
                Ok(skip) => Some(skip),
                Err(e) => {
                    warn!("ignoring skip pattern: {}", e);
                    None
                }
            });
        SpinSelector::new(skip)
    }

    pub fn share_url(&self, origin: &str, encoded: &str) -> String {
        share_url(origin, &self.query_param, encoded)
    }
}

/// Link that reopens the app with `encoded` as its starting state. The
/// encoding is URL-safe already, so it is inserted as-is.
pub fn share_url(origin: &str, query_param: &str, encoded: &str) -> String {
    format!("{}/?{}={}", origin.trim_end_matches('/'), query_param, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://wheel.test/", "wheels", "abc_-1"),
            "https://wheel.test/?wheels=abc_-1"
        );
    }

    #[test]
    fn test_invalid_skip_pattern_is_ignored() {
        let config = FrontendConfig {
            skip_name: Some("(".to_string()),
            ..FrontendConfig::default()
        };
        let state = wheel_shared::WheelManagerState::default();
        let candidates = config.spin_selector().candidates(state.selected_wheel());
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_skip_pattern_filters_candidates() {
        let config = FrontendConfig {
            skip_name: Some("^Name [12]$".to_string()),
            ..FrontendConfig::default()
        };
        let state = wheel_shared::WheelManagerState::default();
        let labels: Vec<_> = config
            .spin_selector()
            .candidates(state.selected_wheel())
            .iter()
            .map(|segment| segment.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Name 3", "Name 4", "Name 5"]);

        let empty = FrontendConfig {
            skip_name: Some(String::new()),
            ..FrontendConfig::default()
        };
        assert_eq!(empty.spin_selector().candidates(state.selected_wheel()).len(), 5);
    }
}
