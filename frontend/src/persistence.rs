//! Where wheel state comes from on load and where it goes afterwards.

use log::{debug, error};
use wheel_shared::{check_share_length, decode, encode, migrate_legacy, WheelManagerState};

use crate::config::FrontendConfig;
use crate::debounce::Debouncer;
use crate::ports::{LinkPort, StoragePort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Query,
    Storage,
    Legacy,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    Ready(String),
    TooLong,
    Hidden,
}

/// Picks the starting state: shared link, then saved state, then the legacy
/// record, then the default wheel. A link that decodes is removed from the
/// address bar and a legacy record is removed from storage once read.
pub fn load_initial_state<L, S>(
    link: &L,
    storage: &S,
    config: &FrontendConfig,
) -> (WheelManagerState, LoadSource)
where
    L: LinkPort + ?Sized,
    S: StoragePort + ?Sized,
{
    let (state, source) = read_initial_state(link, storage, config);
    debug!("loaded wheel state from {:?}", source);
    (state, source)
}

fn read_initial_state<L, S>(
    link: &L,
    storage: &S,
    config: &FrontendConfig,
) -> (WheelManagerState, LoadSource)
where
    L: LinkPort + ?Sized,
    S: StoragePort + ?Sized,
{
    if let Some(state) = link.query_param(&config.query_param).and_then(|raw| decode(&raw)) {
        link.clear_query();
        return (state, LoadSource::Query);
    }

    if let Some(state) = storage.get_item(&config.storage_key).and_then(|raw| decode(&raw)) {
        return (state, LoadSource::Storage);
    }

    if let Some(raw) = storage.get_item(&config.legacy_storage_key) {
        storage.remove_item(&config.legacy_storage_key);
        match migrate_legacy(&raw) {
            Ok(state) => return (state, LoadSource::Legacy),
            Err(e) => error!("Error getting wheel state from local storage: {}", e),
        }
    }

    (WheelManagerState::default(), LoadSource::Default)
}

/// Debounced writer of the encoded state to storage and the address bar.
pub struct AutoSaver<S, L> {
    storage: S,
    link: L,
    config: FrontendConfig,
    debouncer: Debouncer<WheelManagerState>,
    serialized: Option<String>,
    share_link: ShareLink,
}

impl<S: StoragePort, L: LinkPort> AutoSaver<S, L> {
    pub fn new(storage: S, link: L, config: FrontendConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce_ms);
        Self {
            storage,
            link,
            config,
            debouncer,
            serialized: None,
            share_link: ShareLink::Hidden,
        }
    }

    /// Feeds a new state in. Returns true if it was saved right away.
    pub fn observe(&mut self, state: &WheelManagerState, now: u64) -> bool {
        match self.debouncer.offer(state.clone(), now) {
            Some(state) => {
                self.save(&state);
                true
            }
            None => false,
        }
    }

    /// Saves the held state if its window has elapsed.
    pub fn tick(&mut self, now: u64) -> bool {
        match self.debouncer.poll(now) {
            Some(state) => {
                self.save(&state);
                true
            }
            None => false,
        }
    }

    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(state) => {
                self.save(&state);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.debouncer.deadline()
    }

    pub fn serialized(&self) -> Option<&str> {
        self.serialized.as_deref()
    }

    pub fn share_link(&self) -> &ShareLink {
        &self.share_link
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    fn save(&mut self, state: &WheelManagerState) {
        let encoded = match encode(state) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("failed to encode wheel state: {}", e);
                return;
            }
        };

        self.storage.set_item(&self.config.storage_key, &encoded);

        let fits = check_share_length(&encoded, self.config.share_link_max_len).is_ok();
        if state.show_share_link() && fits {
            self.link.set_query_param(&self.config.query_param, &encoded);
        } else {
            self.link.clear_query();
        }

        self.share_link = match (state.show_share_link(), fits) {
            (false, _) => ShareLink::Hidden,
            (true, false) => ShareLink::TooLong,
            (true, true) => {
                ShareLink::Ready(self.config.share_url(&self.link.origin(), &encoded))
            }
        };
        self.serialized = Some(encoded);
    }
}
