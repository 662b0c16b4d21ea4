use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use wheel_shared::constants::{MAX_EXTRA_TURNS, MIN_EXTRA_TURNS};
use wheel_shared::{
    pick_extra_turns, ScrollDirection, SpinSelector, Wheel, WheelAction, WheelManagerState,
};
use yew::prelude::*;

use crate::config::FrontendConfig;
use crate::persistence::{load_initial_state, AutoSaver, ShareLink};
use crate::ports::{LinkPort, StoragePort};
use crate::web::{BrowserLink, BrowserStorage};

/// Reducer wrapper so the wheel state can live in `use_reducer`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelStore {
    pub state: WheelManagerState,
}

impl Reducible for WheelStore {
    type Action = WheelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.state.apply(action) {
            Ok(state) => Rc::new(Self { state }),
            Err(e) => {
                warn!("wheel action rejected: {}", e);
                self
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SaveStatus {
    serialized: Option<String>,
    share_link: ShareLink,
}

impl SaveStatus {
    fn of<S: StoragePort, L: LinkPort>(saver: &AutoSaver<S, L>) -> Self {
        Self {
            serialized: saver.serialized().map(str::to_string),
            share_link: saver.share_link().clone(),
        }
    }
}

impl Default for SaveStatus {
    fn default() -> Self {
        Self {
            serialized: None,
            share_link: ShareLink::Hidden,
        }
    }
}

#[derive(Clone)]
pub struct UseWheelsHandle {
    store: UseReducerHandle<WheelStore>,
    selector: Rc<SpinSelector>,
    pub loading: bool,
    pub serialized: Option<String>,
    pub share_link: ShareLink,
}

impl UseWheelsHandle {
    pub fn state(&self) -> &WheelManagerState {
        &self.store.state
    }

    pub fn wheels(&self) -> &[Wheel] {
        self.store.state.wheels()
    }

    pub fn selected_wheel(&self) -> &Wheel {
        self.store.state.selected_wheel()
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.store.state.scroll_direction()
    }

    pub fn dispatch(&self, action: WheelAction) {
        self.store.dispatch(action);
    }

    pub fn dispatcher(&self) -> UseReducerDispatcher<WheelStore> {
        self.store.dispatcher()
    }

    /// Starts a spin on the selected wheel. Returns the number of extra
    /// turns to animate, or `None` if the wheel cannot spin right now.
    pub fn spin(&self) -> Option<u32> {
        let mut rng = rand::thread_rng();
        let action = self.selector.start_spin(self.state(), &mut rng)?;
        let turns = pick_extra_turns(&mut rng, MIN_EXTRA_TURNS, MAX_EXTRA_TURNS).ok()?;
        self.dispatch(action);
        Some(turns)
    }
}

#[hook]
pub fn use_wheels() -> UseWheelsHandle {
    let config = use_memo((), |_| FrontendConfig::default());
    let selector = {
        let config = config.clone();
        use_memo((), move |_| config.spin_selector())
    };
    let store = use_reducer(WheelStore::default);
    let loading = use_state(|| true);
    let status = use_state(SaveStatus::default);
    let saver = {
        let config = config.clone();
        use_mut_ref(move || AutoSaver::new(BrowserStorage::new(), BrowserLink, (*config).clone()))
    };
    let trailing: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);

    // Hydrate once; write out anything still pending on unmount
    {
        let store = store.clone();
        let loading = loading.clone();
        let saver = saver.clone();
        use_effect_with((), move |_| {
            let (state, _) = load_initial_state(&BrowserLink, &BrowserStorage::new(), &config);
            store.dispatch(WheelAction::replace_state(state));
            loading.set(false);

            move || {
                saver.borrow_mut().flush();
            }
        });
    }

    {
        let saver = saver.clone();
        let status = status.clone();
        use_effect_with(
            (store.state.clone(), *loading),
            move |(state, loading)| {
                if !*loading {
                    let now = js_sys::Date::now() as u64;
                    let mut autosaver = saver.borrow_mut();
                    if autosaver.observe(state, now) {
                        status.set(SaveStatus::of(&autosaver));
                    }

                    // Replacing the handle cancels the previous trailing save
                    *trailing.borrow_mut() = autosaver.next_deadline().map(|deadline| {
                        let saver = saver.clone();
                        let status = status.clone();
                        let delay = deadline.saturating_sub(now).min(u32::MAX as u64) as u32;
                        Timeout::new(delay, move || {
                            let now = (js_sys::Date::now() as u64).max(deadline);
                            let mut autosaver = saver.borrow_mut();
                            if autosaver.tick(now) {
                                status.set(SaveStatus::of(&autosaver));
                            }
                        })
                    });
                }
                || ()
            },
        );
    }

    UseWheelsHandle {
        store,
        selector,
        loading: *loading,
        serialized: status.serialized.clone(),
        share_link: status.share_link.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_ignores_rejected_actions() {
        let store = Rc::new(WheelStore::default());
        let only = store.state.selected_wheel_id();
        let next = store.clone().reduce(WheelAction::DeleteWheel { wheel_id: only });
        assert!(Rc::ptr_eq(&store, &next));
    }

    #[test]
    fn test_store_applies_actions() {
        let store = Rc::new(WheelStore::default());
        let next = store.clone().reduce(WheelAction::create_wheel(None));
        assert_eq!(next.state.wheels().len(), 2);
        assert_eq!(next.state.selected_wheel().label, "Wheel 2");
    }
}
