//! Pure reducer over [`WheelManagerState`].
//!
//! Every transition returns a new state value. Identifiers an action needs are
//! minted by its constructor helper, so replaying a recorded action list
//! always produces the same states.

use log::warn;

use crate::constants::numbered_wheel_label;
use crate::error::WheelError;
use crate::ids::{SegmentId, WheelId};
use crate::reconcile::reconcile;
use crate::wheel_state::{Segment, Wheel, WheelManagerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelAction {
    CreateSegment {
        wheel_id: WheelId,
        segment_id: SegmentId,
        label: String,
    },
    UpdateSegment {
        wheel_id: WheelId,
        segment_id: SegmentId,
        label: String,
    },
    DeleteSegment {
        wheel_id: WheelId,
        segment_id: SegmentId,
    },
    /// Bulk edit: reconcile the wheel against a flat list of labels.
    /// `fresh_ids` supplies identities for segments that must be created and
    /// needs at least one per label; a shorter list leaves the wheel alone.
    ReplaceSegments {
        wheel_id: WheelId,
        labels: Vec<String>,
        fresh_ids: Vec<SegmentId>,
    },
    StartSpin {
        wheel_id: WheelId,
        winner: SegmentId,
    },
    EndSpin,
    ResetWheel {
        wheel_id: WheelId,
    },
    CreateWheel {
        wheel_id: WheelId,
        label: Option<String>,
    },
    UpdateWheel {
        wheel_id: WheelId,
        label: String,
    },
    DeleteWheel {
        wheel_id: WheelId,
    },
    SelectWheel {
        wheel_id: WheelId,
    },
    SetShowShareLink(bool),
    ReplaceState(Box<WheelManagerState>),
}

impl WheelAction {
    pub fn create_segment(wheel_id: WheelId, label: impl Into<String>) -> Self {
        Self::CreateSegment {
            wheel_id,
            segment_id: SegmentId::new(),
            label: label.into(),
        }
    }

    pub fn replace_segments<I, S>(wheel_id: WheelId, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let fresh_ids = labels.iter().map(|_| SegmentId::new()).collect();
        Self::ReplaceSegments {
            wheel_id,
            labels,
            fresh_ids,
        }
    }

    pub fn create_wheel(label: Option<String>) -> Self {
        Self::CreateWheel {
            wheel_id: WheelId::new(),
            label,
        }
    }

    pub fn replace_state(state: WheelManagerState) -> Self {
        Self::ReplaceState(Box::new(state))
    }
}

impl WheelManagerState {
    /// Applies `action`, returning the next state. On error the current state
    /// is left as it was and nothing is returned.
    pub fn apply(&self, action: WheelAction) -> Result<WheelManagerState, WheelError> {
        let mut next = self.clone();
        match action {
            WheelAction::CreateSegment {
                wheel_id,
                segment_id,
                label,
            } => {
                next.update_wheel(wheel_id, |wheel| {
                    wheel.segments.push(Segment::new(segment_id, label));
                });
            }
            WheelAction::UpdateSegment {
                wheel_id,
                segment_id,
                label,
            } => {
                next.update_wheel(wheel_id, |wheel| {
                    match wheel.segments.iter_mut().find(|s| s.id == segment_id) {
                        Some(segment) => {
                            segment.label = label;
                            segment.removed = false;
                            segment.selected = false;
                        }
                        None => warn!("segment {} not found on wheel {}", segment_id, wheel_id),
                    }
                });
            }
            WheelAction::DeleteSegment {
                wheel_id,
                segment_id,
            } => {
                let not_found = WheelError::SegmentNotFound {
                    wheel: wheel_id,
                    segment: segment_id,
                };
                let wheel = next
                    .wheels
                    .iter_mut()
                    .find(|wheel| wheel.id == wheel_id)
                    .ok_or_else(|| not_found.clone())?;
                let index = wheel
                    .segments
                    .iter()
                    .position(|s| s.id == segment_id)
                    .ok_or(not_found)?;
                wheel.segments.remove(index);
            }
            WheelAction::ReplaceSegments {
                wheel_id,
                labels,
                fresh_ids,
            } => {
                if fresh_ids.len() < labels.len() {
                    warn!(
                        "{} labels but only {} fresh ids for wheel {}, ignoring",
                        labels.len(),
                        fresh_ids.len(),
                        wheel_id
                    );
                    return Ok(next);
                }
                let mut fresh_ids = fresh_ids.into_iter();
                next.update_wheel(wheel_id, |wheel| {
                    wheel.segments = reconcile(&wheel.segments, &labels, || {
                        fresh_ids.next().unwrap_or_default()
                    });
                });
            }
            WheelAction::StartSpin { wheel_id, winner } => {
                next.update_wheel(wheel_id, |wheel| start_spin(wheel, winner));
            }
            WheelAction::EndSpin => {
                let selected = next.selected_wheel;
                next.update_wheel(selected, |wheel| wheel.is_spinning = false);
            }
            WheelAction::ResetWheel { wheel_id } => {
                next.update_wheel(wheel_id, |wheel| {
                    for segment in &mut wheel.segments {
                        segment.removed = false;
                        segment.selected = false;
                    }
                    wheel.is_spinning = false;
                });
            }
            WheelAction::CreateWheel { wheel_id, label } => {
                let label = label
                    .filter(|label| !label.trim().is_empty())
                    .unwrap_or_else(|| numbered_wheel_label(next.wheels.len() + 1));
                next.previous_selected_index = Some(next.selected_index());
                next.wheels.push(Wheel::new(wheel_id, label));
                next.selected_wheel = wheel_id;
            }
            WheelAction::UpdateWheel { wheel_id, label } => {
                next.update_wheel(wheel_id, |wheel| wheel.label = label);
            }
            WheelAction::DeleteWheel { wheel_id } => {
                if next.wheels.len() <= 1 {
                    return Err(WheelError::LastWheel);
                }
                let index = next
                    .index_of(wheel_id)
                    .ok_or(WheelError::WheelNotFound(wheel_id))?;
                let selected_index = next.selected_index();
                next.wheels.remove(index);

                if wheel_id == next.selected_wheel {
                    let index = selected_index.min(next.wheels.len() - 1);
                    next.previous_selected_index = Some(selected_index);
                    next.selected_wheel = next.wheels[index].id;
                } else {
                    // Selection stays on the same wheel; nothing scrolls.
                    next.previous_selected_index = Some(next.selected_index());
                }
            }
            WheelAction::SelectWheel { wheel_id } => {
                if next.index_of(wheel_id).is_none() {
                    warn!("cannot select missing wheel {}", wheel_id);
                    return Ok(next);
                }
                let previous = next.selected_wheel;
                next.update_wheel(previous, |wheel| wheel.is_spinning = false);
                next.previous_selected_index = Some(next.selected_index());
                next.selected_wheel = wheel_id;
            }
            WheelAction::SetShowShareLink(show) => {
                next.show_share_link = show;
            }
            WheelAction::ReplaceState(state) => {
                next = *state;
            }
        }
        Ok(next)
    }

    /// Folds `actions` over `self`, stopping at the first failure.
    pub fn apply_all<I>(&self, actions: I) -> Result<WheelManagerState, WheelError>
    where
        I: IntoIterator<Item = WheelAction>,
    {
        actions
            .into_iter()
            .try_fold(self.clone(), |state, action| state.apply(action))
    }

    fn update_wheel<F>(&mut self, wheel_id: WheelId, update: F)
    where
        F: FnOnce(&mut Wheel),
    {
        match self.wheels.iter_mut().find(|wheel| wheel.id == wheel_id) {
            Some(wheel) => update(wheel),
            None => warn!("wheel {} not found, ignoring action", wheel_id),
        }
    }
}

fn start_spin(wheel: &mut Wheel, winner: SegmentId) {
    if wheel.eligible_segments().next().is_none() {
        return;
    }
    if !wheel.eligible_segments().any(|segment| segment.id == winner) {
        warn!("segment {} is not eligible to win on wheel {}", winner, wheel.id);
        return;
    }

    for segment in &mut wheel.segments {
        segment.removed = segment.removed || segment.selected;
        segment.selected = segment.id == winner;
    }
    wheel.is_spinning = true;
}
