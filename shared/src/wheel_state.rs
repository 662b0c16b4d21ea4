use serde::Serialize;

use crate::constants::{
    placeholder_segment_label, DEFAULT_SEGMENT_COUNT, DEFAULT_WHEEL_LABEL,
};
use crate::ids::{SegmentId, WheelId};

/// One selectable entry on a wheel
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub label: String,
    /// Winner of the most recent spin on this wheel.
    pub selected: bool,
    /// Won an earlier spin in the current round; excluded until reset.
    pub removed: bool,
}

impl Segment {
    pub fn new(id: SegmentId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            selected: false,
            removed: false,
        }
    }

    pub fn is_eligible(&self) -> bool {
        !self.removed && !self.selected
    }

    /// Empty and whitespace-only labels are never persisted.
    pub fn has_visible_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

/// A named set of segments plus its transient spin status
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Wheel {
    pub id: WheelId,
    pub label: String,
    pub segments: Vec<Segment>,
    pub is_spinning: bool,
}

impl Wheel {
    pub fn new(id: WheelId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            segments: Vec::new(),
            is_spinning: false,
        }
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    pub fn eligible_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| segment.is_eligible())
    }

    pub fn selected_segment(&self) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.selected)
    }

    /// Segments still drawn on the wheel (everything not yet eliminated).
    pub fn visible_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| !segment.removed)
    }

    pub fn can_reset(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.removed || segment.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// The aggregate of all wheels and which one is selected.
///
/// Fields are crate-private so that the two structural invariants hold for
/// every value a caller can observe: `wheels` is never empty and
/// `selected_wheel` always names one of them.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct WheelManagerState {
    pub(crate) wheels: Vec<Wheel>,
    pub(crate) selected_wheel: WheelId,
    /// Index selected before the last selection change, kept as a position
    /// so it survives the deletion of that wheel.
    pub(crate) previous_selected_index: Option<usize>,
    pub(crate) show_share_link: bool,
}

impl WheelManagerState {
    /// Builds a state from hydrated wheels, selecting the wheel at
    /// `selected_index`. Returns `None` when there are no wheels; an out of
    /// range index selects the first wheel.
    pub fn from_wheels(wheels: Vec<Wheel>, selected_index: usize) -> Option<Self> {
        let selected_wheel = wheels
            .get(selected_index)
            .or_else(|| wheels.first())
            .map(|wheel| wheel.id)?;

        Some(Self {
            wheels,
            selected_wheel,
            previous_selected_index: None,
            show_share_link: false,
        })
    }

    pub fn wheels(&self) -> &[Wheel] {
        &self.wheels
    }

    pub fn wheel(&self, id: WheelId) -> Option<&Wheel> {
        self.wheels.iter().find(|wheel| wheel.id == id)
    }

    pub fn index_of(&self, id: WheelId) -> Option<usize> {
        self.wheels.iter().position(|wheel| wheel.id == id)
    }

    pub fn selected_wheel_id(&self) -> WheelId {
        self.selected_wheel
    }

    pub fn selected_wheel(&self) -> &Wheel {
        // The constructor and every transition keep the pointer valid.
        self.wheel(self.selected_wheel).unwrap_or(&self.wheels[0])
    }

    pub fn selected_index(&self) -> usize {
        self.index_of(self.selected_wheel).unwrap_or(0)
    }

    pub fn previous_selected_index(&self) -> Option<usize> {
        self.previous_selected_index
    }

    pub fn show_share_link(&self) -> bool {
        self.show_share_link
    }

    /// Direction the wheel list moved in the last selection change, if any.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        let previous = self.previous_selected_index?;
        match previous.cmp(&self.selected_index()) {
            std::cmp::Ordering::Less => Some(ScrollDirection::Down),
            std::cmp::Ordering::Greater => Some(ScrollDirection::Up),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn next_wheel_id(&self) -> Option<WheelId> {
        self.wheels
            .get(self.selected_index() + 1)
            .map(|wheel| wheel.id)
    }

    pub fn has_next_wheel(&self) -> bool {
        self.next_wheel_id().is_some()
    }
}

impl Default for WheelManagerState {
    fn default() -> Self {
        let mut wheel = Wheel::new(WheelId::new(), DEFAULT_WHEEL_LABEL);
        wheel.segments = (1..=DEFAULT_SEGMENT_COUNT)
            .map(|i| Segment::new(SegmentId::new(), placeholder_segment_label(i)))
            .collect();

        Self {
            selected_wheel: wheel.id,
            wheels: vec![wheel],
            previous_selected_index: None,
            show_share_link: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = WheelManagerState::default();
        assert_eq!(state.wheels().len(), 1);
        let wheel = state.selected_wheel();
        assert_eq!(wheel.label, DEFAULT_WHEEL_LABEL);
        let labels: Vec<_> = wheel.segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Name 1", "Name 2", "Name 3", "Name 4", "Name 5"]);
        assert!(wheel.segments.iter().all(Segment::is_eligible));
        assert!(!wheel.is_spinning);
        assert_eq!(state.scroll_direction(), None);
    }

    #[test]
    fn test_from_wheels_rejects_empty_and_clamps_index() {
        assert!(WheelManagerState::from_wheels(Vec::new(), 0).is_none());

        let wheels = vec![
            Wheel::new(WheelId::new(), "A"),
            Wheel::new(WheelId::new(), "B"),
        ];
        let first = wheels[0].id;
        let state = WheelManagerState::from_wheels(wheels, 7).unwrap();
        assert_eq!(state.selected_wheel_id(), first);
    }

    #[test]
    fn test_can_reset_tracks_flags() {
        let mut wheel = Wheel::new(WheelId::new(), "W");
        wheel.segments.push(Segment::new(SegmentId::new(), "a"));
        assert!(!wheel.can_reset());
        wheel.segments[0].selected = true;
        assert!(wheel.can_reset());
        assert_eq!(wheel.eligible_segments().count(), 0);
        assert_eq!(wheel.visible_segments().count(), 1);
    }
}
