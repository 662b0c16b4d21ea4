//! Random selection of spin winners.

use rand::Rng;
use regex::Regex;

use crate::error::WheelError;
use crate::ids::SegmentId;
use crate::wheel_reducer::WheelAction;
use crate::wheel_state::{Segment, Wheel, WheelManagerState};

/// Uniform index in `[0, count)`.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<usize, WheelError> {
    if count == 0 {
        return Err(WheelError::NoEligibleSegments);
    }
    Ok(rng.gen_range(0..count))
}

/// Uniform number of extra full turns in `[min, max]`, used to vary how long
/// the wheel animation runs.
pub fn pick_extra_turns<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> Result<u32, WheelError> {
    if min > max {
        return Err(WheelError::InvalidTurnRange { min, max });
    }
    Ok(rng.gen_range(min..=max))
}

/// Labels matching this pattern are passed over when spinning, unless every
/// eligible label matches.
///
/// Matching is a case-sensitive regex search anywhere in the label.
#[derive(Debug, Clone)]
pub struct SkipPattern(Regex);

impl SkipPattern {
    pub fn new(pattern: &str) -> Result<Self, WheelError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| WheelError::InvalidSkipPattern(e.to_string()))
    }

    pub fn matches(&self, label: &str) -> bool {
        !label.is_empty() && self.0.is_match(label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpinSelector {
    skip: Option<SkipPattern>,
}

impl SpinSelector {
    pub fn new(skip: Option<SkipPattern>) -> Self {
        Self { skip }
    }

    /// Segments a spin may land on, after applying the skip pattern.
    pub fn candidates<'a>(&self, wheel: &'a Wheel) -> Vec<&'a Segment> {
        let eligible: Vec<&Segment> = wheel.eligible_segments().collect();
        let Some(skip) = &self.skip else {
            return eligible;
        };
        if eligible.iter().all(|segment| skip.matches(&segment.label)) {
            return eligible;
        }
        eligible
            .into_iter()
            .filter(|segment| !skip.matches(&segment.label))
            .collect()
    }

    pub fn choose_winner<R: Rng + ?Sized>(&self, wheel: &Wheel, rng: &mut R) -> Option<SegmentId> {
        let candidates = self.candidates(wheel);
        let index = pick_index(rng, candidates.len()).ok()?;
        Some(candidates[index].id)
    }

    /// The `StartSpin` action for the selected wheel, or `None` while it is
    /// already spinning or has nothing left to pick.
    pub fn start_spin<R: Rng + ?Sized>(&self, state: &WheelManagerState, rng: &mut R) -> Option<WheelAction> {
        let wheel = state.selected_wheel();
        if wheel.is_spinning {
            return None;
        }
        let winner = self.choose_winner(wheel, rng)?;
        Some(WheelAction::StartSpin {
            wheel_id: wheel.id,
            winner,
        })
    }
}
