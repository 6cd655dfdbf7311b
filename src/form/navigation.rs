//! Which steps are reachable, re-derived from the current state on every call

use serde::{Deserialize, Serialize};

use super::types::FormState;
use super::validation::{validate_step_one, validate_step_three, validate_step_two};
use super::ValidationResult;

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    One,
    Two,
    Three,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[Step::One, Step::Two, Step::Three]
    }

    pub fn number(&self) -> u8 {
        match self {
            Step::One => 1,
            Step::Two => 2,
            Step::Three => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Step> {
        match number {
            1 => Some(Step::One),
            2 => Some(Step::Two),
            3 => Some(Step::Three),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::One => "Basic Details",
            Step::Two => "Rewards & Timeline",
            Step::Three => "Backer Information",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::One => Some(Step::Two),
            Step::Two => Some(Step::Three),
            Step::Three => None,
        }
    }

    pub fn prev(&self) -> Option<Step> {
        match self {
            Step::One => None,
            Step::Two => Some(Step::One),
            Step::Three => Some(Step::Two),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Run this step's validator against `state`
    pub fn validate(&self, state: &FormState) -> ValidationResult {
        match self {
            Step::One => validate_step_one(&state.step1),
            Step::Two => validate_step_two(&state.step2),
            Step::Three => validate_step_three(&state.step3),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step-{}", self.number())
    }
}

/// Whether `step` may be entered given everything before it
pub fn can_reach(step: Step, state: &FormState) -> bool {
    match step {
        Step::One => true,
        Step::Two => validate_step_one(&state.step1).is_valid(),
        Step::Three => {
            validate_step_one(&state.step1).is_valid() && validate_step_two(&state.step2).is_valid()
        }
    }
}

/// Backward moves are always allowed; forward and lateral ones go through the gate
pub fn can_navigate(from: Step, to: Step, state: &FormState) -> bool {
    to < from || can_reach(to, state)
}

/// Last step the gate currently lets the user into
pub fn furthest_reachable(state: &FormState) -> Step {
    Step::all()
        .iter()
        .copied()
        .rev()
        .find(|step| can_reach(*step, state))
        .unwrap_or(Step::One)
}
