//! Figures computed from partial step 2 input, never stored

use super::types::{Reward, StepTwo};

/// Reward share per winner, 0 unless both amount and winners are positive
pub fn per_winner_amount(reward: &Reward) -> f64 {
    if reward.amount > 0.0 && reward.winners > 0 {
        reward.amount / f64::from(reward.winners)
    } else {
        0.0
    }
}

/// `failure_threshold * winners`
pub fn max_impact_points(step: &StepTwo) -> u64 {
    u64::from(step.failure_threshold) * u64::from(step.reward.winners)
}
