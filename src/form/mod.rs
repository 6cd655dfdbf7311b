//! Form state, validation, navigation gating and payload compilation

pub mod derived;
pub mod navigation;
pub mod payload;
pub mod store;
pub mod types;
pub mod validation;

pub use derived::{max_impact_points, per_winner_amount};
pub use navigation::{can_navigate, can_reach, furthest_reachable, Step};
pub use payload::{compile, Payload, PayloadSummary};
pub use store::{
    FormStore, StepOnePatch, StepThreePatch, StepTwoPatch, StoreEvent, SubscriptionId,
};
pub use types::*;
pub use validation::{
    validate_step_one, validate_step_three, validate_step_two, Field, FieldError,
    ValidationResult,
};
