//! Per-step field validators
//!
//! Each validator looks at one step record only. Cross-step composition lives
//! in [`super::navigation`].

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::types::{Mode, StepOne, StepThree, StepTwo, TITLE_MAX_CHARS};

/// Field a validation message is attached to.
///
/// Serializes to the key the message is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    BountyType,
    DominantCore,
    Mode,
    Location,
    Currency,
    Amount,
    Winners,
    FailureThreshold,
    ImpactBriefMessage,
    Sdgs,
    BackerName,
    TermsAccepted,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::BountyType => "type",
            Field::DominantCore => "dominant_core",
            Field::Mode => "mode",
            Field::Location => "location",
            Field::Currency => "currency",
            Field::Amount => "amount",
            Field::Winners => "winners",
            Field::FailureThreshold => "failureThreshold",
            Field::ImpactBriefMessage => "impactBriefMessage",
            Field::Sdgs => "sdgs",
            Field::BackerName => "backer_name",
            Field::TermsAccepted => "terms_accepted",
        }
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A user-facing reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be 40 characters or less")]
    TitleTooLong,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Type is required")]
    TypeRequired,
    #[error("Dominant core is required")]
    DominantCoreRequired,
    #[error("Mode is required")]
    ModeRequired,
    #[error("Location is required for physical mode")]
    LocationRequired,
    #[error("Currency is required")]
    CurrencyRequired,
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Winners must be at least 1")]
    WinnersBelowOne,
    #[error("Failure threshold must be at least 1")]
    FailureThresholdBelowOne,
    #[error("Impact brief message is required when impact certificate is enabled")]
    ImpactBriefRequired,
    #[error("At least one SDG must be selected")]
    SdgsRequired,
    #[error("Backer name is required")]
    BackerNameRequired,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of validating one step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Field keys in a stable order, for logging
    pub fn keys(&self) -> Vec<&'static str> {
        self.errors.keys().map(Field::key).collect()
    }

    fn require(&mut self, ok: bool, field: Field, error: FieldError) {
        if !ok {
            self.errors.insert(field, error);
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_step_one(data: &StepOne) -> ValidationResult {
    let mut result = ValidationResult::default();

    if is_blank(&data.title) {
        result.require(false, Field::Title, FieldError::TitleRequired);
    } else {
        result.require(
            data.title.chars().count() <= TITLE_MAX_CHARS,
            Field::Title,
            FieldError::TitleTooLong,
        );
    }

    result.require(
        !is_blank(&data.description),
        Field::Description,
        FieldError::DescriptionRequired,
    );
    result.require(
        data.bounty_type.is_some(),
        Field::BountyType,
        FieldError::TypeRequired,
    );
    result.require(
        data.dominant_core.is_some(),
        Field::DominantCore,
        FieldError::DominantCoreRequired,
    );
    result.require(data.mode.is_some(), Field::Mode, FieldError::ModeRequired);

    if data.mode == Some(Mode::Physical) {
        result.require(
            !is_blank(&data.location),
            Field::Location,
            FieldError::LocationRequired,
        );
    }

    result
}

pub fn validate_step_two(data: &StepTwo) -> ValidationResult {
    let mut result = ValidationResult::default();

    result.require(
        data.reward.currency.is_some(),
        Field::Currency,
        FieldError::CurrencyRequired,
    );
    // Non-finite amounts have no JSON representation
    result.require(
        data.reward.amount.is_finite() && data.reward.amount > 0.0,
        Field::Amount,
        FieldError::AmountNotPositive,
    );
    result.require(
        data.reward.winners >= 1,
        Field::Winners,
        FieldError::WinnersBelowOne,
    );
    result.require(
        data.failure_threshold >= 1,
        Field::FailureThreshold,
        FieldError::FailureThresholdBelowOne,
    );

    if data.has_impact_certificate {
        result.require(
            !is_blank(&data.impact_brief_message),
            Field::ImpactBriefMessage,
            FieldError::ImpactBriefRequired,
        );
    }

    // Only the lower bound; the cap of four is applied when selecting
    result.require(!data.sdgs.is_empty(), Field::Sdgs, FieldError::SdgsRequired);

    result
}

pub fn validate_step_three(data: &StepThree) -> ValidationResult {
    let mut result = ValidationResult::default();

    if data.has_backer {
        result.require(
            !is_blank(&data.backer.name),
            Field::BackerName,
            FieldError::BackerNameRequired,
        );
    }

    result.require(
        data.terms_accepted,
        Field::TermsAccepted,
        FieldError::TermsNotAccepted,
    );

    result
}
