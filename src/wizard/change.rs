//! Primitive field changes reported by the rendering surface

use crate::form::{
    Backer, BountyType, Currency, DominantCore, Field, FormState, Mode, Reward, Sdg, Step,
    StepOnePatch, StepThreePatch, StepTwoPatch, Timeline,
};

/// One edited value, as reported by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    // Step 1
    Title(String),
    Description(String),
    ProjectTitle(String),
    BountyType(Option<BountyType>),
    DominantCore(Option<DominantCore>),
    Mode(Option<Mode>),
    Location(String),
    // Step 2
    Currency(Option<Currency>),
    Amount(f64),
    Winners(u32),
    ExpirationDate(String),
    Days(u32),
    Hours(u32),
    Minutes(u32),
    ImpactCertificate(bool),
    ImpactBriefMessage(String),
    Sdgs(Vec<Sdg>),
    FailureThreshold(u32),
    // Step 3
    HasBacker(bool),
    BackerName(String),
    BackerLogo(String),
    BackerMessage(String),
    TermsAccepted(bool),
}

/// A change translated into a store write
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepPatch {
    One(StepOnePatch),
    Two(StepTwoPatch),
    Three(StepThreePatch),
}

impl FieldChange {
    /// Step whose screen owns this field
    pub fn step(&self) -> Step {
        match self {
            FieldChange::Title(_)
            | FieldChange::Description(_)
            | FieldChange::ProjectTitle(_)
            | FieldChange::BountyType(_)
            | FieldChange::DominantCore(_)
            | FieldChange::Mode(_)
            | FieldChange::Location(_) => Step::One,
            FieldChange::Currency(_)
            | FieldChange::Amount(_)
            | FieldChange::Winners(_)
            | FieldChange::ExpirationDate(_)
            | FieldChange::Days(_)
            | FieldChange::Hours(_)
            | FieldChange::Minutes(_)
            | FieldChange::ImpactCertificate(_)
            | FieldChange::ImpactBriefMessage(_)
            | FieldChange::Sdgs(_)
            | FieldChange::FailureThreshold(_) => Step::Two,
            FieldChange::HasBacker(_)
            | FieldChange::BackerName(_)
            | FieldChange::BackerLogo(_)
            | FieldChange::BackerMessage(_)
            | FieldChange::TermsAccepted(_) => Step::Three,
        }
    }

    /// Error key cleared when this field is edited.
    ///
    /// Toggles and fields without a validation rule clear nothing.
    pub fn clears(&self) -> Option<Field> {
        match self {
            FieldChange::Title(_) => Some(Field::Title),
            FieldChange::Description(_) => Some(Field::Description),
            FieldChange::BountyType(_) => Some(Field::BountyType),
            FieldChange::DominantCore(_) => Some(Field::DominantCore),
            FieldChange::Mode(_) => Some(Field::Mode),
            FieldChange::Location(_) => Some(Field::Location),
            FieldChange::Currency(_) => Some(Field::Currency),
            FieldChange::Amount(_) => Some(Field::Amount),
            FieldChange::Winners(_) => Some(Field::Winners),
            FieldChange::ImpactBriefMessage(_) => Some(Field::ImpactBriefMessage),
            FieldChange::Sdgs(_) => Some(Field::Sdgs),
            FieldChange::FailureThreshold(_) => Some(Field::FailureThreshold),
            FieldChange::BackerName(_) => Some(Field::BackerName),
            FieldChange::TermsAccepted(_) => Some(Field::TermsAccepted),
            FieldChange::ProjectTitle(_)
            | FieldChange::ExpirationDate(_)
            | FieldChange::Days(_)
            | FieldChange::Hours(_)
            | FieldChange::Minutes(_)
            | FieldChange::ImpactCertificate(_)
            | FieldChange::HasBacker(_)
            | FieldChange::BackerLogo(_)
            | FieldChange::BackerMessage(_) => None,
        }
    }

    /// Build the store write, spreading the current nested records
    pub(crate) fn into_patch(self, current: &FormState) -> StepPatch {
        let reward = &current.step2.reward;
        let timeline = &current.step2.timeline;
        let backer = &current.step3.backer;

        match self {
            FieldChange::Title(title) => StepPatch::One(StepOnePatch {
                title: Some(title),
                ..Default::default()
            }),
            FieldChange::Description(description) => StepPatch::One(StepOnePatch {
                description: Some(description),
                ..Default::default()
            }),
            FieldChange::ProjectTitle(project_title) => StepPatch::One(StepOnePatch {
                project_title: Some(project_title),
                ..Default::default()
            }),
            FieldChange::BountyType(bounty_type) => StepPatch::One(StepOnePatch {
                bounty_type: Some(bounty_type),
                ..Default::default()
            }),
            FieldChange::DominantCore(core) => StepPatch::One(StepOnePatch {
                dominant_core: Some(core),
                ..Default::default()
            }),
            FieldChange::Mode(mode) => StepPatch::One(StepOnePatch {
                mode: Some(mode),
                ..Default::default()
            }),
            FieldChange::Location(location) => StepPatch::One(StepOnePatch {
                location: Some(location),
                ..Default::default()
            }),
            FieldChange::Currency(currency) => StepPatch::Two(StepTwoPatch {
                reward: Some(Reward {
                    currency,
                    ..reward.clone()
                }),
                ..Default::default()
            }),
            FieldChange::Amount(amount) => StepPatch::Two(StepTwoPatch {
                reward: Some(Reward {
                    amount,
                    ..reward.clone()
                }),
                ..Default::default()
            }),
            FieldChange::Winners(winners) => StepPatch::Two(StepTwoPatch {
                reward: Some(Reward {
                    winners,
                    ..reward.clone()
                }),
                ..Default::default()
            }),
            FieldChange::ExpirationDate(expiration_date) => StepPatch::Two(StepTwoPatch {
                timeline: Some(Timeline {
                    expiration_date,
                    ..timeline.clone()
                }),
                ..Default::default()
            }),
            FieldChange::Days(days) => {
                let mut next = timeline.clone();
                next.estimated_completion.days = days;
                StepPatch::Two(StepTwoPatch {
                    timeline: Some(next),
                    ..Default::default()
                })
            }
            FieldChange::Hours(hours) => {
                let mut next = timeline.clone();
                next.estimated_completion.hours = hours;
                StepPatch::Two(StepTwoPatch {
                    timeline: Some(next),
                    ..Default::default()
                })
            }
            FieldChange::Minutes(minutes) => {
                let mut next = timeline.clone();
                next.estimated_completion.minutes = minutes;
                StepPatch::Two(StepTwoPatch {
                    timeline: Some(next),
                    ..Default::default()
                })
            }
            FieldChange::ImpactCertificate(flag) => StepPatch::Two(StepTwoPatch {
                has_impact_certificate: Some(flag),
                ..Default::default()
            }),
            FieldChange::ImpactBriefMessage(message) => StepPatch::Two(StepTwoPatch {
                impact_brief_message: Some(message),
                ..Default::default()
            }),
            FieldChange::Sdgs(sdgs) => StepPatch::Two(StepTwoPatch {
                sdgs: Some(sdgs),
                ..Default::default()
            }),
            FieldChange::FailureThreshold(threshold) => StepPatch::Two(StepTwoPatch {
                failure_threshold: Some(threshold),
                ..Default::default()
            }),
            FieldChange::HasBacker(flag) => StepPatch::Three(StepThreePatch {
                has_backer: Some(flag),
                ..Default::default()
            }),
            FieldChange::BackerName(name) => StepPatch::Three(StepThreePatch {
                backer: Some(Backer {
                    name,
                    ..backer.clone()
                }),
                ..Default::default()
            }),
            FieldChange::BackerLogo(logo) => StepPatch::Three(StepThreePatch {
                backer: Some(Backer {
                    logo,
                    ..backer.clone()
                }),
                ..Default::default()
            }),
            FieldChange::BackerMessage(message) => StepPatch::Three(StepThreePatch {
                backer: Some(Backer {
                    message,
                    ..backer.clone()
                }),
                ..Default::default()
            }),
            FieldChange::TermsAccepted(accepted) => StepPatch::Three(StepThreePatch {
                terms_accepted: Some(accepted),
                ..Default::default()
            }),
        }
    }
}

/// Parse a typed amount; anything unparseable reads as 0
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a typed count, falling back when empty or invalid
pub fn parse_count(raw: &str, fallback: u32) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(fallback)
}
