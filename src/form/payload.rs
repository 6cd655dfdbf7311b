//! Compiles the step records into the submission payload

use serde::{Deserialize, Serialize, Serializer};

use super::types::{Choice, EstimatedCompletion, FormState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadReward {
    pub currency: String,
    #[serde(serialize_with = "whole_as_integer")]
    pub amount: f64,
    pub winners: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadTimeline {
    pub expiration_date: String,
    pub estimated_completion: EstimatedCompletion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadBacker {
    pub name: String,
    pub logo: String,
    pub message: String,
}

/// Largest magnitude where every integer is exact in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole amounts go out as `100`, not `100.0`
fn whole_as_integer<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// The normalized record produced for submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub title: String,
    pub description: String,
    #[serde(rename = "projectTitle")]
    pub project_title: String,
    #[serde(rename = "type")]
    pub bounty_type: String,
    pub dominant_core: String,
    pub mode: String,
    pub location: String,
    pub reward: PayloadReward,
    pub timeline: PayloadTimeline,
    pub sdgs: Vec<String>,
    #[serde(rename = "hasImpactCertificate")]
    pub has_impact_certificate: bool,
    #[serde(rename = "impactBriefMessage")]
    pub impact_brief_message: String,
    pub has_backer: bool,
    pub backer: PayloadBacker,
    pub terms_accepted: bool,
}

fn choice_str<T: Choice>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.as_str().to_string())
}

/// Build the payload from `state`.
///
/// Does not validate; callers gate submission on step validity first.
pub fn compile(state: &FormState) -> Payload {
    let step1 = &state.step1;
    let step2 = &state.step2;
    let step3 = &state.step3;

    let project_title = if step1.project_title.is_empty() {
        step1.title.clone()
    } else {
        step1.project_title.clone()
    };

    // Stale backer values survive in state when the toggle is off; never emit them
    let backer = if step3.has_backer {
        PayloadBacker {
            name: step3.backer.name.clone(),
            logo: step3.backer.logo.clone(),
            message: step3.backer.message.clone(),
        }
    } else {
        PayloadBacker::default()
    };

    Payload {
        title: step1.title.clone(),
        description: step1.description.clone(),
        project_title,
        bounty_type: choice_str(step1.bounty_type),
        dominant_core: choice_str(step1.dominant_core),
        mode: choice_str(step1.mode),
        location: step1.location.clone(),
        reward: PayloadReward {
            currency: choice_str(step2.reward.currency),
            amount: step2.reward.amount,
            winners: step2.reward.winners,
        },
        timeline: PayloadTimeline {
            expiration_date: step2.timeline.expiration_date.clone(),
            estimated_completion: step2.timeline.estimated_completion,
        },
        sdgs: step2.sdgs.iter().map(|s| s.as_str().to_string()).collect(),
        has_impact_certificate: step2.has_impact_certificate,
        impact_brief_message: step2.impact_brief_message.clone(),
        has_backer: step3.has_backer,
        backer,
        terms_accepted: step3.terms_accepted,
    }
}

/// Headline figures shown alongside a compiled payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSummary {
    pub winners: u32,
    pub currency: String,
    pub amount: f64,
    pub sdg_count: usize,
}

impl Payload {
    pub fn summary(&self) -> PayloadSummary {
        PayloadSummary {
            winners: self.reward.winners,
            currency: self.reward.currency.clone(),
            amount: self.reward.amount,
            sdg_count: self.sdgs.len(),
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::types::{
        Backer, BountyType, Currency, DominantCore, Mode, Reward, Sdg, StepOne, StepThree,
        StepTwo,
    };

    fn full_state() -> FormState {
        FormState {
            step1: StepOne {
                title: "Fix bug".to_string(),
                description: "desc".to_string(),
                bounty_type: Some(BountyType::Development),
                dominant_core: Some(DominantCore::Energy),
                mode: Some(Mode::Digital),
                ..Default::default()
            },
            step2: StepTwo {
                reward: Reward {
                    currency: Some(Currency::Usd),
                    amount: 100.0,
                    winners: 2,
                },
                sdgs: vec![Sdg::NoPoverty, Sdg::ClimateAction],
                ..Default::default()
            },
            step3: StepThree {
                has_backer: false,
                backer: Backer {
                    name: "Stale Co".to_string(),
                    logo: "data:image/png;base64,AAAA".to_string(),
                    message: "left over".to_string(),
                },
                terms_accepted: true,
            },
        }
    }

    #[test]
    fn test_exact_key_set() {
        let value = serde_json::to_value(compile(&full_state())).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "backer",
                "description",
                "dominant_core",
                "hasImpactCertificate",
                "has_backer",
                "impactBriefMessage",
                "location",
                "mode",
                "projectTitle",
                "reward",
                "sdgs",
                "terms_accepted",
                "timeline",
                "title",
                "type",
            ]
        );
        assert_eq!(value["timeline"]["estimated_completion"]["days"], 0);
        assert_eq!(value["reward"]["currency"], "USD");
        assert_eq!(value["sdgs"], serde_json::json!(["SDG1", "SDG13"]));
    }

    #[test]
    fn test_whole_amounts_serialize_as_integers() {
        let mut state = full_state();
        state.step2.reward.amount = 100.0;
        let json = serde_json::to_string(&compile(&state).reward).unwrap();
        assert_eq!(json, r#"{"currency":"USD","amount":100,"winners":2}"#);

        state.step2.reward.amount = 12.5;
        let value = serde_json::to_value(compile(&state)).unwrap();
        assert_eq!(value["reward"]["amount"], 12.5);

        let back: Payload = serde_json::from_str(&compile(&state).to_pretty_json().unwrap()).unwrap();
        assert_eq!(back.reward.amount, 12.5);
    }

    #[test]
    fn test_project_title_falls_back_to_title() {
        let mut state = full_state();
        state.step1.title = "Foo".to_string();
        assert_eq!(compile(&state).project_title, "Foo");

        state.step1.project_title = "Bar".to_string();
        assert_eq!(compile(&state).project_title, "Bar");
    }

    #[test]
    fn test_backer_blanked_without_flag() {
        let payload = compile(&full_state());
        assert!(!payload.has_backer);
        assert_eq!(payload.backer, PayloadBacker::default());
    }

    #[test]
    fn test_backer_carried_with_flag() {
        let mut state = full_state();
        state.step3.has_backer = true;
        let payload = compile(&state);
        assert_eq!(payload.backer.name, "Stale Co");
        assert_eq!(payload.backer.logo, "data:image/png;base64,AAAA");
        assert_eq!(payload.backer.message, "left over");
    }

    #[test]
    fn test_impact_message_carried_verbatim_without_certificate() {
        let mut state = full_state();
        state.step2.has_impact_certificate = false;
        state.step2.impact_brief_message = "draft text".to_string();
        let payload = compile(&state);
        assert!(!payload.has_impact_certificate);
        assert_eq!(payload.impact_brief_message, "draft text");
    }

    #[test]
    fn test_compile_is_idempotent() {
        let state = full_state();
        assert_eq!(compile(&state), compile(&state));
    }

    #[test]
    fn test_unset_choices_compile_to_empty_strings() {
        let payload = compile(&FormState {
            step1: StepOne {
                mode: None,
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(payload.bounty_type, "");
        assert_eq!(payload.dominant_core, "");
        assert_eq!(payload.mode, "");
    }

    #[test]
    fn test_summary() {
        let summary = compile(&full_state()).summary();
        assert_eq!(summary.winners, 2);
        assert_eq!(summary.currency, "USD");
        assert_eq!(summary.amount, 100.0);
        assert_eq!(summary.sdg_count, 2);
    }
}
