//! Field catalogue: which widget edits which part of the form

use crate::form::{
    BountyType, Choice, Currency, DominantCore, Field, FormState, Mode, Sdg, Step, TITLE_MAX_CHARS,
};
use crate::ui::form_field::FormField;
use crate::wizard::{parse_amount, parse_count, FieldChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Title,
    Description,
    ProjectTitle,
    BountyType,
    DominantCore,
    Mode,
    Location,
    Currency,
    Amount,
    Winners,
    ExpirationDate,
    Days,
    Hours,
    Minutes,
    Sdgs,
    FailureThreshold,
    ImpactCertificate,
    ImpactBriefMessage,
    HasBacker,
    BackerName,
    BackerLogo,
    BackerMessage,
    TermsAccepted,
}

fn labels<T: Choice>() -> Vec<String> {
    T::all().iter().map(|c| c.label().to_string()).collect()
}

fn pick<T: Choice>(widget: &FormField) -> Option<T> {
    widget.selected_index().and_then(|i| T::all().get(i).copied())
}

/// Show a stored count, leaving zero blank so the placeholder shows
fn count_text(value: u32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn amount_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

impl FieldId {
    /// Every field owned by `step`, shown or not
    pub fn of_step(step: Step) -> &'static [FieldId] {
        match step {
            Step::One => &[
                FieldId::Title,
                FieldId::Description,
                FieldId::ProjectTitle,
                FieldId::BountyType,
                FieldId::DominantCore,
                FieldId::Mode,
                FieldId::Location,
            ],
            Step::Two => &[
                FieldId::Currency,
                FieldId::Amount,
                FieldId::Winners,
                FieldId::ExpirationDate,
                FieldId::Days,
                FieldId::Hours,
                FieldId::Minutes,
                FieldId::Sdgs,
                FieldId::FailureThreshold,
                FieldId::ImpactCertificate,
                FieldId::ImpactBriefMessage,
            ],
            Step::Three => &[
                FieldId::HasBacker,
                FieldId::BackerName,
                FieldId::BackerLogo,
                FieldId::BackerMessage,
                FieldId::TermsAccepted,
            ],
        }
    }

    /// Fields shown for `step`, in focus order
    pub fn visible(step: Step, state: &FormState) -> Vec<FieldId> {
        match step {
            Step::One => {
                let mut fields = vec![
                    FieldId::Title,
                    FieldId::Description,
                    FieldId::ProjectTitle,
                    FieldId::BountyType,
                    FieldId::DominantCore,
                    FieldId::Mode,
                ];
                if state.step1.mode == Some(Mode::Physical) {
                    fields.push(FieldId::Location);
                }
                fields
            }
            Step::Two => {
                let mut fields = vec![
                    FieldId::Currency,
                    FieldId::Amount,
                    FieldId::Winners,
                    FieldId::ExpirationDate,
                    FieldId::Days,
                    FieldId::Hours,
                    FieldId::Minutes,
                    FieldId::Sdgs,
                    FieldId::FailureThreshold,
                    FieldId::ImpactCertificate,
                ];
                if state.step2.has_impact_certificate {
                    fields.push(FieldId::ImpactBriefMessage);
                }
                fields
            }
            Step::Three => {
                let mut fields = vec![FieldId::HasBacker];
                if state.step3.has_backer {
                    fields.extend([
                        FieldId::BackerName,
                        FieldId::BackerLogo,
                        FieldId::BackerMessage,
                    ]);
                }
                fields.push(FieldId::TermsAccepted);
                fields
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Title => "Bounty Title",
            FieldId::Description => "Description",
            FieldId::ProjectTitle => "Project Title",
            FieldId::BountyType => "Bounty Type",
            FieldId::DominantCore => "Impact Core",
            FieldId::Mode => "Mode",
            FieldId::Location => "Location",
            FieldId::Currency => "What is your budget for this bounty?",
            FieldId::Amount => "Reward Amount",
            FieldId::Winners => "Number of Winners",
            FieldId::ExpirationDate => "Expiration Date",
            FieldId::Days => "Days",
            FieldId::Hours => "Hours",
            FieldId::Minutes => "Minutes",
            FieldId::Sdgs => "Sustainable Development Goals (SDGs)",
            FieldId::FailureThreshold => "Failure Threshold",
            FieldId::ImpactCertificate => "Impact Certificate",
            FieldId::ImpactBriefMessage => "Impact Brief Message",
            FieldId::HasBacker => "Backer",
            FieldId::BackerName => "Backer Name",
            FieldId::BackerLogo => "Backer Logo (path, Enter to load)",
            FieldId::BackerMessage => "Backer Message",
            FieldId::TermsAccepted => "Terms & Conditions",
        }
    }

    /// Validation key whose message is shown under this field
    pub fn error_field(&self) -> Option<Field> {
        match self {
            FieldId::Title => Some(Field::Title),
            FieldId::Description => Some(Field::Description),
            FieldId::BountyType => Some(Field::BountyType),
            FieldId::DominantCore => Some(Field::DominantCore),
            FieldId::Mode => Some(Field::Mode),
            FieldId::Location => Some(Field::Location),
            FieldId::Currency => Some(Field::Currency),
            FieldId::Amount => Some(Field::Amount),
            FieldId::Winners => Some(Field::Winners),
            FieldId::Sdgs => Some(Field::Sdgs),
            FieldId::FailureThreshold => Some(Field::FailureThreshold),
            FieldId::ImpactBriefMessage => Some(Field::ImpactBriefMessage),
            FieldId::BackerName => Some(Field::BackerName),
            FieldId::TermsAccepted => Some(Field::TermsAccepted),
            _ => None,
        }
    }

    /// Widget initialised from the stored value
    pub fn widget(&self, state: &FormState) -> FormField {
        let step1 = &state.step1;
        let step2 = &state.step2;
        let step3 = &state.step3;
        let completion = &step2.timeline.estimated_completion;

        match self {
            FieldId::Title => FormField::text(
                &step1.title,
                "Enter a clear, concise title (max 40 characters)",
                Some(TITLE_MAX_CHARS),
            ),
            FieldId::Description => FormField::text_area(
                &step1.description,
                "Describe what you're looking for in detail...",
            ),
            FieldId::ProjectTitle => {
                FormField::text(&step1.project_title, "Defaults to the bounty title", None)
            }
            FieldId::BountyType => FormField::select(
                labels::<BountyType>(),
                step1.bounty_type.map(|c| c.index()),
                "Choose Option",
            ),
            FieldId::DominantCore => FormField::select(
                labels::<DominantCore>(),
                step1.dominant_core.map(|c| c.index()),
                "Choose Core",
            ),
            FieldId::Mode => FormField::select(
                labels::<Mode>(),
                step1.mode.map(|c| c.index()),
                "Choose Mode",
            ),
            FieldId::Location => {
                FormField::text(&step1.location, "Enter the physical location", None)
            }
            FieldId::Currency => FormField::select(
                labels::<Currency>(),
                step2.reward.currency.map(|c| c.index()),
                "Choose Currency",
            ),
            FieldId::Amount => FormField::number(&amount_text(step2.reward.amount), true, "0.00"),
            FieldId::Winners => FormField::number(&count_text(step2.reward.winners), false, "1"),
            FieldId::ExpirationDate => FormField::date(&step2.timeline.expiration_date),
            FieldId::Days => FormField::number(&count_text(completion.days), false, "0"),
            FieldId::Hours => FormField::number(&count_text(completion.hours), false, "0"),
            FieldId::Minutes => FormField::number(&count_text(completion.minutes), false, "0"),
            FieldId::Sdgs => {
                let checked: Vec<usize> = step2.sdgs.iter().map(|s| s.index()).collect();
                FormField::multi_select(labels::<Sdg>(), &checked)
            }
            FieldId::FailureThreshold => {
                FormField::number(&count_text(step2.failure_threshold), false, "0")
            }
            FieldId::ImpactCertificate => {
                FormField::toggle(step2.has_impact_certificate, "Include Impact Certificate")
            }
            FieldId::ImpactBriefMessage => FormField::text_area(
                &step2.impact_brief_message,
                "Describe the expected impact...",
            ),
            FieldId::HasBacker => FormField::toggle(step3.has_backer, "Include Backer Information"),
            FieldId::BackerName => {
                FormField::text(&step3.backer.name, "Organization or individual name", None)
            }
            FieldId::BackerLogo => FormField::text("", "path/to/logo.png", None),
            FieldId::BackerMessage => FormField::text_area(
                &step3.backer.message,
                "Optional message from the backer...",
            ),
            FieldId::TermsAccepted => FormField::toggle(
                step3.terms_accepted,
                "I agree to the terms and conditions for creating a bounty",
            ),
        }
    }

    /// Read the widget back into a change; the logo path is loaded separately
    pub fn change(&self, widget: &FormField) -> Option<FieldChange> {
        let text = widget.value();
        let change = match self {
            FieldId::Title => FieldChange::Title(text),
            FieldId::Description => FieldChange::Description(text),
            FieldId::ProjectTitle => FieldChange::ProjectTitle(text),
            FieldId::BountyType => FieldChange::BountyType(pick(widget)),
            FieldId::DominantCore => FieldChange::DominantCore(pick(widget)),
            FieldId::Mode => FieldChange::Mode(pick(widget)),
            FieldId::Location => FieldChange::Location(text),
            FieldId::Currency => FieldChange::Currency(pick(widget)),
            FieldId::Amount => FieldChange::Amount(parse_amount(&text)),
            FieldId::Winners => FieldChange::Winners(parse_count(&text, 1)),
            FieldId::ExpirationDate => FieldChange::ExpirationDate(text),
            FieldId::Days => FieldChange::Days(parse_count(&text, 0)),
            FieldId::Hours => FieldChange::Hours(parse_count(&text, 0)),
            FieldId::Minutes => FieldChange::Minutes(parse_count(&text, 0)),
            FieldId::Sdgs => FieldChange::Sdgs(
                widget
                    .checked_indices()
                    .into_iter()
                    .filter_map(|i| Sdg::all().get(i).copied())
                    .collect(),
            ),
            FieldId::FailureThreshold => FieldChange::FailureThreshold(parse_count(&text, 0)),
            FieldId::ImpactCertificate => FieldChange::ImpactCertificate(widget.is_on()),
            FieldId::ImpactBriefMessage => FieldChange::ImpactBriefMessage(text),
            FieldId::HasBacker => FieldChange::HasBacker(widget.is_on()),
            FieldId::BackerName => FieldChange::BackerName(text),
            FieldId::BackerLogo => return None,
            FieldId::BackerMessage => FieldChange::BackerMessage(text),
            FieldId::TermsAccepted => FieldChange::TermsAccepted(widget.is_on()),
        };
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::form_field::plain;
    use crossterm::event::KeyCode;

    #[test]
    fn test_location_only_for_physical() {
        let mut state = FormState::default();
        assert!(!FieldId::visible(Step::One, &state).contains(&FieldId::Location));
        state.step1.mode = Some(Mode::Physical);
        assert!(FieldId::visible(Step::One, &state).contains(&FieldId::Location));
    }

    #[test]
    fn test_backer_fields_follow_toggle() {
        let mut state = FormState::default();
        assert_eq!(
            FieldId::visible(Step::Three, &state),
            vec![FieldId::HasBacker, FieldId::TermsAccepted]
        );
        state.step3.has_backer = true;
        assert_eq!(FieldId::visible(Step::Three, &state).len(), 5);
    }

    #[test]
    fn test_select_reads_back_choice() {
        let state = FormState::default();
        let mut widget = FieldId::DominantCore.widget(&state);
        assert_eq!(
            FieldId::DominantCore.change(&widget),
            Some(FieldChange::DominantCore(None))
        );
        widget.handle_key(plain(KeyCode::Right));
        assert_eq!(
            FieldId::DominantCore.change(&widget),
            Some(FieldChange::DominantCore(Some(DominantCore::Water)))
        );
    }

    #[test]
    fn test_defaults_prefill_widgets() {
        let state = FormState::default();
        assert_eq!(FieldId::Winners.widget(&state).value(), "1");
        assert_eq!(FieldId::Amount.widget(&state).value(), "");
        assert_eq!(
            FieldId::Currency.widget(&state).selected_index(),
            Some(Currency::Usd.index())
        );
    }

    #[test]
    fn test_empty_winners_falls_back_to_one() {
        let widget = FormField::number("", false, "1");
        assert_eq!(
            FieldId::Winners.change(&widget),
            Some(FieldChange::Winners(1))
        );
        assert_eq!(FieldId::Days.change(&widget), Some(FieldChange::Days(0)));
    }

    #[test]
    fn test_sdg_widget_maps_to_goals() {
        let mut state = FormState::default();
        state.step2.sdgs = vec![Sdg::ClimateAction];
        let widget = FieldId::Sdgs.widget(&state);
        assert_eq!(
            FieldId::Sdgs.change(&widget),
            Some(FieldChange::Sdgs(vec![Sdg::ClimateAction]))
        );
    }

    #[test]
    fn test_logo_is_not_a_typed_change() {
        let widget = FieldId::BackerLogo.widget(&FormState::default());
        assert_eq!(FieldId::BackerLogo.change(&widget), None);
    }
}
