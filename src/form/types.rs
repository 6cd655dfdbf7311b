//! Step records and option sets collected by the wizard

use serde::{Deserialize, Serialize};

/// Maximum characters allowed in a bounty title
pub const TITLE_MAX_CHARS: usize = 40;

/// Maximum number of SDGs a bounty may be aligned with
pub const MAX_SDGS: usize = 4;

/// A closed set of options presented by a select widget.
///
/// `as_str` is the wire value, `label` what the user sees.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    fn all() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == value)
    }

    /// Position of this option within `all()`
    fn index(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }
}

/// Category of work the bounty asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BountyType {
    Content,
    Design,
    Development,
    Marketing,
    Other,
}

impl Choice for BountyType {
    fn all() -> &'static [BountyType] {
        &[
            BountyType::Content,
            BountyType::Design,
            BountyType::Development,
            BountyType::Marketing,
            BountyType::Other,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            BountyType::Content => "Content",
            BountyType::Design => "Design",
            BountyType::Development => "Development",
            BountyType::Marketing => "Marketing",
            BountyType::Other => "Other",
        }
    }
}

/// Impact core the bounty primarily contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DominantCore {
    Water,
    Earth,
    Social,
    Energy,
}

impl Choice for DominantCore {
    fn all() -> &'static [DominantCore] {
        &[
            DominantCore::Water,
            DominantCore::Earth,
            DominantCore::Social,
            DominantCore::Energy,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            DominantCore::Water => "Water",
            DominantCore::Earth => "Earth",
            DominantCore::Social => "Social",
            DominantCore::Energy => "Energy",
        }
    }
}

/// Where the bounty work takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Digital,
    Physical,
}

impl Choice for Mode {
    fn all() -> &'static [Mode] {
        &[Mode::Digital, Mode::Physical]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Mode::Digital => "digital",
            Mode::Physical => "physical",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Mode::Digital => "Digital",
            Mode::Physical => "Physical",
        }
    }
}

/// Currency of the reward budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Choice for Currency {
    fn all() -> &'static [Currency] {
        &[Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Currency::Inr => "INR - Indian Rupee",
            Currency::Usd => "USD - US Dollar",
            Currency::Eur => "EUR - Euro",
            Currency::Gbp => "GBP - British Pound",
        }
    }
}

/// UN Sustainable Development Goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sdg {
    #[serde(rename = "SDG1")]
    NoPoverty,
    #[serde(rename = "SDG2")]
    ZeroHunger,
    #[serde(rename = "SDG3")]
    GoodHealth,
    #[serde(rename = "SDG4")]
    QualityEducation,
    #[serde(rename = "SDG5")]
    GenderEquality,
    #[serde(rename = "SDG6")]
    CleanWater,
    #[serde(rename = "SDG7")]
    CleanEnergy,
    #[serde(rename = "SDG8")]
    DecentWork,
    #[serde(rename = "SDG9")]
    Industry,
    #[serde(rename = "SDG10")]
    ReducedInequalities,
    #[serde(rename = "SDG11")]
    SustainableCities,
    #[serde(rename = "SDG12")]
    ResponsibleConsumption,
    #[serde(rename = "SDG13")]
    ClimateAction,
    #[serde(rename = "SDG14")]
    LifeBelowWater,
    #[serde(rename = "SDG15")]
    LifeOnLand,
    #[serde(rename = "SDG16")]
    Peace,
    #[serde(rename = "SDG17")]
    Partnerships,
}

impl Choice for Sdg {
    fn all() -> &'static [Sdg] {
        &[
            Sdg::NoPoverty,
            Sdg::ZeroHunger,
            Sdg::GoodHealth,
            Sdg::QualityEducation,
            Sdg::GenderEquality,
            Sdg::CleanWater,
            Sdg::CleanEnergy,
            Sdg::DecentWork,
            Sdg::Industry,
            Sdg::ReducedInequalities,
            Sdg::SustainableCities,
            Sdg::ResponsibleConsumption,
            Sdg::ClimateAction,
            Sdg::LifeBelowWater,
            Sdg::LifeOnLand,
            Sdg::Peace,
            Sdg::Partnerships,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Sdg::NoPoverty => "SDG1",
            Sdg::ZeroHunger => "SDG2",
            Sdg::GoodHealth => "SDG3",
            Sdg::QualityEducation => "SDG4",
            Sdg::GenderEquality => "SDG5",
            Sdg::CleanWater => "SDG6",
            Sdg::CleanEnergy => "SDG7",
            Sdg::DecentWork => "SDG8",
            Sdg::Industry => "SDG9",
            Sdg::ReducedInequalities => "SDG10",
            Sdg::SustainableCities => "SDG11",
            Sdg::ResponsibleConsumption => "SDG12",
            Sdg::ClimateAction => "SDG13",
            Sdg::LifeBelowWater => "SDG14",
            Sdg::LifeOnLand => "SDG15",
            Sdg::Peace => "SDG16",
            Sdg::Partnerships => "SDG17",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Sdg::NoPoverty => "No Poverty",
            Sdg::ZeroHunger => "Zero Hunger",
            Sdg::GoodHealth => "Good Health and Well-being",
            Sdg::QualityEducation => "Quality Education",
            Sdg::GenderEquality => "Gender Equality",
            Sdg::CleanWater => "Clean Water and Sanitation",
            Sdg::CleanEnergy => "Affordable and Clean Energy",
            Sdg::DecentWork => "Decent Work and Economic Growth",
            Sdg::Industry => "Industry, Innovation and Infrastructure",
            Sdg::ReducedInequalities => "Reduced Inequalities",
            Sdg::SustainableCities => "Sustainable Cities and Communities",
            Sdg::ResponsibleConsumption => "Responsible Consumption and Production",
            Sdg::ClimateAction => "Climate Action",
            Sdg::LifeBelowWater => "Life Below Water",
            Sdg::LifeOnLand => "Life on Land",
            Sdg::Peace => "Peace, Justice and Strong Institutions",
            Sdg::Partnerships => "Partnerships for the Goals",
        }
    }
}

/// Serde adapter for optional choices.
///
/// Unset values travel as `""`; the select placeholders read back as unset.
pub(crate) mod choice_or_placeholder {
    use super::Choice;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const PLACEHOLDERS: &[&str] = &["Choose Option", "Choose Category", "Choose Core"];

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Choice,
    {
        serializer.serialize_str(value.map_or("", |v| v.as_str()))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Choice,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) if PLACEHOLDERS.contains(&value) => Ok(None),
            Some(value) => T::parse(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unknown option `{value}`"))),
        }
    }
}

/// Basic details (step 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepOne {
    pub title: String,
    pub description: String,
    /// Falls back to `title` when compiled
    #[serde(rename = "projectTitle")]
    pub project_title: String,
    #[serde(rename = "type", with = "choice_or_placeholder")]
    pub bounty_type: Option<BountyType>,
    #[serde(with = "choice_or_placeholder")]
    pub dominant_core: Option<DominantCore>,
    #[serde(with = "choice_or_placeholder")]
    pub mode: Option<Mode>,
    /// Only meaningful for physical bounties
    pub location: String,
}

impl Default for StepOne {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project_title: String::new(),
            bounty_type: None,
            dominant_core: None,
            mode: Some(Mode::Digital),
            location: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    #[serde(with = "choice_or_placeholder")]
    pub currency: Option<Currency>,
    pub amount: f64,
    pub winners: u32,
}

impl Default for Reward {
    fn default() -> Self {
        Self {
            currency: Some(Currency::Usd),
            amount: 0.0,
            winners: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatedCompletion {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Date as entered, `YYYY-MM-DD`
    pub expiration_date: String,
    pub estimated_completion: EstimatedCompletion,
}

/// Rewards, timeline and impact (step 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepTwo {
    pub reward: Reward,
    pub timeline: Timeline,
    #[serde(rename = "hasImpactCertificate")]
    pub has_impact_certificate: bool,
    #[serde(rename = "impactBriefMessage")]
    pub impact_brief_message: String,
    pub sdgs: Vec<Sdg>,
    #[serde(rename = "failureThreshold")]
    pub failure_threshold: u32,
}

impl Default for StepTwo {
    fn default() -> Self {
        Self {
            reward: Reward::default(),
            timeline: Timeline::default(),
            has_impact_certificate: false,
            impact_brief_message: String::new(),
            sdgs: Vec::new(),
            failure_threshold: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backer {
    pub name: String,
    /// `data:` URI of the uploaded logo
    pub logo: String,
    pub message: String,
}

/// Backer information and terms (step 3)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepThree {
    pub has_backer: bool,
    pub backer: Backer,
    pub terms_accepted: bool,
}

/// Everything collected during one wizard session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub step1: StepOne,
    pub step2: StepTwo,
    pub step3: StepThree,
}

/// Whether replacing the SDG selection with `next` keeps it within bounds.
///
/// Applied by the input layer before merging; validators only require one.
pub fn sdg_selection_allowed(next: &[Sdg]) -> bool {
    next.len() <= MAX_SDGS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let state = FormState::default();
        assert_eq!(state.step1.mode, Some(Mode::Digital));
        assert_eq!(state.step1.bounty_type, None);
        assert_eq!(state.step2.reward.currency, Some(Currency::Usd));
        assert_eq!(state.step2.reward.winners, 1);
        assert_eq!(state.step2.failure_threshold, 5);
        assert!(state.step2.sdgs.is_empty());
        assert!(!state.step3.has_backer);
        assert!(!state.step3.terms_accepted);
    }

    #[test]
    fn test_placeholders_deserialize_as_unset() {
        let json = r#"{"title":"x","type":"Choose Option","dominant_core":"Choose Core","mode":""}"#;
        let step: StepOne = serde_json::from_str(json).unwrap();
        assert_eq!(step.bounty_type, None);
        assert_eq!(step.dominant_core, None);
        assert_eq!(step.mode, None);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let json = r#"{"type":"Gardening"}"#;
        let err = serde_json::from_str::<StepOne>(json).unwrap_err();
        assert!(err.to_string().contains("Gardening"));
    }

    #[test]
    fn test_wire_names() {
        let mut state = FormState::default();
        state.step1.bounty_type = Some(BountyType::Design);
        state.step2.sdgs = vec![Sdg::ClimateAction];

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["step1"]["type"], "Design");
        assert_eq!(value["step1"]["mode"], "digital");
        assert_eq!(value["step1"]["dominant_core"], "");
        assert_eq!(value["step2"]["reward"]["currency"], "USD");
        assert_eq!(value["step2"]["sdgs"][0], "SDG13");
        assert_eq!(value["step2"]["failureThreshold"], 5);
        assert_eq!(value["step3"]["terms_accepted"], false);
    }

    #[test]
    fn test_choice_parse_and_labels() {
        assert_eq!(Sdg::parse("SDG7"), Some(Sdg::CleanEnergy));
        assert_eq!(Sdg::parse("SDG18"), None);
        assert_eq!(Sdg::all().len(), 17);
        assert_eq!(Currency::Gbp.label(), "GBP - British Pound");
        assert_eq!(Mode::Physical.index(), 1);
    }

    #[test]
    fn test_sdg_selection_guard() {
        let four = &Sdg::all()[..4];
        let five = &Sdg::all()[..5];
        assert!(sdg_selection_allowed(&[]));
        assert!(sdg_selection_allowed(four));
        assert!(!sdg_selection_allowed(five));
    }
}
