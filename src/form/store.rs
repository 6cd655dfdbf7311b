//! Session-owned store for the three step records

use super::types::{
    Backer, BountyType, DominantCore, FormState, Mode, Reward, Sdg, StepOne, StepThree, StepTwo,
    Timeline,
};

/// Partial update for step 1. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOnePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_title: Option<String>,
    pub bounty_type: Option<Option<BountyType>>,
    pub dominant_core: Option<Option<DominantCore>>,
    pub mode: Option<Option<Mode>>,
    pub location: Option<String>,
}

impl StepOnePatch {
    fn merge_into(self, step: &mut StepOne) {
        if let Some(title) = self.title {
            step.title = title;
        }
        if let Some(description) = self.description {
            step.description = description;
        }
        if let Some(project_title) = self.project_title {
            step.project_title = project_title;
        }
        if let Some(bounty_type) = self.bounty_type {
            step.bounty_type = bounty_type;
        }
        if let Some(dominant_core) = self.dominant_core {
            step.dominant_core = dominant_core;
        }
        if let Some(mode) = self.mode {
            step.mode = mode;
        }
        if let Some(location) = self.location {
            step.location = location;
        }
    }
}

/// Partial update for step 2.
///
/// `reward` and `timeline` replace the nested record wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTwoPatch {
    pub reward: Option<Reward>,
    pub timeline: Option<Timeline>,
    pub has_impact_certificate: Option<bool>,
    pub impact_brief_message: Option<String>,
    pub sdgs: Option<Vec<Sdg>>,
    pub failure_threshold: Option<u32>,
}

impl StepTwoPatch {
    fn merge_into(self, step: &mut StepTwo) {
        if let Some(reward) = self.reward {
            step.reward = reward;
        }
        if let Some(timeline) = self.timeline {
            step.timeline = timeline;
        }
        if let Some(flag) = self.has_impact_certificate {
            step.has_impact_certificate = flag;
        }
        if let Some(message) = self.impact_brief_message {
            step.impact_brief_message = message;
        }
        if let Some(sdgs) = self.sdgs {
            step.sdgs = sdgs;
        }
        if let Some(threshold) = self.failure_threshold {
            step.failure_threshold = threshold;
        }
    }
}

/// Partial update for step 3. `backer` replaces the nested record wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepThreePatch {
    pub has_backer: Option<bool>,
    pub backer: Option<Backer>,
    pub terms_accepted: Option<bool>,
}

impl StepThreePatch {
    fn merge_into(self, step: &mut StepThree) {
        if let Some(flag) = self.has_backer {
            step.has_backer = flag;
        }
        if let Some(backer) = self.backer {
            step.backer = backer;
        }
        if let Some(accepted) = self.terms_accepted {
            step.terms_accepted = accepted;
        }
    }
}

/// What changed in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    StepOneUpdated,
    StepTwoUpdated,
    StepThreeUpdated,
    Reset,
}

/// Handle returned by [`FormStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent, &FormState)>;

/// Owner of the wizard's [`FormState`].
///
/// All writes go through whole-step merges; listeners run synchronously
/// before the write returns.
pub struct FormStore {
    state: FormState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_state(FormState::default())
    }

    /// Start from an existing snapshot (drafts loaded by the CLI)
    pub fn with_state(state: FormState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn update_step_one(&mut self, patch: StepOnePatch) {
        patch.merge_into(&mut self.state.step1);
        self.notify(StoreEvent::StepOneUpdated);
    }

    pub fn update_step_two(&mut self, patch: StepTwoPatch) {
        patch.merge_into(&mut self.state.step2);
        self.notify(StoreEvent::StepTwoUpdated);
    }

    pub fn update_step_three(&mut self, patch: StepThreePatch) {
        patch.merge_into(&mut self.state.step3);
        self.notify(StoreEvent::StepThreeUpdated);
    }

    /// Restore the default snapshot
    pub fn reset(&mut self) {
        self.state = FormState::default();
        tracing::debug!("form state reset to defaults");
        self.notify(StoreEvent::Reset);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &FormState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event, &self.state);
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
