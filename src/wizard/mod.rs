//! Step controllers: field edits, next/back, simulated submission
//!
//! [`Wizard`] owns the session's [`FormStore`] and [`Router`]. The rendering
//! surface reports edits as [`FieldChange`]s and drives time forward through
//! [`Wizard::tick`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::SubmissionConfig;
use crate::form::{
    can_navigate, compile, sdg_selection_allowed, Field, FieldError, FormState, FormStore,
    Payload, Step, StoreEvent, SubscriptionId, ValidationResult,
};

pub mod change;
pub mod router;

pub use change::{parse_amount, parse_count, FieldChange};
pub use router::{Route, Router};

use change::StepPatch;

#[cfg(test)]
mod tests;

/// Result of applying a field change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Merged into the store
    Applied,
    /// Refused by the input guard (more than four SDGs)
    Rejected,
    /// A submission is in flight
    Blocked,
    /// The field belongs to a step that is not on screen
    Inactive,
}

/// Result of pressing Next / Submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(Step),
    /// The current step did not validate; errors are now on display
    Invalid,
    SubmissionStarted,
    AlreadySubmitting,
    /// Not on a step screen
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    CompleteSubmission,
    ShowResult,
}

/// A single-shot deferred transition, cancelled by dropping it
#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    action: PendingAction,
}

/// Delays of the simulated submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTimings {
    /// Latency before the payload is compiled
    pub delay: Duration,
    /// How long the confirmation stays before the result view
    pub redirect: Duration,
}

impl Default for SubmissionTimings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            redirect: Duration::from_millis(2000),
        }
    }
}

impl From<&SubmissionConfig> for SubmissionTimings {
    fn from(config: &SubmissionConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            redirect: Duration::from_millis(config.redirect_ms),
        }
    }
}

/// One wizard session
#[derive(Debug)]
pub struct Wizard {
    session_id: Uuid,
    store: FormStore,
    router: Router,
    /// Errors on display, per step
    errors: BTreeMap<Step, ValidationResult>,
    pending: Option<Pending>,
    payload: Option<Payload>,
    timings: SubmissionTimings,
}

impl Wizard {
    pub fn new(timings: SubmissionTimings) -> Self {
        Self::with_state(FormState::default(), timings)
    }

    pub fn with_state(state: FormState, timings: SubmissionTimings) -> Self {
        let mut router = Router::new();
        router.open("/");

        let session_id = Uuid::new_v4();
        tracing::info!(session = %session_id, "wizard session started");

        Self {
            session_id,
            store: FormStore::with_state(state),
            router,
            errors: BTreeMap::new(),
            pending: None,
            payload: None,
            timings,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &FormState {
        self.store.state()
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn current_step(&self) -> Option<Step> {
        self.router.current().step()
    }

    /// Listen to store writes (the UI re-syncs its widgets on reset)
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &FormState) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Errors currently displayed for `step`
    pub fn errors(&self, step: Step) -> Option<&ValidationResult> {
        self.errors.get(&step).filter(|result| !result.is_valid())
    }

    pub fn error_for(&self, step: Step, field: Field) -> Option<&FieldError> {
        self.errors.get(&step).and_then(|result| result.get(field))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self.pending,
            Some(Pending {
                action: PendingAction::CompleteSubmission,
                ..
            })
        )
    }

    /// Payload compiled by the last successful submission
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Whether the sidebar may jump to `step` from the current view
    pub fn can_jump_to(&self, step: Step) -> bool {
        match self.current_step() {
            Some(current) => can_navigate(current, step, self.state()),
            None => false,
        }
    }

    /// Merge one edited value into the store and clear that field's error
    pub fn apply(&mut self, change: FieldChange) -> ApplyOutcome {
        if self.is_submitting() {
            return ApplyOutcome::Blocked;
        }

        let step = change.step();
        if self.current_step() != Some(step) {
            tracing::debug!(%step, route = %self.route(), "ignoring change for inactive step");
            return ApplyOutcome::Inactive;
        }

        if let FieldChange::Sdgs(ref sdgs) = change {
            if !sdg_selection_allowed(sdgs) {
                tracing::debug!(count = sdgs.len(), "SDG selection over the limit");
                return ApplyOutcome::Rejected;
            }
        }

        let cleared = change.clears();
        match change.into_patch(self.store.state()) {
            StepPatch::One(patch) => self.store.update_step_one(patch),
            StepPatch::Two(patch) => self.store.update_step_two(patch),
            StepPatch::Three(patch) => self.store.update_step_three(patch),
        }

        if let (Some(field), Some(errors)) = (cleared, self.errors.get_mut(&step)) {
            errors.errors.remove(&field);
        }

        ApplyOutcome::Applied
    }

    /// Validate the current step and move forward, or submit on the last step
    pub fn next(&mut self, now: Instant) -> NextOutcome {
        let Some(step) = self.current_step() else {
            return NextOutcome::Ignored;
        };
        if step.is_last() {
            return self.submit(now);
        }

        if !self.check_step(step) {
            return NextOutcome::Invalid;
        }

        match step.next() {
            Some(next) => {
                self.navigate(Route::Step(next));
                NextOutcome::Advanced(next)
            }
            None => NextOutcome::Ignored,
        }
    }

    /// Validate step 3 and start the simulated submission
    pub fn submit(&mut self, now: Instant) -> NextOutcome {
        if self.current_step() != Some(Step::Three) {
            return NextOutcome::Ignored;
        }
        if self.is_submitting() {
            return NextOutcome::AlreadySubmitting;
        }
        if !self.check_step(Step::Three) {
            return NextOutcome::Invalid;
        }

        tracing::info!(session = %self.session_id, "submitting bounty");
        self.pending = Some(Pending {
            due: now + self.timings.delay,
            action: PendingAction::CompleteSubmission,
        });
        NextOutcome::SubmissionStarted
    }

    /// Go to the previous step; always allowed from a step screen
    pub fn back(&mut self) -> bool {
        match self.current_step().and_then(|step| step.prev()) {
            Some(prev) => self.navigate(Route::Step(prev)),
            None => false,
        }
    }

    /// Sidebar jump, gated for forward moves
    pub fn go_to(&mut self, step: Step) -> bool {
        if !self.can_jump_to(step) {
            tracing::debug!(%step, route = %self.route(), "step not reachable yet");
            return false;
        }
        self.navigate(Route::Step(step))
    }

    /// Fire a due deferred transition; returns the new route if one fired
    pub fn tick(&mut self, now: Instant) -> Option<Route> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;

        match pending.action {
            PendingAction::CompleteSubmission => {
                let payload = compile(self.store.state());
                match payload.to_pretty_json() {
                    Ok(json) => {
                        tracing::info!(session = %self.session_id, payload = %json, "bounty payload");
                    }
                    Err(e) => tracing::warn!("Failed to serialize payload for logging: {}", e),
                }
                self.payload = Some(payload);
                self.navigate(Route::Confirmation);
                self.pending = Some(Pending {
                    due: now + self.timings.redirect,
                    action: PendingAction::ShowResult,
                });
                Some(Route::Confirmation)
            }
            PendingAction::ShowResult => {
                self.navigate(Route::Result);
                Some(Route::Result)
            }
        }
    }

    /// Start over: reset the store and return to step 1
    pub fn create_another(&mut self) {
        self.store.reset();
        self.errors.clear();
        self.payload = None;
        self.navigate(Route::Step(Step::One));
        tracing::info!(session = %self.session_id, "starting another bounty");
    }

    /// Validate `step`, recording its errors for display
    fn check_step(&mut self, step: Step) -> bool {
        let result = step.validate(self.store.state());
        let valid = result.is_valid();
        if !valid {
            tracing::debug!(%step, errors = ?result.keys(), "step validation failed");
        }
        self.errors.insert(step, result);
        valid
    }

    /// Change route, cancelling any transition scheduled by the view being left
    fn navigate(&mut self, route: Route) -> bool {
        if !self.router.navigate(route) {
            return false;
        }
        if self.pending.take().is_some() {
            tracing::debug!(%route, "cancelled pending transition");
        }
        tracing::debug!(%route, "navigated");
        true
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(SubmissionTimings::default())
    }
}
