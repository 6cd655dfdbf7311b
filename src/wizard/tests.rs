//! Tests for the wizard controllers

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::*;
use crate::form::{BountyType, Choice, Currency, DominantCore, Mode, Sdg};

fn timings() -> SubmissionTimings {
    SubmissionTimings {
        delay: Duration::from_millis(1500),
        redirect: Duration::from_millis(2000),
    }
}

fn fill_step_one(wizard: &mut Wizard) {
    wizard.apply(FieldChange::Title("Fix bug".to_string()));
    wizard.apply(FieldChange::Description("desc".to_string()));
    wizard.apply(FieldChange::BountyType(Some(BountyType::Development)));
    wizard.apply(FieldChange::DominantCore(Some(DominantCore::Energy)));
    wizard.apply(FieldChange::Mode(Some(Mode::Digital)));
}

fn fill_step_two(wizard: &mut Wizard) {
    wizard.apply(FieldChange::Currency(Some(Currency::Usd)));
    wizard.apply(FieldChange::Amount(100.0));
    wizard.apply(FieldChange::Winners(2));
    wizard.apply(FieldChange::Sdgs(vec![Sdg::NoPoverty]));
}

/// A wizard sitting on step 3 with steps 1 and 2 complete
fn wizard_on_step_three(now: Instant) -> Wizard {
    let mut wizard = Wizard::new(timings());
    fill_step_one(&mut wizard);
    assert_eq!(wizard.next(now), NextOutcome::Advanced(Step::Two));
    fill_step_two(&mut wizard);
    assert_eq!(wizard.next(now), NextOutcome::Advanced(Step::Three));
    wizard
}

#[test]
fn test_session_starts_on_step_one() {
    let wizard = Wizard::default();
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert_eq!(wizard.state(), &FormState::default());
    assert!(wizard.payload().is_none());
}

#[test]
fn test_invalid_next_keeps_state_and_route() {
    let mut wizard = Wizard::default();
    wizard.apply(FieldChange::Title("Only a title".to_string()));
    let before = wizard.state().clone();

    assert_eq!(wizard.next(Instant::now()), NextOutcome::Invalid);
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert_eq!(wizard.state(), &before);

    let errors = wizard.errors(Step::One).unwrap();
    assert_eq!(errors.keys(), vec!["description", "type", "dominant_core"]);
}

#[test]
fn test_editing_clears_only_that_fields_error() {
    let mut wizard = Wizard::default();
    wizard.next(Instant::now());
    assert!(wizard.error_for(Step::One, Field::Title).is_some());
    assert!(wizard.error_for(Step::One, Field::Description).is_some());

    wizard.apply(FieldChange::Title("x".to_string()));
    assert!(wizard.error_for(Step::One, Field::Title).is_none());
    assert!(wizard.error_for(Step::One, Field::Description).is_some());

    // Unrelated edits leave remaining errors in place
    wizard.apply(FieldChange::ProjectTitle("p".to_string()));
    assert!(wizard.error_for(Step::One, Field::Description).is_some());
}

#[test]
fn test_clearing_error_does_not_revalidate() {
    let mut wizard = Wizard::default();
    wizard.next(Instant::now());
    // Editing the title to something still invalid clears the message anyway
    wizard.apply(FieldChange::Title(String::new()));
    assert!(wizard.error_for(Step::One, Field::Title).is_none());
}

#[test]
fn test_full_flow_to_result() {
    let start = Instant::now();
    let mut wizard = wizard_on_step_three(start);

    wizard.apply(FieldChange::TermsAccepted(true));
    assert_eq!(wizard.next(start), NextOutcome::SubmissionStarted);
    assert!(wizard.is_submitting());

    assert_eq!(wizard.tick(start + Duration::from_millis(1499)), None);
    assert_eq!(wizard.route(), Route::Step(Step::Three));

    let fired = start + Duration::from_millis(1500);
    assert_eq!(wizard.tick(fired), Some(Route::Confirmation));
    assert!(!wizard.is_submitting());

    let payload = wizard.payload().unwrap();
    assert_eq!(payload.project_title, "Fix bug");
    assert_eq!(payload.reward.winners, 2);

    assert_eq!(wizard.tick(fired + Duration::from_millis(1999)), None);
    assert_eq!(
        wizard.tick(fired + Duration::from_millis(2000)),
        Some(Route::Result)
    );
    assert_eq!(wizard.route(), Route::Result);
    assert_eq!(wizard.tick(fired + Duration::from_secs(60)), None);
}

#[test]
fn test_submit_with_terms_unaccepted() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);

    assert_eq!(wizard.submit(now), NextOutcome::Invalid);
    let errors = wizard.errors(Step::Three).unwrap();
    assert_eq!(errors.keys(), vec!["terms_accepted"]);
    assert!(!wizard.is_submitting());
}

#[test]
fn test_double_submit_is_blocked() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::TermsAccepted(true));

    assert_eq!(wizard.submit(now), NextOutcome::SubmissionStarted);
    assert_eq!(wizard.submit(now), NextOutcome::AlreadySubmitting);
    assert_eq!(
        wizard.apply(FieldChange::BackerName("late".to_string())),
        ApplyOutcome::Blocked
    );
}

#[test]
fn test_leaving_step_three_cancels_submission() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::TermsAccepted(true));
    wizard.submit(now);

    assert!(wizard.back());
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.tick(now + Duration::from_secs(10)), None);
    assert_eq!(wizard.route(), Route::Step(Step::Two));
    assert!(wizard.payload().is_none());
}

#[test]
fn test_leaving_confirmation_cancels_redirect() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::TermsAccepted(true));
    wizard.submit(now);
    wizard.tick(now + Duration::from_secs(2));
    assert_eq!(wizard.route(), Route::Confirmation);

    wizard.create_another();
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert_eq!(wizard.tick(now + Duration::from_secs(60)), None);
    assert_eq!(wizard.route(), Route::Step(Step::One));
}

#[test]
fn test_create_another_resets_everything() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::TermsAccepted(true));
    wizard.submit(now);
    wizard.tick(now + Duration::from_secs(2));
    wizard.tick(now + Duration::from_secs(5));
    assert_eq!(wizard.route(), Route::Result);

    wizard.create_another();
    assert_eq!(wizard.state(), &FormState::default());
    assert!(wizard.payload().is_none());
    assert!(wizard.errors(Step::Three).is_none());
}

#[test]
fn test_sidebar_gating() {
    let now = Instant::now();
    let mut wizard = Wizard::default();
    assert!(!wizard.go_to(Step::Three));
    assert!(!wizard.go_to(Step::Two));

    fill_step_one(&mut wizard);
    assert!(wizard.can_jump_to(Step::Two));
    assert!(!wizard.can_jump_to(Step::Three));
    assert!(wizard.go_to(Step::Two));

    // Back jumps are allowed even with step 2 incomplete
    assert!(wizard.go_to(Step::One));
    assert_eq!(wizard.route(), Route::Step(Step::One));

    wizard.next(now);
    fill_step_two(&mut wizard);
    assert!(wizard.go_to(Step::One));
    assert!(wizard.go_to(Step::Three));
}

#[test]
fn test_infinite_amount_blocks_step_two() {
    let now = Instant::now();
    let mut wizard = Wizard::new(timings());
    fill_step_one(&mut wizard);
    wizard.next(now);
    fill_step_two(&mut wizard);

    assert_eq!(parse_amount(&"9".repeat(400)), 0.0);
    wizard.apply(FieldChange::Amount(f64::INFINITY));

    assert_eq!(wizard.next(now), NextOutcome::Invalid);
    assert_eq!(
        wizard.error_for(Step::Two, Field::Amount),
        Some(&FieldError::AmountNotPositive)
    );
}

#[test]
fn test_back_from_step_one_does_nothing() {
    let mut wizard = Wizard::default();
    assert!(!wizard.back());
    assert_eq!(wizard.route(), Route::Step(Step::One));
}

#[test]
fn test_changes_for_other_steps_are_ignored() {
    let mut wizard = Wizard::default();
    assert_eq!(
        wizard.apply(FieldChange::Amount(5.0)),
        ApplyOutcome::Inactive
    );
    assert_eq!(wizard.state().step2.reward.amount, 0.0);
}

#[test]
fn test_sdg_cap_enforced_before_merge() {
    let now = Instant::now();
    let mut wizard = Wizard::default();
    fill_step_one(&mut wizard);
    wizard.next(now);

    let four = Sdg::all()[..4].to_vec();
    assert_eq!(
        wizard.apply(FieldChange::Sdgs(four.clone())),
        ApplyOutcome::Applied
    );

    let five = Sdg::all()[..5].to_vec();
    assert_eq!(wizard.apply(FieldChange::Sdgs(five)), ApplyOutcome::Rejected);
    assert_eq!(wizard.state().step2.sdgs, four);
}

#[test]
fn test_toggle_does_not_clear_dependent_error() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::HasBacker(true));
    wizard.submit(now);
    assert!(wizard.error_for(Step::Three, Field::BackerName).is_some());

    wizard.apply(FieldChange::HasBacker(false));
    assert!(wizard.error_for(Step::Three, Field::BackerName).is_some());

    wizard.apply(FieldChange::BackerName("Acme".to_string()));
    assert!(wizard.error_for(Step::Three, Field::BackerName).is_none());
}

#[test]
fn test_stale_backer_not_submitted() {
    let now = Instant::now();
    let mut wizard = wizard_on_step_three(now);
    wizard.apply(FieldChange::HasBacker(true));
    wizard.apply(FieldChange::BackerName("Acme".to_string()));
    wizard.apply(FieldChange::BackerMessage("hi".to_string()));
    wizard.apply(FieldChange::HasBacker(false));
    wizard.apply(FieldChange::TermsAccepted(true));

    wizard.submit(now);
    wizard.tick(now + Duration::from_secs(2));

    let payload = wizard.payload().unwrap();
    assert_eq!(payload.backer.name, "");
    assert_eq!(payload.backer.message, "");
    // The state still remembers what was typed
    assert_eq!(wizard.state().step3.backer.name, "Acme");
}

#[test]
fn test_subscribers_see_reset() {
    let resets = Rc::new(RefCell::new(0));
    let mut wizard = Wizard::default();

    let counter = Rc::clone(&resets);
    wizard.subscribe(move |event, _| {
        if *event == StoreEvent::Reset {
            *counter.borrow_mut() += 1;
        }
    });

    wizard.apply(FieldChange::Title("x".to_string()));
    wizard.create_another();
    assert_eq!(*resets.borrow(), 1);
}

#[test]
fn test_timings_from_config() {
    let config = SubmissionConfig {
        delay_ms: 10,
        redirect_ms: 20,
    };
    let timings = SubmissionTimings::from(&config);
    assert_eq!(timings.delay, Duration::from_millis(10));
    assert_eq!(timings.redirect, Duration::from_millis(20));
}
