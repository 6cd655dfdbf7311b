//! Tests for the wizard screen

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;

use super::*;
use crate::form::{Field, FieldError, Mode, Sdg};
use crate::ui::form_field::plain;
use crate::wizard::SubmissionTimings;

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn setup() -> (Wizard, WizardScreen) {
    let mut wizard = Wizard::new(SubmissionTimings::default());
    let screen = WizardScreen::new(&mut wizard, 1024);
    (wizard, screen)
}

fn press(screen: &mut WizardScreen, wizard: &mut Wizard, key: KeyEvent) -> ScreenResult {
    screen.handle_key(wizard, key, Instant::now())
}

fn type_text(screen: &mut WizardScreen, wizard: &mut Wizard, text: &str) {
    for c in text.chars() {
        press(screen, wizard, plain(KeyCode::Char(c)));
    }
}

fn focus_on(screen: &mut WizardScreen, wizard: &mut Wizard, id: FieldId) {
    for _ in 0..32 {
        if screen.focused_field(wizard) == Some(id) {
            return;
        }
        press(screen, wizard, plain(KeyCode::Tab));
    }
    panic!("field {:?} not reachable", id);
}

fn fill_basics(screen: &mut WizardScreen, wizard: &mut Wizard) {
    focus_on(screen, wizard, FieldId::Title);
    type_text(screen, wizard, "Fix bug");
    focus_on(screen, wizard, FieldId::Description);
    type_text(screen, wizard, "desc");
    focus_on(screen, wizard, FieldId::BountyType);
    press(screen, wizard, plain(KeyCode::Right));
    focus_on(screen, wizard, FieldId::DominantCore);
    press(screen, wizard, plain(KeyCode::Right));
}

fn render(screen: &mut WizardScreen, wizard: &Wizard) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| screen.render(f, wizard)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_typing_updates_store() {
    let (mut wizard, mut screen) = setup();
    type_text(&mut screen, &mut wizard, "Hello");
    assert_eq!(wizard.state().step1.title, "Hello");
}

#[test]
fn test_tab_cycles_visible_fields() {
    let (mut wizard, mut screen) = setup();
    let count = screen.visible_fields(&wizard).len();
    for _ in 0..count {
        press(&mut screen, &mut wizard, plain(KeyCode::Tab));
    }
    assert_eq!(screen.focused_field(&wizard), Some(FieldId::Title));

    press(&mut screen, &mut wizard, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(screen.focused_field(&wizard), Some(FieldId::Mode));
}

#[test]
fn test_physical_mode_reveals_location() {
    let (mut wizard, mut screen) = setup();
    focus_on(&mut screen, &mut wizard, FieldId::Mode);
    press(&mut screen, &mut wizard, plain(KeyCode::Right));
    assert_eq!(wizard.state().step1.mode, Some(Mode::Physical));
    focus_on(&mut screen, &mut wizard, FieldId::Location);
}

#[test]
fn test_invalid_next_shows_errors() {
    let (mut wizard, mut screen) = setup();
    press(&mut screen, &mut wizard, ctrl('n'));
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert!(screen.status.as_ref().is_some_and(|s| s.is_error));

    let text = render(&mut screen, &wizard);
    assert!(text.contains("Title is required"));
    assert!(text.contains("Type is required"));
}

#[test]
fn test_next_moves_to_rewards_with_fresh_widgets() {
    let (mut wizard, mut screen) = setup();
    fill_basics(&mut screen, &mut wizard);
    press(&mut screen, &mut wizard, ctrl('n'));

    assert_eq!(wizard.route(), Route::Step(Step::Two));
    assert_eq!(screen.focused_field(&wizard), Some(FieldId::Currency));
    assert!(screen.widgets.contains_key(&FieldId::Sdgs));
    assert!(!screen.widgets.contains_key(&FieldId::Title));
}

#[test]
fn test_partial_amount_input_survives() {
    let (mut wizard, mut screen) = setup();
    fill_basics(&mut screen, &mut wizard);
    press(&mut screen, &mut wizard, ctrl('n'));

    focus_on(&mut screen, &mut wizard, FieldId::Amount);
    type_text(&mut screen, &mut wizard, "12.");
    assert_eq!(wizard.state().step2.reward.amount, 12.0);
    assert_eq!(screen.widgets[&FieldId::Amount].value(), "12.");
    type_text(&mut screen, &mut wizard, "5");
    assert_eq!(wizard.state().step2.reward.amount, 12.5);
}

#[test]
fn test_fifth_sdg_is_refused() {
    let (mut wizard, mut screen) = setup();
    fill_basics(&mut screen, &mut wizard);
    press(&mut screen, &mut wizard, ctrl('n'));
    focus_on(&mut screen, &mut wizard, FieldId::Sdgs);

    for _ in 0..5 {
        press(&mut screen, &mut wizard, plain(KeyCode::Char(' ')));
        press(&mut screen, &mut wizard, plain(KeyCode::Down));
    }

    assert_eq!(wizard.state().step2.sdgs.len(), 4);
    assert_eq!(screen.widgets[&FieldId::Sdgs].checked_indices().len(), 4);
    assert_eq!(
        screen.status.as_ref().map(|s| s.text.as_str()),
        Some("You can select up to 4 SDGs")
    );
    assert!(!wizard.state().step2.sdgs.contains(&Sdg::GenderEquality));

    let text = render(&mut screen, &wizard);
    assert!(text.contains("0 selections remaining"));
}

#[test]
fn test_cursor_keys_keep_field_errors() {
    let (mut wizard, mut screen) = setup();
    press(&mut screen, &mut wizard, ctrl('n'));
    assert_eq!(
        wizard.error_for(Step::One, Field::Title),
        Some(&FieldError::TitleRequired)
    );

    for code in [KeyCode::Left, KeyCode::Right, KeyCode::Home, KeyCode::End, KeyCode::Backspace] {
        press(&mut screen, &mut wizard, plain(code));
    }
    assert_eq!(
        wizard.error_for(Step::One, Field::Title),
        Some(&FieldError::TitleRequired)
    );

    type_text(&mut screen, &mut wizard, "T");
    assert_eq!(wizard.error_for(Step::One, Field::Title), None);
}

#[test]
fn test_moving_through_sdgs_keeps_error() {
    let (mut wizard, mut screen) = setup();
    fill_basics(&mut screen, &mut wizard);
    press(&mut screen, &mut wizard, ctrl('n'));
    press(&mut screen, &mut wizard, ctrl('n'));
    assert_eq!(
        wizard.error_for(Step::Two, Field::Sdgs),
        Some(&FieldError::SdgsRequired)
    );

    focus_on(&mut screen, &mut wizard, FieldId::Sdgs);
    press(&mut screen, &mut wizard, plain(KeyCode::Down));
    press(&mut screen, &mut wizard, plain(KeyCode::Char('k')));
    assert_eq!(
        wizard.error_for(Step::Two, Field::Sdgs),
        Some(&FieldError::SdgsRequired)
    );
    assert!(wizard.state().step2.sdgs.is_empty());

    press(&mut screen, &mut wizard, plain(KeyCode::Char(' ')));
    assert_eq!(wizard.error_for(Step::Two, Field::Sdgs), None);
}

#[test]
fn test_sidebar_jump_is_gated() {
    let (mut wizard, mut screen) = setup();
    press(&mut screen, &mut wizard, plain(KeyCode::F(3)));
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert!(screen.status.as_ref().is_some_and(|s| s.is_error));
    assert!(render(&mut screen, &wizard).contains("Unlocked 1/3"));
}

fn to_step_three(screen: &mut WizardScreen, wizard: &mut Wizard) {
    fill_basics(screen, wizard);
    press(screen, wizard, ctrl('n'));
    focus_on(screen, wizard, FieldId::Amount);
    type_text(screen, wizard, "100");
    focus_on(screen, wizard, FieldId::Sdgs);
    press(screen, wizard, plain(KeyCode::Char(' ')));
    press(screen, wizard, ctrl('n'));
    assert_eq!(wizard.route(), Route::Step(Step::Three));
}

#[test]
fn test_logo_loading() {
    let dir = TempDir::new().unwrap();
    let logo_path = dir.path().join("logo.png");
    std::fs::write(&logo_path, b"Hello").unwrap();

    let (mut wizard, mut screen) = setup();
    to_step_three(&mut screen, &mut wizard);
    assert!(!screen.visible_fields(&wizard).contains(&FieldId::BackerLogo));

    focus_on(&mut screen, &mut wizard, FieldId::HasBacker);
    press(&mut screen, &mut wizard, plain(KeyCode::Char(' ')));
    focus_on(&mut screen, &mut wizard, FieldId::BackerLogo);
    type_text(&mut screen, &mut wizard, &logo_path.to_string_lossy());
    // Typing a path does not touch the stored logo
    assert_eq!(wizard.state().step3.backer.logo, "");

    press(&mut screen, &mut wizard, plain(KeyCode::Enter));
    assert_eq!(
        wizard.state().step3.backer.logo,
        "data:image/png;base64,SGVsbG8="
    );
    assert!(render(&mut screen, &wizard).contains("image/png (5 bytes)"));
}

#[test]
fn test_logo_errors_are_reported() {
    let (mut wizard, mut screen) = setup();
    to_step_three(&mut screen, &mut wizard);
    focus_on(&mut screen, &mut wizard, FieldId::HasBacker);
    press(&mut screen, &mut wizard, plain(KeyCode::Char(' ')));
    focus_on(&mut screen, &mut wizard, FieldId::BackerLogo);
    type_text(&mut screen, &mut wizard, "notes.txt");
    press(&mut screen, &mut wizard, plain(KeyCode::Enter));

    assert_eq!(wizard.state().step3.backer.logo, "");
    let status = screen.status.clone().unwrap();
    assert!(status.is_error);
    assert!(status.text.contains("Unsupported image type"));
}

#[test]
fn test_submission_flow_to_result_and_back() {
    let (mut wizard, mut screen) = setup();
    to_step_three(&mut screen, &mut wizard);

    focus_on(&mut screen, &mut wizard, FieldId::TermsAccepted);
    press(&mut screen, &mut wizard, plain(KeyCode::Char(' ')));

    let start = Instant::now();
    screen.handle_key(&mut wizard, ctrl('n'), start);
    assert!(wizard.is_submitting());
    assert!(render(&mut screen, &wizard).contains("Creating your bounty..."));

    let fired = wizard.tick(start + Duration::from_millis(1500));
    screen.on_tick(&wizard, fired);
    assert!(render(&mut screen, &wizard).contains("Bounty Created Successfully!"));

    let fired = wizard.tick(start + Duration::from_millis(3500));
    screen.on_tick(&wizard, fired);
    let text = render(&mut screen, &wizard);
    assert!(text.contains("Generated Payload"));
    assert!(text.contains("\"projectTitle\": \"Fix bug\""));

    press(&mut screen, &mut wizard, plain(KeyCode::Char('n')));
    assert_eq!(wizard.route(), Route::Step(Step::One));
    assert_eq!(screen.widgets[&FieldId::Title].value(), "");
}

#[test]
fn test_quit_keys() {
    let (mut wizard, mut screen) = setup();
    assert_eq!(
        press(&mut screen, &mut wizard, plain(KeyCode::Esc)),
        ScreenResult::Quit
    );
    assert_eq!(
        press(&mut screen, &mut wizard, plain(KeyCode::Char('q'))),
        ScreenResult::Continue
    );
}
