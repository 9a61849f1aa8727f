//! Headless App Flow Tests
//!
//! Drive the whole page through terminal events and a `TestBackend`:
//! tabs, tip cards, the mascot, the secret code and quitting.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use workshop_core::{MoodState, WorkshopConfig};
use workshop_tui::app::Tab;
use workshop_tui::reference::TIP_CARDS;
use workshop_tui::App;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 40;

const GUIDE: &str = "# Welcome\n\nHello workshop.\n\n## Setup\n\n- install\n- run\n";

// ============================================================================
// Helpers
// ============================================================================

fn app() -> App {
    App::new(&WorkshopConfig::default(), GUIDE, (WIDTH, HEIGHT))
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap()
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn click(app: &mut App, column: u16, row: u16) {
    app.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn secret_code(app: &mut App) {
    for code in [
        KeyCode::Up,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Char('b'),
        KeyCode::Char('a'),
    ] {
        press(app, code);
    }
}

// ============================================================================
// Page
// ============================================================================

#[test]
fn test_first_frame_shows_header_and_guide() {
    let mut app = app();
    let mut terminal = terminal();
    app.render(&mut terminal).unwrap();

    let text = screen(&terminal);
    assert!(text.contains("OpenCode Workshop"));
    assert!(text.contains("Learn to vibe code with AI using your Microsoft license"));
    assert!(text.contains("Workshop Guide"));
    assert!(text.contains("Quick Reference"));
    assert!(text.contains("Welcome"));
    assert!(text.contains("shh..."));
}

#[test]
fn test_tab_keys_switch_tabs() {
    let mut app = app();
    assert_eq!(app.tab(), Tab::Guide);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.tab(), Tab::Reference);
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.tab(), Tab::Guide);
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.tab(), Tab::Reference);
}

#[test]
fn test_clicking_tab_label_switches_tab() {
    let mut app = app();
    let mut terminal = terminal();
    app.render(&mut terminal).unwrap();

    let text = screen(&terminal);
    let row = text.lines().position(|l| l.contains("Quick Reference")).unwrap() as u16;
    let line = text.lines().nth(row as usize).unwrap();
    let column = line.chars().take_while(|c| *c != 'Q').count() as u16;

    click(&mut app, column, row);
    assert_eq!(app.tab(), Tab::Reference);

    app.render(&mut terminal).unwrap();
    assert!(screen(&terminal).contains("Git Basics"));
}

// ============================================================================
// Quick Reference
// ============================================================================

#[test]
fn test_enter_opens_card_and_fires_confetti() {
    let mut app = app();
    let mut terminal = terminal();
    press(&mut app, KeyCode::Char('2'));
    app.render(&mut terminal).unwrap();

    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.reference().selected(), Some(1));
    assert_eq!(app.confetti().bursts_fired(), 1);
    assert_eq!(app.confetti().particle_count(), 30);

    app.render(&mut terminal).unwrap();
    let first_tip = TIP_CARDS[1].tips[0].title;
    assert!(screen(&terminal).contains(first_tip));
}

#[test]
fn test_clicking_card_selects_it() {
    let mut app = app();
    let mut terminal = terminal();
    press(&mut app, KeyCode::Char('2'));
    app.render(&mut terminal).unwrap();

    let text = screen(&terminal);
    let row = text.lines().position(|l| l.contains("Git Basics")).unwrap() as u16;
    let line = text.lines().nth(row as usize).unwrap();
    let column = line.chars().take_while(|c| *c != 'G').count() as u16;

    click(&mut app, column, row);
    assert_eq!(app.reference().selected(), Some(0));
    assert_eq!(app.confetti().bursts_fired(), 1);
}

#[test]
fn test_esc_closes_card_before_quitting() {
    let mut app = app();
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Enter);
    assert!(app.reference().selected().is_some());

    press(&mut app, KeyCode::Esc);
    assert!(app.reference().selected().is_none());
    assert!(app.is_running());

    press(&mut app, KeyCode::Esc);
    assert!(!app.is_running());
}

#[test]
fn test_disabled_confetti_still_selects_card() {
    let mut config = WorkshopConfig::default();
    config.confetti = false;
    let mut app = App::new(&config, GUIDE, (WIDTH, HEIGHT));
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char(' '));

    assert_eq!(app.reference().selected(), Some(0));
    assert_eq!(app.confetti().bursts_fired(), 0);
}

// ============================================================================
// Mascot
// ============================================================================

#[test]
fn test_p_pets_the_mascot() {
    let mut app = app();
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.mascot().view().mood, MoodState::Happy);

    app.update(Duration::from_millis(5000));
    assert_eq!(app.mascot().view().mood, MoodState::Idle);
}

#[test]
fn test_five_pets_do_a_trick() {
    let mut app = app();
    for _ in 0..5 {
        press(&mut app, KeyCode::Char('p'));
    }

    assert_eq!(app.mascot().view().mood, MoodState::Excited);
    assert_eq!(app.mascot().mood().click_count(), 0);
    assert_eq!(app.confetti().bursts_fired(), 1);
}

#[test]
fn test_mouse_on_mascot_hovers_and_clicks() {
    let mut app = app();
    let bounds = app.mascot_bounds().unwrap();

    app.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: bounds.x + 1,
        row: bounds.y + 1,
        modifiers: KeyModifiers::NONE,
    }));
    assert!(app.avatar().is_hovered());

    click(&mut app, bounds.x + 1, bounds.y + 1);
    assert_eq!(app.mascot().view().mood, MoodState::Happy);

    // Bottom row of the mascot is the speech toggle
    click(&mut app, bounds.x + 1, bounds.bottom() - 1);
    assert!(!app.speech());
}

#[test]
fn test_s_toggles_speech_label() {
    let mut app = app();
    let mut terminal = terminal();
    press(&mut app, KeyCode::Char('s'));
    app.render(&mut terminal).unwrap();

    assert!(!app.speech());
    assert!(screen(&terminal).contains("speak!"));
}

#[test]
fn test_m_cycles_host_mood() {
    let mut app = app();
    for expected in MoodState::ALL {
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mascot().host_mood(), Some(expected));
        assert_eq!(app.mascot().view().mood, expected);
    }

    press(&mut app, KeyCode::Char('m'));
    assert_eq!(app.mascot().host_mood(), None);
}

// ============================================================================
// Secret code
// ============================================================================

#[test]
fn test_secret_code_shows_banner_for_celebration() {
    let mut app = app();
    let mut terminal = terminal();

    secret_code(&mut app);
    assert!(app.mascot().is_celebrating());
    assert_eq!(app.mascot().view().mood, MoodState::Excited);
    assert_eq!(app.confetti().bursts_fired(), 1);

    app.render(&mut terminal).unwrap();
    assert!(app.banner_visible());
    assert!(screen(&terminal).contains("Secret code unlocked"));

    app.update(Duration::from_millis(10_000));
    app.render(&mut terminal).unwrap();
    assert!(!app.mascot().is_celebrating());
    assert!(!app.banner_visible());
}

#[test]
fn test_secret_code_again_restarts_celebration() {
    let mut app = app();
    secret_code(&mut app);
    app.update(Duration::from_millis(6_000));
    assert!(app.mascot().is_celebrating());

    // Progress sits at the end of the code, so the next key starts over
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.mascot().view().gesture_progress, 0);
    secret_code(&mut app);
    assert_eq!(app.confetti().bursts_fired(), 2);

    // The second window runs a full 10 s from the second entry
    app.update(Duration::from_millis(6_000));
    assert!(app.mascot().is_celebrating());
    assert_eq!(app.mascot().view().mood, MoodState::Excited);

    app.update(Duration::from_millis(4_000));
    assert!(!app.mascot().is_celebrating());
}

#[test]
fn test_stray_key_breaks_secret_code() {
    let mut app = app();
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.mascot().view().gesture_progress, 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_q_quits_with_goodbye() {
    let mut app = app();
    assert!(app.goodbye().is_none());

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.is_running());
    assert!(app.goodbye().is_some());
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app();
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(!app.is_running());
}

#[test]
fn test_resize_keeps_mascot_in_corner() {
    let mut app = app();
    app.handle_event(Event::Resize(60, 24));

    let bounds = app.mascot_bounds().unwrap();
    assert_eq!(bounds.right(), 59);
    assert_eq!(bounds.bottom(), 23);

    let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
    app.render(&mut terminal).unwrap();
}

#[test]
fn test_f12_toggles_dev_mode() {
    let mut app = app();
    let mut terminal = terminal();
    press(&mut app, KeyCode::F(12));
    assert!(app.dev_mode());

    app.render(&mut terminal).unwrap();
    assert!(screen(&terminal).contains("[DEV]"));
}
