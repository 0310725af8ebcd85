// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ScreenState mutations (typing, cursor
// movement, overlays).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use inspiroo_core::catalog::NEXT_STEPS;
use inspiroo_core::identity::SignupStep;
use inspiroo_core::protocol::UserCommand;
use inspiroo_core::view::Phase;

use super::{Focus, Overlay, ScreenState};

/// Rows moved by PageUp/PageDown in the result view.
const PAGE_SIZE: u16 = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    // crossterm on Windows also emits Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if ctrl && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    match state.overlay.take() {
        Some(Overlay::ConfirmQuit) => return handle_confirm_quit(key_event, state),
        Some(Overlay::SignUp(draft)) => {
            state.overlay = Some(Overlay::SignUp(draft));
            return handle_sign_up(key_event, state);
        }
        Some(Overlay::Profile) => return handle_profile(key_event, state),
        None => {}
    }

    if ctrl && key_event.code == KeyCode::Char('p') {
        if state.is_signed_in() {
            state.overlay = Some(Overlay::Profile);
        } else {
            state.open_sign_up();
        }
        return None;
    }

    match key_event.code {
        KeyCode::Esc => {
            state.overlay = Some(Overlay::ConfirmQuit);
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = match state.focus {
                Focus::Main => Focus::Community,
                Focus::Community => Focus::Main,
            };
            None
        }
        _ => match state.focus {
            Focus::Main => handle_main(key_event, state),
            Focus::Community => handle_community(key_event, state),
        },
    }
}

// ---------------------------------------------------------------------------
// Main panel
// ---------------------------------------------------------------------------

fn handle_main(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    match state.phase() {
        Phase::Idle => handle_idea_input(key_event, state),
        Phase::Thinking => None,
        Phase::Result => handle_result(key_event, state),
        Phase::Error => match key_event.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(UserCommand::Reset),
            _ => None,
        },
    }
}

fn handle_idea_input(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => Some(UserCommand::Submit {
            idea: state.idea_text.clone(),
            mode: state.mode,
        }),
        KeyCode::Up => {
            state.mode = state.mode.prev();
            None
        }
        KeyCode::Down => {
            state.mode = state.mode.next();
            None
        }
        KeyCode::Backspace => {
            state.idea_text.pop();
            None
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            state.idea_text.push(c);
            None
        }
        _ => None,
    }
}

fn handle_result(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected_step = state.selected_step.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected_step = (state.selected_step + 1).min(NEXT_STEPS.len() - 1);
            None
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(UserCommand::ToggleStep(state.selected_step)),
        KeyCode::PageUp => {
            state.result_scroll = state.result_scroll.saturating_sub(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            state.result_scroll = state.result_scroll.saturating_add(PAGE_SIZE);
            None
        }
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UserCommand::SaveSpark),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UserCommand::Reset),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Community panel
// ---------------------------------------------------------------------------

fn handle_community(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    let count = state.snapshot.sparks.len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected_spark = state.selected_spark.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                state.selected_spark = (state.selected_spark + 1).min(count - 1);
            }
            None
        }
        KeyCode::Char('l') | KeyCode::Char('L') => selected_spark_id(state).map(UserCommand::ToggleLike),
        KeyCode::Char('c') | KeyCode::Char('C') => selected_spark_id(state).map(UserCommand::Connect),
        _ => None,
    }
}

fn selected_spark_id(state: &ScreenState) -> Option<String> {
    state
        .snapshot
        .sparks
        .get(state.selected_spark)
        .map(|spark| spark.id.clone())
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels
/// - everything else keeps the dialog open
fn handle_confirm_quit(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => None,
        _ => {
            state.overlay = Some(Overlay::ConfirmQuit);
            None
        }
    }
}

fn handle_profile(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('o') | KeyCode::Char('O') => Some(UserCommand::SignOut),
        KeyCode::Esc | KeyCode::Enter => None,
        KeyCode::Char('p') if key_event.modifiers.contains(KeyModifiers::CONTROL) => None,
        _ => {
            state.overlay = Some(Overlay::Profile);
            None
        }
    }
}

/// Two-step sign-up wizard. The identity step takes the codename and spirit
/// partner; the avatar step picks a style and seed, then submits.
fn handle_sign_up(key_event: KeyEvent, state: &mut ScreenState) -> Option<UserCommand> {
    let Some(Overlay::SignUp(draft)) = state.overlay.as_mut() else {
        return None;
    };

    if key_event.code == KeyCode::Esc {
        state.overlay = None;
        state.signup_error = None;
        return None;
    }

    match draft.step {
        SignupStep::Identity => match key_event.code {
            KeyCode::Left => draft.prev_partner(),
            KeyCode::Right => draft.next_partner(),
            KeyCode::Backspace => {
                draft.name.pop();
            }
            KeyCode::Enter => match draft.advance() {
                Ok(()) => state.signup_error = None,
                Err(e) => state.signup_error = Some(e.to_string()),
            },
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                draft.name.push(c);
                state.signup_error = None;
            }
            _ => {}
        },
        SignupStep::Avatar => match key_event.code {
            KeyCode::Left => draft.prev_style(),
            KeyCode::Right => draft.next_style(),
            KeyCode::Char('r') | KeyCode::Char('R') => draft.reseed(),
            KeyCode::Backspace => draft.back(),
            KeyCode::Enter => match draft.finish() {
                // The overlay closes when the snapshot carrying the user arrives.
                Ok(user) => return Some(UserCommand::SignUp(user)),
                Err(e) => state.signup_error = Some(e.to_string()),
            },
            _ => {}
        },
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
