//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::editor::{Form, FormMode};
use crate::model::RecordPatch;

use super::state::{AppState, InputMode, Popup};

/// Result of handling a key event. Store-bound actions are carried out by
/// the app loop, which owns the worker handle.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Refetch the record list.
    Fetch,
    /// Create a record from a validated draft.
    Insert(RecordPatch),
    /// Full-field update of one record.
    Update { id: String, patch: RecordPatch },
    /// Delete one record (already confirmed).
    Delete { id: String },
    /// End the session.
    SignOut,
    /// Flip and persist the light/dark flag.
    ToggleTheme,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    // Ctrl-C always quits, regardless of mode.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match &state.popup {
        Popup::QuitConfirm => return handle_quit_confirm(state, key),
        Popup::DeleteConfirm { .. } => return handle_delete_confirm(state, key),
        Popup::Help { .. } => return handle_help(state, key),
        Popup::None => {}
    }

    if state.form.is_some() {
        return handle_form(state, key);
    }

    match state.input_mode {
        InputMode::Search => handle_search(state, key),
        InputMode::Normal => handle_normal(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.popup = Popup::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = Popup::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_delete_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
            let Popup::DeleteConfirm { id, .. } = std::mem::take(&mut state.popup) else {
                return KeyAction::None;
            };
            KeyAction::Delete { id }
        }
        // Cancel: store and in-memory list stay untouched.
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = Popup::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let Popup::Help { scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
        KeyCode::PageDown => *scroll = scroll.saturating_add(10),
        KeyCode::Home => *scroll = 0,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.popup = Popup::None;
        }
        _ => {}
    }
    KeyAction::None
}

/// Keys inside the create/edit form. While a save is in flight the form
/// ignores everything (the request cannot be aborted).
fn handle_form(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let Some(form) = state.form.as_mut() else {
        return KeyAction::None;
    };
    if form.busy {
        return KeyAction::None;
    }

    match key.code {
        // Cancel discards the buffer unconditionally.
        KeyCode::Esc => {
            state.form = None;
            KeyAction::None
        }
        KeyCode::Tab | KeyCode::Down => {
            form.field = form.field.next();
            KeyAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = form.field.prev();
            KeyAction::None
        }
        KeyCode::Enter => match form.submit() {
            Some(patch) => match form.mode.clone() {
                FormMode::Create => KeyAction::Insert(patch),
                FormMode::Edit { id } => KeyAction::Update { id, patch },
            },
            // Validation failure: message shown in the form, no store call.
            None => KeyAction::None,
        },
        KeyCode::Backspace => {
            form.focused_text().pop();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            form.focused_text().push(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_search(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            state.search_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_normal(state: &mut AppState, key: KeyEvent) -> KeyAction {
    // After sign-out only quitting makes sense.
    if state.signed_out {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Enter => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = Popup::QuitConfirm;
            KeyAction::None
        }

        // Row navigation
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_down();
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.page_up(20);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.page_down(20);
            KeyAction::None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.select_home();
            KeyAction::None
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.select_end();
            KeyAction::None
        }

        // Search and category filter
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            KeyAction::None
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            state.cycle_category();
            KeyAction::None
        }

        // Creator / editor / deletion
        KeyCode::Char('a') | KeyCode::Char('A') => {
            if state.identity.is_some() {
                state.form = Some(Form::create());
            }
            KeyAction::None
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            if let Some(record) = state.selected_record() {
                state.form = Some(Form::edit(record));
            }
            KeyAction::None
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if let Some(record) = state.selected_record() {
                state.popup = Popup::DeleteConfirm {
                    id: record.id.clone(),
                    name: record.name.clone(),
                };
            }
            KeyAction::None
        }

        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Fetch,
        KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleTheme,
        KeyCode::Char('o') | KeyCode::Char('O') => {
            if state.identity.is_some() {
                KeyAction::SignOut
            } else {
                KeyAction::None
            }
        }
        KeyCode::Char('?') => {
            state.popup = Popup::Help { scroll: 0 };
            KeyAction::None
        }
        KeyCode::Esc => {
            state.dismiss_status();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
