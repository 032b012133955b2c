// ABOUTME: Event handling system for keyboard input and wizard actions

use crate::app::state::AppState;
use crate::wizard::WizardPhase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    CursorUp,
    CursorDown,
    /// Select, toggle or press the focused row
    Activate,
    /// Enter: submit the focused control or move forward
    Confirm,
    Back,
    InputChar(char),
    Backspace,
    RequestStartOver,
    NewQuote,
    DismissAlert,
    // Confirmation dialog events
    ConfirmationToggle,  // Switch between Yes/No
    ConfirmationConfirm, // Confirm action
    ConfirmationCancel,  // Cancel dialog
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return Some(AppEvent::Quit);
        }

        // Handle confirmation dialog first (highest priority)
        if state.confirmation_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::ConfirmationToggle),
                KeyCode::Enter => Some(AppEvent::ConfirmationConfirm),
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if let Some(dialog) = state.confirmation_dialog.as_mut() {
                        dialog.selected_option = true;
                    }
                    Some(AppEvent::ConfirmationConfirm)
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    Some(AppEvent::ConfirmationCancel)
                }
                _ => None,
            };
        }

        // A failed submission blocks until acknowledged
        if state.wizard.submit_alert().is_some() {
            return match key_event.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(AppEvent::DismissAlert),
                _ => None,
            };
        }

        if ctrl && key_event.code == KeyCode::Char('r') {
            return Some(AppEvent::RequestStartOver);
        }

        match state.phase() {
            WizardPhase::Success => {
                return match key_event.code {
                    KeyCode::Enter => Some(AppEvent::NewQuote),
                    KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
                    _ => None,
                };
            }
            WizardPhase::Submitting => return None,
            _ => {}
        }

        let editing = state.focused_field().is_some();
        match key_event.code {
            KeyCode::Up => Some(AppEvent::CursorUp),
            KeyCode::Down | KeyCode::Tab => Some(AppEvent::CursorDown),
            KeyCode::BackTab => Some(AppEvent::CursorUp),
            KeyCode::Enter => Some(AppEvent::Confirm),
            KeyCode::Esc => Some(AppEvent::Back),
            KeyCode::Backspace if editing => Some(AppEvent::Backspace),
            KeyCode::Char(c) if editing => Some(AppEvent::InputChar(c)),
            KeyCode::Char(' ') => Some(AppEvent::Activate),
            KeyCode::Char('k') => Some(AppEvent::CursorUp),
            KeyCode::Char('j') => Some(AppEvent::CursorDown),
            KeyCode::Char('q') => Some(AppEvent::Quit),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => {
                info!("Quit requested");
                state.should_quit = true;
            }
            AppEvent::CursorUp => state.cursor_up(),
            AppEvent::CursorDown => state.cursor_down(),
            AppEvent::Activate => state.activate_focused(),
            AppEvent::Confirm => state.confirm(),
            AppEvent::Back => state.go_back(),
            AppEvent::InputChar(c) => state.input_char(c),
            AppEvent::Backspace => state.backspace(),
            AppEvent::RequestStartOver => state.show_start_over_confirmation(),
            AppEvent::NewQuote => state.new_quote(),
            AppEvent::DismissAlert => state.wizard.dismiss_alert(),
            AppEvent::ConfirmationToggle => {
                if let Some(ref mut dialog) = state.confirmation_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::ConfirmationConfirm => {
                if let Some(dialog) = state.confirmation_dialog.take() {
                    // If not confirmed, just close the dialog
                    if dialog.selected_option {
                        state.run_confirmed(dialog.confirm_action);
                    }
                }
            }
            AppEvent::ConfirmationCancel => {
                state.confirmation_dialog = None;
            }
        }
    }
}
