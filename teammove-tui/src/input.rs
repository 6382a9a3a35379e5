use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.match_for_event`(...) for the typed passenger address
    MatchPassenger,
    /// Run `service.events`() again
    ReloadEvents,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Up};

    // Global quit shortcut; plain `q` is typed text on the address screen
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q')
        && key.modifiers.is_empty()
        && !matches!(app.screen, Screen::PassengerAddress)
    {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::EventSelect => match key.code {
            Up | Char('k') => {
                app.event_list_index = app.event_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.event_list_index + 1 < app.events.len() {
                    app.event_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_event();
            }
            Char('r') => {
                action = Action::ReloadEvents;
            }
            _ => {}
        },

        Screen::PassengerAddress => match key.code {
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.address_input.push(character);
                    app.address_changed();
                }
            }
            Backspace => {
                app.address_input.pop();
                app.address_changed();
            }
            Enter => {
                action = Action::MatchPassenger;
            }
            Esc => {
                app.screen = Screen::EventSelect;
            }
            _ => {}
        },

        Screen::MatchList => match key.code {
            Up | Char('k') => {
                app.match_list_index = app.match_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.match_list_index + 1 < app.matches.len() {
                    app.match_list_index += 1;
                }
            }
            Left | Esc | Char('b') => {
                app.screen = Screen::PassengerAddress;
            }
            _ => {}
        },
    }
    action
}
