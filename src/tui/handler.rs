use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub enum AppAction {
    Quit,
    ShowIntakeTab,
    ShowRecordsTab,
    // Form editing
    NextField,
    PrevField,
    InputChar(char),
    InputBackspace,
    FieldLeft,
    FieldRight,
    Submit,
    // Records tab
    ReloadRecords,
    MoveUp,
    MoveDown,
    ShowHelp,
    HideHelp,
}

/// While the intake tab is focused the keyboard is in editing mode and
/// printable keys go into the form; the records tab uses plain shortcuts.
pub fn handle_key_event(key: KeyEvent, intake_active: bool, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    if intake_active {
        return match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),
            (KeyCode::Esc, _) => Some(AppAction::ShowRecordsTab),

            (KeyCode::Tab, _) | (KeyCode::Down, _) => Some(AppAction::NextField),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => Some(AppAction::PrevField),
            (KeyCode::Left, _) => Some(AppAction::FieldLeft),
            (KeyCode::Right, _) => Some(AppAction::FieldRight),

            (KeyCode::Enter, _) => Some(AppAction::Submit),
            (KeyCode::Backspace, _) => Some(AppAction::InputBackspace),
            (KeyCode::Char(c), modifiers)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                Some(AppAction::InputChar(c))
            }

            _ => None,
        };
    }

    // Records tab
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('i'), _) | (KeyCode::Tab, _) | (KeyCode::Esc, _) => {
            Some(AppAction::ShowIntakeTab)
        }
        (KeyCode::Char('r'), _) => Some(AppAction::ReloadRecords),

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_goes_into_the_form_while_intake_is_active() {
        let action = handle_key_event(key(KeyCode::Char('q')), true, false);
        assert!(matches!(action, Some(AppAction::InputChar('q'))));

        let action = handle_key_event(key(KeyCode::Enter), true, false);
        assert!(matches!(action, Some(AppAction::Submit)));
    }

    #[test]
    fn ctrl_c_quits_in_both_modes() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            handle_key_event(ctrl_c, true, false),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            handle_key_event(ctrl_c, false, false),
            Some(AppAction::Quit)
        ));
    }

    #[test]
    fn records_shortcuts_apply_outside_editing() {
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('q')), false, false),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('r')), false, false),
            Some(AppAction::ReloadRecords)
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('j')), false, false),
            Some(AppAction::MoveDown)
        ));
    }

    #[test]
    fn any_key_closes_help() {
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('x')), false, true),
            Some(AppAction::HideHelp)
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Enter), true, true),
            Some(AppAction::HideHelp)
        ));
    }

    #[test]
    fn ctrl_modified_letters_are_not_inserted() {
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert!(handle_key_event(ctrl_x, true, false).is_none());
    }
}
