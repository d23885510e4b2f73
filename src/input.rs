use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ShowHelp,
    Back,
    CycleTheme,  // t: cycle color theme
    TogglePause, // p: freeze polling, keep the table on screen
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Esc, _)       => Action::Back,

        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('p'), _) => Action::TogglePause,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)    => Action::ShowHelp,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key), Action::Quit);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(handle_key(key), Action::None);
    }
}
