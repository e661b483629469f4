use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// What a key press or wheel turn asks of the [`App`](super::app::App).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    Insert(char),
    DeleteBackward,
    DeleteForward,
    MoveCursor(isize),
    MoveWord(isize),
    Home,
    End,
    ClearInput,
    Recall(isize),
    PageHistory(isize),
    ScrollHistory(isize),
    OpenHelp,
    CloseHelp,
    ScrollHelp(isize),
}

const WHEEL_STEP: isize = 3;
const HELP_PAGE: isize = 10;

pub fn action_for_event(event: &Event, help_open: bool) -> Option<Action> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => action_for_key(*code, *modifiers, help_open),
        Event::Mouse(mouse) => action_for_wheel(mouse.kind, help_open),
        _ => None,
    }
}

/// While the help screen is open only scrolling, Esc and Ctrl+C do anything.
pub fn action_for_key(code: KeyCode, modifiers: KeyModifiers, help_open: bool) -> Option<Action> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    if help_open {
        return match code {
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Esc => Some(Action::CloseHelp),
            KeyCode::Down => Some(Action::ScrollHelp(1)),
            KeyCode::Up => Some(Action::ScrollHelp(-1)),
            KeyCode::PageDown => Some(Action::ScrollHelp(HELP_PAGE)),
            KeyCode::PageUp => Some(Action::ScrollHelp(-HELP_PAGE)),
            _ => None,
        };
    }

    let action = match code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('u' | 'U') if ctrl => Action::ClearInput,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::DeleteBackward,
        KeyCode::Delete => Action::DeleteForward,
        KeyCode::Left if ctrl => Action::MoveWord(-1),
        KeyCode::Right if ctrl => Action::MoveWord(1),
        KeyCode::Left => Action::MoveCursor(-1),
        KeyCode::Right => Action::MoveCursor(1),
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::Recall(-1),
        KeyCode::Down => Action::Recall(1),
        KeyCode::PageUp => Action::PageHistory(-1),
        KeyCode::PageDown => Action::PageHistory(1),
        KeyCode::F(1) => Action::OpenHelp,
        _ => return None,
    };
    Some(action)
}

pub fn action_for_wheel(kind: MouseEventKind, help_open: bool) -> Option<Action> {
    let delta = match kind {
        MouseEventKind::ScrollDown => WHEEL_STEP,
        MouseEventKind::ScrollUp => -WHEEL_STEP,
        _ => return None,
    };
    Some(if help_open {
        Action::ScrollHelp(delta)
    } else {
        Action::ScrollHistory(delta)
    })
}
