use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use chronos_core::services::tracker::TimeTracker;

use crate::app::{App, Direction, EditSession, LogBuffer, Panel};

/// A controller operation selected by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Focus(Panel),
    MoveCursor(Direction),
    BeginEdit,
    BeginAddTask,
    DeleteEntry,
    Refresh,
    EditChar(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,
    TaskChar(char),
    TaskBackspace,
    ConfirmAddTask,
    CancelAddTask,
    ScrollLogUp(usize),
    ScrollLogDown(usize),
}

/// Handle a key event: resolve it against the current session and focus,
/// then apply the resulting action.
pub async fn handle_key(app: &mut App, key: KeyEvent, tracker: &dyn TimeTracker) {
    tracing::debug!(session = ?app.session, focus = ?app.focus, key = ?key.code, "handle_key");
    if let Some(action) = resolve(app, key) {
        apply(app, action, tracker).await;
    }
}

/// Map (session, focus, key) to an action. Unbound combinations yield `None`.
pub fn resolve(app: &App, key: KeyEvent) -> Option<Action> {
    if let Some(action) = resolve_global(app, key) {
        return Some(action);
    }
    match (&app.session, app.focus) {
        (EditSession::Idle, Panel::Grid) => resolve_idle_grid(key),
        (EditSession::Idle, Panel::Log) => resolve_idle_log(key),
        (EditSession::EditingCell { .. }, _) => resolve_editing(key),
        (EditSession::AddingTask { .. }, _) => resolve_adding_task(key),
    }
}

pub async fn apply(app: &mut App, action: Action, tracker: &dyn TimeTracker) {
    match action {
        Action::Quit => app.quit(),
        Action::Focus(panel) => app.focus_panel(panel),
        Action::MoveCursor(direction) => app.move_cursor(direction),
        Action::BeginEdit => app.begin_edit(),
        Action::BeginAddTask => app.begin_add_task(),
        Action::DeleteEntry => app.delete_entry(tracker).await,
        Action::Refresh => app.refresh(tracker).await,
        Action::EditChar(c) => app.edit_push(c),
        Action::EditBackspace => app.edit_backspace(),
        Action::CommitEdit => app.commit_edit(tracker).await,
        Action::CancelEdit => app.cancel_edit(),
        Action::TaskChar(c) => app.task_push(c),
        Action::TaskBackspace => app.task_backspace(),
        Action::ConfirmAddTask => app.confirm_add_task(),
        Action::CancelAddTask => app.cancel_add_task(),
        Action::ScrollLogUp(lines) => app.log.scroll_up(lines),
        Action::ScrollLogDown(lines) => app.log.scroll_down(lines),
    }
}

fn ctrl(key: KeyEvent) -> Option<char> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn plain_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

// ─── Global Keys ───────────────────────────────────────────────────────

fn resolve_global(app: &App, key: KeyEvent) -> Option<Action> {
    let idle = app.session.is_idle();
    match ctrl(key)? {
        'c' => Some(Action::Quit),
        't' if idle => Some(Action::Focus(Panel::Grid)),
        'l' if idle => Some(Action::Focus(Panel::Log)),
        'n' if idle => Some(Action::BeginAddTask),
        'r' if idle => Some(Action::Refresh),
        'd' if idle && app.focus == Panel::Grid => Some(Action::DeleteEntry),
        _ => None,
    }
}

// ─── Idle ──────────────────────────────────────────────────────────────

fn resolve_idle_grid(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up => Some(Action::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(Action::MoveCursor(Direction::Down)),
        KeyCode::Left => Some(Action::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(Action::MoveCursor(Direction::Right)),
        KeyCode::Enter => Some(Action::BeginEdit),
        _ if plain_char(key) == Some('q') => Some(Action::Quit),
        _ => None,
    }
}

fn resolve_idle_log(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up => Some(Action::ScrollLogUp(1)),
        KeyCode::Down => Some(Action::ScrollLogDown(1)),
        KeyCode::PageUp => Some(Action::ScrollLogUp(LogBuffer::PAGE)),
        KeyCode::PageDown => Some(Action::ScrollLogDown(LogBuffer::PAGE)),
        _ if plain_char(key) == Some('q') => Some(Action::Quit),
        _ => None,
    }
}

// ─── Editing Cell ──────────────────────────────────────────────────────

fn is_duration_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'h' | 'm' | 's' | ':')
}

fn resolve_editing(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::CommitEdit),
        KeyCode::Esc => Some(Action::CancelEdit),
        KeyCode::Backspace => Some(Action::EditBackspace),
        _ => match plain_char(key)? {
            'q' => Some(Action::CancelEdit),
            c if is_duration_char(c) => Some(Action::EditChar(c)),
            _ => None,
        },
    }
}

// ─── Add Task Popup ────────────────────────────────────────────────────

fn resolve_adding_task(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::ConfirmAddTask),
        KeyCode::Esc => Some(Action::CancelAddTask),
        KeyCode::Backspace => Some(Action::TaskBackspace),
        _ => match plain_char(key)? {
            'q' => Some(Action::CancelAddTask),
            c if !c.is_control() => Some(Action::TaskChar(c)),
            _ => None,
        },
    }
}
