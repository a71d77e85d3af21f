//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::gesture::PressEvent;
use crate::resource::{ActivityTypes, Dataset, Positions, Provinces, ServiceCategories};

/// Reference dataset shown in the list panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DatasetTab {
    #[default]
    Provinces,
    ServiceCategories,
    ActivityTypes,
    Positions,
}

impl DatasetTab {
    pub const ALL: [DatasetTab; 4] = [
        DatasetTab::Provinces,
        DatasetTab::ServiceCategories,
        DatasetTab::ActivityTypes,
        DatasetTab::Positions,
    ];

    pub fn index(self) -> usize {
        match self {
            DatasetTab::Provinces => 0,
            DatasetTab::ServiceCategories => 1,
            DatasetTab::ActivityTypes => 2,
            DatasetTab::Positions => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetTab::Provinces => Provinces::LABEL,
            DatasetTab::ServiceCategories => ServiceCategories::LABEL,
            DatasetTab::ActivityTypes => ActivityTypes::LABEL,
            DatasetTab::Positions => Positions::LABEL,
        }
    }

    pub fn next(self) -> DatasetTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> DatasetTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    NextTab,
    PrevTab,
    SelectNext,
    SelectPrev,

    // Data
    Reload,

    // Hold-to-confirm on the selected item
    Press(PressEvent),

    /// Flip the environment connectivity signal (offline simulation)
    ToggleConnectivity,

    ToggleHelp,
    Quit,
}

/// Map a key press to an event
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Any key closes help
    if show_help {
        return Some(UiEvent::ToggleHelp);
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Tab | KeyCode::Right => Some(UiEvent::NextTab),
        KeyCode::BackTab | KeyCode::Left => Some(UiEvent::PrevTab),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Char('o') => Some(UiEvent::ToggleConnectivity),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        _ => None,
    }
}

/// Map mouse activity to press signals for the gesture bound to `target`.
///
/// Dragging off the target counts as leaving it.
pub fn mouse_to_ui_event(mouse: MouseEvent, target: Rect) -> Option<UiEvent> {
    let inside = target.contains(Position::new(mouse.column, mouse.row));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => Some(UiEvent::Press(PressEvent::PointerDown)),
        MouseEventKind::Up(MouseButton::Left) => Some(UiEvent::Press(PressEvent::PointerUp)),
        MouseEventKind::Drag(MouseButton::Left) if !inside => Some(UiEvent::Press(PressEvent::PointerLeave)),
        MouseEventKind::ScrollDown if inside => Some(UiEvent::SelectNext),
        MouseEventKind::ScrollUp if inside => Some(UiEvent::SelectPrev),
        _ => None,
    }
}
