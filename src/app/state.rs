//! App state - pure data structure with no I/O logic

use crate::connectivity::offline_notice;
use crate::messages::ui_events::DatasetTab;
use crate::messages::{ListEntry, ListView, RenderState};

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: DatasetTab,
    pub lists: [ListView; 4],
    /// Selected row per dataset
    pub selected: [usize; 4],

    pub online: bool,

    pub press_pending: bool,
    pub press_progress: f64,
    pub hold_secs: f64,
    pub confirmed: Option<String>,

    pub details: Vec<String>,
    pub details_error: Option<String>,

    pub show_help: bool,
}

impl AppState {
    pub fn new(online: bool, hold_secs: f64) -> Self {
        AppState {
            online,
            hold_secs,
            ..AppState::default()
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    pub fn select_next(&mut self) {
        let idx = self.active_tab.index();
        let len = self.lists[idx].entries.len();
        if self.selected[idx] + 1 < len {
            self.selected[idx] += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let idx = self.active_tab.index();
        self.selected[idx] = self.selected[idx].saturating_sub(1);
    }

    /// Replace a dataset's list, keeping the selection in range
    pub fn set_list(&mut self, tab: DatasetTab, list: ListView) {
        let idx = tab.index();
        let last = list.entries.len().saturating_sub(1);
        self.selected[idx] = self.selected[idx].min(last);
        self.lists[idx] = list;
    }

    pub fn selected_entry(&self) -> Option<&ListEntry> {
        let idx = self.active_tab.index();
        self.lists[idx].entries.get(self.selected[idx])
    }

    /// Record the item confirmed by a completed long press
    pub fn confirm_selection(&mut self) -> Option<&str> {
        self.confirmed = self.selected_entry().map(|e| e.name.clone());
        self.confirmed.as_deref()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            lists: self.lists.clone(),
            selected: self.selected[self.active_tab.index()],
            online: self.online,
            offline_notice: offline_notice(self.online),
            press_pending: self.press_pending,
            press_progress: self.press_progress,
            hold_secs: self.hold_secs,
            confirmed: self.confirmed.clone(),
            details: self.details.clone(),
            details_error: self.details_error.clone(),
            show_help: self.show_help,
        }
    }
}
