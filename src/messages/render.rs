//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::DatasetTab;
use crate::models::ReferenceItem;
use crate::resource::ResourceView;

/// One selectable row
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub name: String,
    pub detail: Option<String>,
}

/// Presentation of one reference dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub loading: bool,
    pub entries: Vec<ListEntry>,
    /// Set when the last load failed; entries are then empty
    pub failed: bool,
}

impl ListView {
    pub fn from_resource<T: ReferenceItem>(view: &ResourceView<T>) -> Self {
        ListView {
            loading: view.loading,
            entries: view
                .state
                .items()
                .iter()
                .map(|item| ListEntry {
                    id: item.id().to_string(),
                    name: item.name().to_string(),
                    detail: item.detail().map(str::to_string),
                })
                .collect(),
            failed: view.state.is_failed(),
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: DatasetTab,
    pub lists: [ListView; 4],
    pub selected: usize,

    // Connectivity
    pub online: bool,
    pub offline_notice: Option<&'static str>,

    // Long press
    pub press_pending: bool,
    pub press_progress: f64,
    pub hold_secs: f64,
    pub confirmed: Option<String>,

    // Deferred details section
    pub details: Vec<String>,
    pub details_error: Option<String>,

    pub show_help: bool,
}

impl RenderState {
    pub fn active_list(&self) -> &ListView {
        &self.lists[self.active_tab.index()]
    }
}
