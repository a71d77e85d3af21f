//! App actor - message loop processing UI events, resource updates and
//! connectivity transitions

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::app::details::{details_section, DetailsProps};
use crate::app::state::AppState;
use crate::connectivity::{ConnectivityMonitor, ManualSource, Subscription};
use crate::deferred::{suspense, Lazy, Node};
use crate::diagnostics::DiagnosticSink;
use crate::error::DeferredError;
use crate::gesture::LongPress;
use crate::messages::ui_events::DatasetTab;
use crate::messages::{ListView, RenderState, UiEvent};
use crate::models::{ActivityType, Position, Province, ServiceCategory};
use crate::network::DataService;
use crate::resource::{ActivityTypes, Positions, Provinces, Resource, ServiceCategories};

/// Collaborators the actor is wired to
pub struct AppContext {
    pub service: Arc<dyn DataService>,
    pub diagnostics: Arc<dyn DiagnosticSink>,
    pub monitor: ConnectivityMonitor,
    /// Environment signal; toggled for offline simulation
    pub source: Arc<ManualSource>,
    pub hold: Duration,
}

/// Completions arriving from tasks the actor spawned
enum Internal {
    PressConfirmed,
    DetailsFrame {
        generation: u64,
        frame: Result<Node, DeferredError>,
    },
}

/// App actor that owns the resilience layer for one session
pub struct AppActor {
    state: AppState,
    provinces: Resource<Province>,
    service_categories: Resource<ServiceCategory>,
    activity_types: Resource<ActivityType>,
    positions: Resource<Position>,
    connectivity: Subscription,
    source: Arc<ManualSource>,
    press: LongPress,
    details: Arc<Lazy<DetailsProps>>,
    details_generation: u64,
    internal_tx: mpsc::UnboundedSender<Internal>,
    internal_rx: mpsc::UnboundedReceiver<Internal>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(ctx: AppContext, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();

        let confirm_tx = internal_tx.clone();
        let press = LongPress::attach(
            move || {
                let _ = confirm_tx.send(Internal::PressConfirmed);
            },
            ctx.hold,
        );

        let connectivity = ctx.monitor.subscribe();
        let service = ctx.service;
        let diagnostics = ctx.diagnostics;

        AppActor {
            state: AppState::new(connectivity.is_online(), ctx.hold.as_secs_f64()),
            provinces: Resource::for_dataset::<Provinces>(service.clone(), diagnostics.clone()),
            service_categories: Resource::for_dataset::<ServiceCategories>(service.clone(), diagnostics.clone()),
            activity_types: Resource::for_dataset::<ActivityTypes>(service.clone(), diagnostics.clone()),
            positions: Resource::for_dataset::<Positions>(service, diagnostics),
            connectivity,
            source: ctx.source,
            press,
            details: Arc::new(details_section()),
            details_generation: 0,
            internal_tx,
            internal_rx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        let mut provinces_rx = self.provinces.subscribe();
        let mut categories_rx = self.service_categories.subscribe();
        let mut activity_rx = self.activity_types.subscribe();
        let mut positions_rx = self.positions.subscribe();
        let mut ticker = tokio::time::interval(Duration::from_millis(100));

        for tab in DatasetTab::ALL {
            self.load(tab);
        }
        self.emit();

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    match event {
                        Some(event) => {
                            if self.handle_ui_event(event) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                Some(msg) = self.internal_rx.recv() => self.handle_internal(msg),
                Some(online) = self.connectivity.changed() => self.on_connectivity(online),
                Ok(()) = provinces_rx.changed() => {
                    let list = ListView::from_resource(&provinces_rx.borrow_and_update());
                    self.on_list(DatasetTab::Provinces, list);
                }
                Ok(()) = categories_rx.changed() => {
                    let list = ListView::from_resource(&categories_rx.borrow_and_update());
                    self.on_list(DatasetTab::ServiceCategories, list);
                }
                Ok(()) = activity_rx.changed() => {
                    let list = ListView::from_resource(&activity_rx.borrow_and_update());
                    self.on_list(DatasetTab::ActivityTypes, list);
                }
                Ok(()) = positions_rx.changed() => {
                    let list = ListView::from_resource(&positions_rx.borrow_and_update());
                    self.on_list(DatasetTab::Positions, list);
                }
                _ = ticker.tick(), if self.press.is_pending() => {}
            }

            self.sync_press();
            self.emit();
        }

        self.press.stop();
        tracing::info!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Quit => return true,

            UiEvent::NextTab => {
                self.press.stop();
                self.state.next_tab();
                self.refresh_details();
            }
            UiEvent::PrevTab => {
                self.press.stop();
                self.state.prev_tab();
                self.refresh_details();
            }
            UiEvent::SelectNext => {
                self.press.stop();
                self.state.select_next();
                self.refresh_details();
            }
            UiEvent::SelectPrev => {
                self.press.stop();
                self.state.select_prev();
                self.refresh_details();
            }

            UiEvent::Reload => self.load(self.state.active_tab),

            UiEvent::Press(press_event) => {
                // Nothing to confirm on an empty list
                if press_event.begins_press() && self.state.selected_entry().is_none() {
                    return false;
                }
                self.press.handle(press_event);
            }

            UiEvent::ToggleConnectivity => {
                self.source.toggle();
                // The listener has already run; read the shared status back
                self.on_connectivity(self.connectivity.is_online());
            }

            UiEvent::ToggleHelp => self.state.toggle_help(),
        }
        false
    }

    fn handle_internal(&mut self, msg: Internal) {
        match msg {
            Internal::PressConfirmed => {
                if let Some(name) = self.state.confirm_selection() {
                    tracing::info!(item = name, "Selection confirmed by long press");
                }
            }
            Internal::DetailsFrame { generation, frame } => {
                if generation != self.details_generation {
                    return;
                }
                match frame {
                    Ok(node) => {
                        self.state.details = node.lines();
                        self.state.details_error = None;
                    }
                    Err(e) => {
                        self.state.details.clear();
                        self.state.details_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn on_connectivity(&mut self, online: bool) {
        let was_online = self.state.online;
        self.state.online = online;

        if online && !was_online {
            tracing::info!("Back online, retrying failed datasets");
            for tab in DatasetTab::ALL {
                if self.state.lists[tab.index()].failed {
                    self.load(tab);
                }
            }
        }
    }

    fn on_list(&mut self, tab: DatasetTab, list: ListView) {
        let settled = !list.loading;
        self.state.set_list(tab, list);
        if settled && tab == self.state.active_tab {
            self.refresh_details();
        }
    }

    fn load(&self, tab: DatasetTab) {
        match tab {
            DatasetTab::Provinces => self.provinces.load(),
            DatasetTab::ServiceCategories => self.service_categories.load(),
            DatasetTab::ActivityTypes => self.activity_types.load(),
            DatasetTab::Positions => self.positions.load(),
        };
    }

    /// Remount the details section for the current selection
    fn refresh_details(&mut self) {
        self.details_generation += 1;
        self.state.details.clear();
        self.state.details_error = None;

        let Some(entry) = self.state.selected_entry().cloned() else {
            return;
        };

        let generation = self.details_generation;
        let props = DetailsProps {
            dataset: self.state.active_tab.label(),
            entry,
        };
        let mut frames = suspense(Arc::clone(&self.details), props);
        let tx = self.internal_tx.clone();

        tokio::spawn(async move {
            while let Some(frame) = frames.next().await {
                if tx.send(Internal::DetailsFrame { generation, frame }).is_err() {
                    break;
                }
            }
        });
    }

    fn sync_press(&mut self) {
        self.state.press_pending = self.press.is_pending();
        self.state.press_progress = self.press.progress();
    }

    fn emit(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::diagnostics::RecordingSink;
    use crate::gesture::PressEvent;
    use crate::network::MemoryService;

    fn context(source: Arc<ManualSource>, service: Arc<MemoryService>) -> AppContext {
        AppContext {
            service,
            diagnostics: Arc::new(RecordingSink::new()),
            monitor: ConnectivityMonitor::new(source.clone()),
            source,
            hold: Duration::from_millis(300),
        }
    }

    async fn next_matching(
        rx: &mut mpsc::UnboundedReceiver<RenderState>,
        pred: impl Fn(&RenderState) -> bool,
    ) -> RenderState {
        loop {
            let state = rx.recv().await.expect("actor stopped");
            if pred(&state) {
                return state;
            }
        }
    }

    fn service() -> Arc<MemoryService> {
        Arc::new(MemoryService::new().with_table(
            "provinces",
            vec![
                json!({"id": "1", "name": "Tehran", "code": "TEH", "is_active": true}),
                json!({"id": "2", "name": "Alborz", "code": "ALB", "is_active": true}),
            ],
        ))
    }

    #[tokio::test]
    async fn test_lists_load_and_details_resolve() {
        let source = Arc::new(ManualSource::new(true));
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(context(source, service()), render_tx);
        let handle = tokio::spawn(actor.run(ui_rx));

        let state = next_matching(&mut render_rx, |s| {
            s.details.first().map(String::as_str) == Some("Alborz")
        })
        .await;
        let names: Vec<_> = state.active_list().entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alborz", "Tehran"]);
        assert!(state.details.iter().any(|line| line.contains("ALB")));

        // Absent tables load as empty lists, not failures
        let other = &state.lists[DatasetTab::Positions.index()];
        assert!(!other.failed);

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_offline_toggle_and_retry_on_reconnect() {
        let source = Arc::new(ManualSource::new(true));
        let service = service();
        service.fail("organizational_positions", crate::error::FetchError::Service("down".into()));

        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(context(source.clone(), service.clone()), render_tx);
        let handle = tokio::spawn(actor.run(ui_rx));

        next_matching(&mut render_rx, |s| s.lists[DatasetTab::Positions.index()].failed).await;

        ui_tx.send(UiEvent::ToggleConnectivity).unwrap();
        let state = next_matching(&mut render_rx, |s| !s.online).await;
        assert!(state.offline_notice.is_some());

        service.recover("organizational_positions");
        service.set_table(
            "organizational_positions",
            vec![json!({"id": "p1", "name": "مدیر پروژه", "is_active": true})],
        );
        ui_tx.send(UiEvent::ToggleConnectivity).unwrap();
        let state = next_matching(&mut render_rx, |s| {
            s.online && s.lists[DatasetTab::Positions.index()].entries.len() == 1
        })
        .await;
        assert!(state.offline_notice.is_none());

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
        assert_eq!(source.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_hold_confirms_selected_item() {
        let source = Arc::new(ManualSource::new(true));
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(context(source, service()), render_tx);
        let handle = tokio::spawn(actor.run(ui_rx));

        next_matching(&mut render_rx, |s| !s.active_list().entries.is_empty()).await;
        ui_tx.send(UiEvent::SelectNext).unwrap();
        ui_tx.send(UiEvent::Press(PressEvent::PointerDown)).unwrap();

        let state = next_matching(&mut render_rx, |s| s.confirmed.is_some()).await;
        assert_eq!(state.confirmed.as_deref(), Some("Tehran"));

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
    }
}
