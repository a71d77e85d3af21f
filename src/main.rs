//! Sazyar - terminal client for the construction-services marketplace
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Resource Layer (Tokio) - async collection loading

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use sazyar::connectivity::{ConnectivityMonitor, ManualSource};
use sazyar::constants::APP_NAME;
use sazyar::diagnostics::TracingSink;
use sazyar::messages::ui_events::{key_to_ui_event, mouse_to_ui_event, DatasetTab};
use sazyar::messages::{RenderState, UiEvent};
use sazyar::network::RestService;
use sazyar::ui::{centered_rect, layout, list_items, progress_color, render_tabs};
use sazyar::{AppActor, AppConfig, AppContext};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(backend = %config.backend_url, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let source = Arc::new(ManualSource::new(true));
    let ctx = AppContext {
        service: Arc::new(RestService::new(&config)),
        diagnostics: Arc::new(TracingSink),
        monitor: ConnectivityMonitor::new(source.clone()),
        source,
        hold: config.hold_duration(),
    };

    // Spawn app actor
    let app_actor = AppActor::new(ctx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    let _ = app_handle.await;
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let size = terminal.size()?;
            let areas = layout(Rect::new(0, 0, size.width, size.height), current_state.offline_notice.is_some());

            let ui_event = match event::read()? {
                Event::Key(key) => key_to_ui_event(key, current_state.show_help),
                Event::Mouse(mouse) => mouse_to_ui_event(mouse, areas.list),
                _ => None,
            };

            if let Some(event) = ui_event {
                let quit = matches!(event, UiEvent::Quit);
                let _ = ui_tx.send(event);
                if quit {
                    break;
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let areas = layout(area, state.offline_notice.is_some());

    if let Some(notice) = state.offline_notice {
        let banner = Paragraph::new(notice)
            .style(Style::default().fg(Color::Black).bg(Color::Red).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
        f.render_widget(banner, areas.banner);
    }

    let titles: Vec<&str> = DatasetTab::ALL.iter().map(|t| t.label()).collect();
    f.render_widget(render_tabs(&titles, state.active_tab.index()), areas.tabs);

    draw_list(f, state, areas.list);
    draw_details(f, state, areas.details);
    draw_status(f, state, areas.status);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let list_view = state.active_list();
    let loading = if list_view.loading { " [...]" } else { "" };

    let border_style = if list_view.failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let list = List::new(list_items(list_view))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {}{} ", state.active_tab.label(), loading)))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !list_view.entries.is_empty() {
        list_state.select(Some(state.selected));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_details(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" جزئیات ");

    let lines: Vec<Line> = match &state.details_error {
        Some(err) => vec![Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red)))],
        None => state.details.iter().map(|l| Line::from(l.clone())).collect(),
    };

    let details = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn draw_status(f: &mut Frame, state: &RenderState, area: Rect) {
    let label = match (&state.confirmed, state.press_pending) {
        (_, true) => format!("نگه دارید... ({:.0} ثانیه)", state.hold_secs),
        (Some(name), false) => format!("تأیید شد: {}", name),
        (None, false) => String::from("برای تأیید، روی مورد کلیک کرده و نگه دارید | ?:راهنما | q:خروج"),
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", APP_NAME)))
        .gauge_style(Style::default().fg(progress_color(state)))
        .ratio(state.press_progress.clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 SAZYAR - Keyboard & Mouse

 NAVIGATION
   Tab / ← →          Switch dataset
   ↑ / ↓ (j / k)      Move selection

 DATA
   r                  Reload current dataset

 CONFIRM
   Hold left mouse    Confirm selected item
   Release / drag off Cancel

 CONNECTIVITY
   o                  Toggle offline simulation

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
