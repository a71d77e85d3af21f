use ratatui::{prelude::*, widgets::*};

use crate::constants::LOADING_TEXT;
use crate::messages::{ListView, RenderState};

/// Screen regions; shared by drawing and mouse hit-testing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Areas {
    pub banner: Rect,
    pub tabs: Rect,
    pub list: Rect,
    pub details: Rect,
    pub status: Rect,
}

/// Split the frame; the offline banner only takes space while offline
pub fn layout(area: Rect, offline: bool) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if offline { 3 } else { 0 }), // Offline banner
            Constraint::Length(1),                           // Dataset tabs
            Constraint::Min(5),                              // List + details
            Constraint::Length(3),                           // Press gauge / status
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    Areas {
        banner: rows[0],
        tabs: rows[1],
        list: columns[0],
        details: columns[1],
        status: rows[3],
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Items of a reference list; failures degrade to an empty list with a hint
pub fn list_items(list: &ListView) -> Vec<ListItem<'static>> {
    if list.loading && list.entries.is_empty() {
        return vec![ListItem::new(LOADING_TEXT).style(Style::default().fg(Color::DarkGray))];
    }
    if list.entries.is_empty() {
        let hint = if list.failed {
            "موردی برای نمایش نیست (r برای تلاش دوباره)"
        } else {
            "موردی برای نمایش نیست"
        };
        return vec![ListItem::new(hint).style(Style::default().fg(Color::DarkGray))];
    }

    list.entries
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::raw(entry.name.clone())];
            if let Some(detail) = &entry.detail {
                spans.push(Span::styled(format!("  {}", detail), Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect()
}

/// Gauge color while holding
pub fn progress_color(state: &RenderState) -> Color {
    if state.confirmed.is_some() && !state.press_pending {
        Color::Green
    } else if state.press_pending {
        Color::Yellow
    } else {
        Color::DarkGray
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ListEntry;

    #[test]
    fn test_banner_collapses_when_online() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(layout(area, false).banner.height, 0);
        let offline = layout(area, true);
        assert_eq!(offline.banner.height, 3);
        assert_eq!(offline.tabs.y, 3);
    }

    #[test]
    fn test_failed_list_renders_placeholder() {
        let failed = ListView {
            loading: false,
            entries: vec![],
            failed: true,
        };
        assert_eq!(list_items(&failed).len(), 1);

        let ready = ListView {
            loading: false,
            failed: false,
            entries: vec![ListEntry {
                id: "1".into(),
                name: "Tehran".into(),
                detail: Some("TEH".into()),
            }],
        };
        assert_eq!(list_items(&ready).len(), 1);
    }
}
