//! UI rendering for the terminal host.
//!
//! `WidgetView` holds what the controller last reported; `draw` lays it out
//! with `ratatui` and records the clickable areas back into the view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use playbar::TransportAction;

mod view;

pub use view::WidgetView;


const CONTROLS: [(&str, &str); 8] = [
    ("j/k", "up/down"),
    ("enter/click", "play row"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("h/l", "prev/next song"),
    ("0-9", "seek"),
    ("click bar", "seek"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn button_label(action: TransportAction) -> &'static str {
    match action {
        TransportAction::Play => "[ ▶ play ]",
        TransportAction::Pause => "[ ⏸ pause ]",
    }
}

/// Visible window `[start, end)` of `total` rows that keeps `selected`
/// centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn draw_now_playing(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(area);

    let details = match view.details() {
        Some(track) => format!(
            "{}\n{}\n{}",
            track.track_name, track.track_artist, track.track_album
        ),
        None => "No track".to_string(),
    };
    let thumb = if view.thumbnail().is_empty() {
        "-"
    } else {
        view.thumbnail()
    };
    let details_par = Paragraph::new(format!("{details}\ncover: {thumb}"))
        .block(bordered(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(details_par, columns[0]);

    let button = Paragraph::new(button_label(view.button()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, columns[1]);
}

fn draw_playlist(frame: &mut Frame, view: &mut WidgetView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" tracks ");
    let inner = block.inner(area);

    // Only build ListItems for the visible window.
    let total = view.tracks().len();
    let (start, end) = visible_window(total, inner.height as usize, view.cursor());

    let items: Vec<ListItem> = view.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let index = start + offset;
            let marker = if index == view.highlighted() { "♪ " } else { "  " };
            let item = ListItem::new(format!(
                "{marker}{} - {}",
                track.track_artist, track.track_name
            ));
            if index == view.highlighted() {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(view.cursor() - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
    view.set_playlist_area(inner, start);
}

fn draw_progress(frame: &mut Frame, view: &mut WidgetView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" progress ");
    let inner = block.inner(area);
    let gauge = Gauge::default()
        .block(block)
        .ratio((view.fill() / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", view.elapsed(), view.total()));
    frame.render_widget(gauge, area);
    view.set_progress_area(inner);
}

/// Render the widget into `frame` and record its clickable areas.
pub fn draw(frame: &mut Frame, view: &mut WidgetView, header_text: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" playbar ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, view, chunks[1]);
    draw_playlist(frame, view, chunks[2]);
    draw_progress(frame, view, chunks[3]);

    let footer = Paragraph::new(controls_text())
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
