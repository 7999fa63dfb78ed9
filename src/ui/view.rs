use ratatui::layout::{Position, Rect};

use playbar::{InputEvent, RenderPort, Track, TransportAction};

/// Everything the terminal draws, as last reported by the controller.
///
/// The draw pass records where the playlist and the progress bar landed so
/// mouse clicks can be mapped back to input events.
#[derive(Debug)]
pub struct WidgetView {
    tracks: Vec<Track>,
    highlighted: usize,
    cursor: usize,
    details: Option<Track>,
    thumbnail: String,
    fill: f64,
    elapsed: String,
    total: String,
    button: TransportAction,
    playlist_area: Rect,
    playlist_offset: usize,
    progress_area: Rect,
}

impl Default for WidgetView {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            highlighted: 0,
            cursor: 0,
            details: None,
            thumbnail: String::new(),
            fill: 0.0,
            elapsed: "00:00".to_string(),
            total: "00:00".to_string(),
            button: TransportAction::Play,
            playlist_area: Rect::default(),
            playlist_offset: 0,
            progress_area: Rect::default(),
        }
    }
}

impl WidgetView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn details(&self) -> Option<&Track> {
        self.details.as_ref()
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn fill(&self) -> f64 {
        self.fill
    }

    pub fn elapsed(&self) -> &str {
        &self.elapsed
    }

    pub fn total(&self) -> &str {
        &self.total
    }

    /// The action the transport button currently offers.
    pub fn button(&self) -> TransportAction {
        self.button
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.tracks.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn set_playlist_area(&mut self, area: Rect, offset: usize) {
        self.playlist_area = area;
        self.playlist_offset = offset;
    }

    pub(super) fn set_progress_area(&mut self, area: Rect) {
        self.progress_area = area;
    }

    /// Map a left click at (`column`, `row`) to the event it activates.
    pub fn click(&self, column: u16, row: u16) -> Option<InputEvent> {
        let at = Position::new(column, row);

        if self.progress_area.contains(at) {
            let width = f64::from(self.progress_area.width.max(1));
            let fraction = f64::from(column - self.progress_area.x) / width;
            return Some(InputEvent::ProgressBar(fraction.clamp(0.0, 1.0)));
        }

        if self.playlist_area.contains(at) {
            let index = self.playlist_offset + usize::from(row - self.playlist_area.y);
            if index < self.tracks.len() {
                return Some(InputEvent::PlaylistItem(index));
            }
        }
        None
    }
}

impl RenderPort for WidgetView {
    fn render_playlist(&mut self, tracks: &[Track]) {
        self.tracks = tracks.to_vec();
        self.cursor = self.cursor.min(self.tracks.len().saturating_sub(1));
    }

    fn highlight_track(&mut self, index: usize) {
        self.highlighted = index;
        self.cursor = index;
    }

    fn render_track_details(&mut self, track: &Track) {
        self.details = Some(track.clone());
    }

    fn set_thumbnail(&mut self, url: &str) {
        self.thumbnail = url.to_string();
    }

    fn set_progress_fill(&mut self, percentage: f64) {
        self.fill = percentage.clamp(0.0, 100.0);
    }

    fn set_elapsed_time_text(&mut self, text: &str) {
        self.elapsed = text.to_string();
    }

    fn set_total_time_text(&mut self, text: &str) {
        self.total = text.to_string();
    }

    fn set_transport_button_state(&mut self, action: TransportAction) {
        self.button = action;
    }
}
