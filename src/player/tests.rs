use super::*;
use crate::error::PlayerError;
use crate::playlist::{Playlist, Track};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct FakePrimitive {
    loaded: Vec<String>,
    playing: bool,
    play_calls: usize,
    position: f64,
    duration: f64,
    ended: bool,
}

impl FakePrimitive {
    fn new() -> Self {
        Self {
            duration: f64::NAN,
            ..Self::default()
        }
    }
}

impl PlaybackPrimitive for FakePrimitive {
    fn load(&mut self, url: &str) {
        self.loaded.push(url.to_string());
        self.position = 0.0;
        self.ended = false;
    }

    fn play(&mut self) {
        self.playing = true;
        self.play_calls += 1;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn ended(&self) -> bool {
        self.ended
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ViewCall {
    Playlist(usize),
    Highlight(usize),
    Details(String),
    Thumbnail(String),
    Fill(f64),
    Elapsed(String),
    Total(String),
    Button(TransportAction),
}

#[derive(Debug, Default)]
struct FakeView {
    calls: Vec<ViewCall>,
}

impl FakeView {
    fn last_fill(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::Fill(p) => Some(*p),
            _ => None,
        })
    }

    fn last_elapsed(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::Elapsed(t) => Some(t.as_str()),
            _ => None,
        })
    }

    fn last_total(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::Total(t) => Some(t.as_str()),
            _ => None,
        })
    }

    fn last_button(&self) -> Option<TransportAction> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::Button(a) => Some(*a),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl RenderPort for FakeView {
    fn render_playlist(&mut self, tracks: &[Track]) {
        self.calls.push(ViewCall::Playlist(tracks.len()));
    }

    fn highlight_track(&mut self, index: usize) {
        self.calls.push(ViewCall::Highlight(index));
    }

    fn render_track_details(&mut self, track: &Track) {
        self.calls.push(ViewCall::Details(track.track_name.clone()));
    }

    fn set_thumbnail(&mut self, url: &str) {
        self.calls.push(ViewCall::Thumbnail(url.to_string()));
    }

    fn set_progress_fill(&mut self, percentage: f64) {
        self.calls.push(ViewCall::Fill(percentage));
    }

    fn set_elapsed_time_text(&mut self, text: &str) {
        self.calls.push(ViewCall::Elapsed(text.to_string()));
    }

    fn set_total_time_text(&mut self, text: &str) {
        self.calls.push(ViewCall::Total(text.to_string()));
    }

    fn set_transport_button_state(&mut self, action: TransportAction) {
        self.calls.push(ViewCall::Button(action));
    }
}

#[derive(Debug, Default)]
struct TimerLog {
    next_id: u64,
    active: Vec<PollHandle>,
    created: usize,
    cancelled: usize,
    intervals: Vec<Duration>,
}

#[derive(Debug, Default, Clone)]
struct FakeScheduler {
    log: Rc<RefCell<TimerLog>>,
}

impl Scheduler for FakeScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> PollHandle {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let handle = PollHandle(log.next_id);
        log.active.push(handle);
        log.created += 1;
        log.intervals.push(interval);
        handle
    }

    fn cancel(&mut self, handle: PollHandle) {
        let mut log = self.log.borrow_mut();
        log.active.retain(|h| *h != handle);
        log.cancelled += 1;
    }
}

type TestController = PlayerController<FakePrimitive, FakeView, FakeScheduler>;

fn track(i: usize) -> Track {
    Track {
        file_url: format!("/music/{i}.mp3"),
        thumb_url: format!("/thumbs/{i}.png"),
        track_name: format!("Track {i}"),
        track_artist: "Artist".to_string(),
        track_album: "Album".to_string(),
    }
}

fn playlist(n: usize) -> Playlist {
    Playlist::new((0..n).map(track).collect())
}

fn controller_with(n: usize, options: ControllerOptions) -> (TestController, FakeScheduler) {
    let scheduler = FakeScheduler::default();
    let controller = PlayerController::new(
        playlist(n),
        options,
        FakePrimitive::new(),
        FakeView::default(),
        scheduler.clone(),
    )
    .unwrap();
    (controller, scheduler)
}

fn controller(n: usize, default_track: usize) -> (TestController, FakeScheduler) {
    controller_with(
        n,
        ControllerOptions {
            default_track,
            ..ControllerOptions::default()
        },
    )
}

#[test]
fn startup_loads_default_track_and_stays_stopped() {
    let (c, timers) = controller(3, 1);

    assert_eq!(c.current_index(), 1);
    assert_eq!(c.transport_state(), TransportState::Stopped);
    assert_eq!(c.primitive().loaded, vec!["/music/1.mp3".to_string()]);
    assert!(!c.primitive().playing);
    assert_eq!(c.poll_handle(), None);
    assert_eq!(timers.log.borrow().created, 0);

    let view = c.render_port();
    assert_eq!(view.calls[0], ViewCall::Playlist(3));
    assert_eq!(view.last_fill(), Some(0.0));
    assert_eq!(view.last_elapsed(), Some("00:00"));
    assert_eq!(view.last_total(), Some("00:00"));
    assert_eq!(view.last_button(), Some(TransportAction::Play));
    assert!(view.calls.contains(&ViewCall::Highlight(1)));
    assert!(view.calls.contains(&ViewCall::Thumbnail("/thumbs/1.png".to_string())));
    assert!(view.calls.contains(&ViewCall::Details("Track 1".to_string())));
}

#[test]
fn startup_does_not_autoplay() {
    let (c, _) = controller_with(
        2,
        ControllerOptions {
            auto_play: true,
            ..ControllerOptions::default()
        },
    );
    assert_eq!(c.transport_state(), TransportState::Stopped);
    assert!(!c.primitive().playing);
    assert_eq!(c.poll_handle(), None);
}

#[test]
fn default_track_is_clamped_into_bounds() {
    let (c, _) = controller(3, 10);
    assert_eq!(c.current_index(), 2);
}

#[test]
fn empty_playlist_fails_explicitly() {
    let result = PlayerController::new(
        Playlist::default(),
        ControllerOptions::default(),
        FakePrimitive::new(),
        FakeView::default(),
        FakeScheduler::default(),
    );
    assert!(matches!(result, Err(PlayerError::EmptyPlaylist)));
}

#[test]
fn select_track_refreshes_views_once_for_each_index() {
    let (mut c, _) = controller(4, 0);

    for i in 0..4 {
        c.render_port_mut().calls.clear();
        c.select_track(i).unwrap();

        assert_eq!(c.current_index(), i);
        assert_eq!(c.primitive().loaded.last(), Some(&format!("/music/{i}.mp3")));

        let view = c.render_port();
        assert_eq!(view.count(|v| matches!(v, ViewCall::Highlight(_))), 1);
        assert_eq!(view.count(|v| matches!(v, ViewCall::Thumbnail(_))), 1);
        assert_eq!(view.count(|v| matches!(v, ViewCall::Details(_))), 1);
        assert!(view.calls.contains(&ViewCall::Highlight(i)));
        assert!(view.calls.contains(&ViewCall::Thumbnail(format!("/thumbs/{i}.png"))));
        assert!(view.calls.contains(&ViewCall::Details(format!("Track {i}"))));
    }
}

#[test]
fn select_track_does_not_touch_progress_views() {
    let (mut c, _) = controller(3, 0);
    c.render_port_mut().calls.clear();
    c.select_track(2).unwrap();

    let view = c.render_port();
    assert_eq!(view.count(|v| matches!(v, ViewCall::Fill(_))), 0);
    assert_eq!(view.count(|v| matches!(v, ViewCall::Elapsed(_))), 0);
}

#[test]
fn select_track_out_of_range_is_rejected_without_change() {
    let (mut c, _) = controller(3, 1);
    let loads_before = c.primitive().loaded.len();

    assert_eq!(
        c.select_track(3),
        Err(PlayerError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.primitive().loaded.len(), loads_before);
}

#[test]
fn select_track_while_paused_loads_without_playing() {
    let (mut c, timers) = controller(3, 0);
    c.play().unwrap();
    c.pause().unwrap();

    c.select_track(2).unwrap();
    assert_eq!(c.transport_state(), TransportState::Paused);
    assert!(!c.primitive().playing);
    assert_eq!(c.poll_handle(), None);
    assert!(timers.log.borrow().active.is_empty());
}

#[test]
fn select_track_with_auto_play_starts_playback() {
    let (mut c, timers) = controller_with(
        3,
        ControllerOptions {
            auto_play: true,
            ..ControllerOptions::default()
        },
    );
    c.select_track(2).unwrap();

    assert_eq!(c.transport_state(), TransportState::Playing);
    assert!(c.primitive().playing);
    assert_eq!(timers.log.borrow().active.len(), 1);
}

#[test]
fn play_twice_keeps_exactly_one_poll_handle() {
    let (mut c, timers) = controller(2, 0);
    c.play().unwrap();
    c.play().unwrap();

    let log = timers.log.borrow();
    assert_eq!(log.active.len(), 1);
    assert_eq!(log.created, 1);
    assert_eq!(c.poll_handle(), Some(log.active[0]));
    assert_eq!(c.transport_state(), TransportState::Playing);
    assert_eq!(c.primitive().play_calls, 2);
    assert_eq!(c.render_port().last_button(), Some(TransportAction::Pause));
}

#[test]
fn play_uses_configured_poll_interval() {
    let (mut c, timers) = controller_with(
        2,
        ControllerOptions {
            poll_interval: Duration::from_millis(120),
            ..ControllerOptions::default()
        },
    );
    c.play().unwrap();
    assert_eq!(timers.log.borrow().intervals, vec![Duration::from_millis(120)]);
}

#[test]
fn pause_cancels_poll_and_offers_play() {
    let (mut c, timers) = controller(2, 0);
    c.play().unwrap();
    c.pause().unwrap();

    assert_eq!(c.transport_state(), TransportState::Paused);
    assert_eq!(c.poll_handle(), None);
    assert!(timers.log.borrow().active.is_empty());
    assert!(!c.primitive().playing);
    assert_eq!(c.render_port().last_button(), Some(TransportAction::Play));
}

#[test]
fn stop_resets_progress_regardless_of_position() {
    let (mut c, timers) = controller(2, 0);
    c.primitive_mut().duration = 200.0;
    c.play().unwrap();
    c.seek_to(0.75).unwrap();
    assert_eq!(c.render_port().last_fill(), Some(75.0));

    c.stop().unwrap();
    assert_eq!(c.transport_state(), TransportState::Stopped);
    assert_eq!(c.primitive().position, 0.0);
    assert_eq!(c.render_port().last_fill(), Some(0.0));
    assert_eq!(c.render_port().last_elapsed(), Some("00:00"));
    assert_eq!(c.poll_handle(), None);
    assert!(timers.log.borrow().active.is_empty());
}

#[test]
fn next_and_prev_wrap_around() {
    let (mut c, _) = controller(3, 2);
    c.next().unwrap();
    assert_eq!(c.current_index(), 0);

    c.prev().unwrap();
    assert_eq!(c.current_index(), 2);
}

#[test]
fn single_track_playlist_wraps_onto_itself() {
    let (mut c, _) = controller(1, 0);
    c.next().unwrap();
    assert_eq!(c.current_index(), 0);
    c.prev().unwrap();
    assert_eq!(c.current_index(), 0);
}

#[test]
fn next_while_playing_replaces_the_poll_handle() {
    let (mut c, timers) = controller(3, 0);
    c.play().unwrap();
    let first = c.poll_handle().unwrap();

    c.next().unwrap();
    let log = timers.log.borrow();
    assert_eq!(log.active.len(), 1);
    assert_ne!(log.active[0], first);
    assert_eq!(c.transport_state(), TransportState::Playing);
}

#[test]
fn tick_at_end_of_track_advances_and_keeps_one_poll_handle() {
    let (mut c, timers) = controller(3, 1);
    c.play().unwrap();
    assert_eq!(timers.log.borrow().active.len(), 1);

    c.primitive_mut().ended = true;
    c.on_tick().unwrap();

    assert_eq!(c.current_index(), 2);
    assert_eq!(c.transport_state(), TransportState::Playing);
    assert_eq!(c.primitive().loaded.last(), Some(&"/music/2.mp3".to_string()));

    let log = timers.log.borrow();
    assert_eq!(log.active.len(), 1);
    assert_eq!(log.created, 2);
    assert_eq!(log.cancelled, 1);
}

#[test]
fn tick_updates_progress_from_primitive_position() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().duration = 200.0;
    c.play().unwrap();

    c.primitive_mut().position = 125.0;
    c.on_tick().unwrap();

    assert_eq!(c.elapsed_seconds(), 125.0);
    assert_eq!(c.render_port().last_fill(), Some(62.5));
    assert_eq!(c.render_port().last_elapsed(), Some("02:05"));
}

#[test]
fn stale_tick_while_not_playing_is_ignored() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().ended = true;
    c.render_port_mut().calls.clear();

    c.on_tick().unwrap();
    assert_eq!(c.current_index(), 0);
    assert!(c.render_port().calls.is_empty());
}

#[test]
fn seek_with_known_duration_updates_fill_immediately() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().duration = 200.0;

    c.seek_to(0.5).unwrap();
    assert_eq!(c.primitive().position, 100.0);
    assert_eq!(c.render_port().last_fill(), Some(50.0));
    assert_eq!(c.render_port().last_elapsed(), Some("01:40"));
}

#[test]
fn seek_with_unknown_duration_fails_without_change() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().position = 12.0;
    c.render_port_mut().calls.clear();

    assert_eq!(c.seek_to(0.5), Err(PlayerError::SeekUnavailable));
    assert_eq!(c.primitive().position, 12.0);
    assert!(c.render_port().calls.is_empty());
}

#[test]
fn seek_rejects_non_finite_fraction_and_clamps_others() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().duration = 100.0;

    assert!(matches!(
        c.seek_to(f64::NAN),
        Err(PlayerError::InvalidFraction(_))
    ));
    c.seek_to(1.5).unwrap();
    assert_eq!(c.primitive().position, 100.0);
    assert_eq!(c.render_port().last_fill(), Some(100.0));
}

#[test]
fn metadata_loaded_refreshes_all_time_views() {
    let (mut c, _) = controller(2, 0);
    c.primitive_mut().duration = 3661.0;
    c.render_port_mut().calls.clear();

    c.on_metadata_loaded().unwrap();
    let view = c.render_port();
    assert_eq!(view.last_total(), Some("61:01"));
    assert_eq!(view.last_elapsed(), Some("00:00"));
    assert_eq!(view.last_fill(), Some(0.0));
}

#[test]
fn dropping_the_controller_cancels_the_poll_handle() {
    let (mut c, timers) = controller(2, 0);
    c.play().unwrap();
    assert_eq!(timers.log.borrow().active.len(), 1);

    drop(c);
    assert!(timers.log.borrow().active.is_empty());
}

#[test]
fn dispatch_routes_controls_and_pointer_events() {
    let (mut c, _) = controller(3, 0);
    c.primitive_mut().duration = 200.0;

    c.dispatch(InputEvent::Control(ControlAction::Play)).unwrap();
    assert_eq!(c.transport_state(), TransportState::Playing);

    c.dispatch(InputEvent::Control(ControlAction::Next)).unwrap();
    assert_eq!(c.current_index(), 1);

    c.dispatch(InputEvent::Control(ControlAction::Prev)).unwrap();
    assert_eq!(c.current_index(), 0);

    c.dispatch(InputEvent::ProgressBar(0.25)).unwrap();
    assert_eq!(c.primitive().position, 50.0);

    c.dispatch(InputEvent::Control(ControlAction::Pause)).unwrap();
    assert_eq!(c.transport_state(), TransportState::Paused);

    c.dispatch(InputEvent::PlaylistItem(2)).unwrap();
    assert_eq!(c.current_index(), 2);

    c.dispatch(InputEvent::Control(ControlAction::Stop)).unwrap();
    assert_eq!(c.transport_state(), TransportState::Stopped);
}

#[test]
fn dispatch_ignores_activation_of_current_item() {
    let (mut c, _) = controller(3, 1);
    let loads_before = c.primitive().loaded.len();
    c.render_port_mut().calls.clear();

    c.dispatch(InputEvent::PlaylistItem(1)).unwrap();
    assert_eq!(c.primitive().loaded.len(), loads_before);
    assert!(c.render_port().calls.is_empty());
}

#[test]
fn dispatch_reports_rejected_operations() {
    let (mut c, _) = controller(3, 0);
    assert_eq!(
        c.dispatch(InputEvent::PlaylistItem(7)),
        Err(PlayerError::IndexOutOfRange { index: 7, len: 3 })
    );
    assert_eq!(
        c.dispatch(InputEvent::ProgressBar(0.5)),
        Err(PlayerError::SeekUnavailable)
    );
}

proptest! {
    #[test]
    fn next_then_prev_returns_to_start(len in 1usize..20, start in 0usize..20) {
        let (mut c, _) = controller(len, start);
        let origin = c.current_index();

        c.next().unwrap();
        c.prev().unwrap();
        prop_assert_eq!(c.current_index(), origin);

        c.prev().unwrap();
        c.next().unwrap();
        prop_assert_eq!(c.current_index(), origin);
    }

    #[test]
    fn fill_is_never_out_of_bounds(
        duration in proptest::num::f64::ANY,
        position in proptest::num::f64::ANY,
    ) {
        let (mut c, _) = controller(2, 0);
        c.primitive_mut().duration = duration;
        c.play().unwrap();
        c.primitive_mut().position = position;
        c.on_tick().unwrap();
        let _ = c.seek_to(0.5);

        for call in &c.render_port().calls {
            if let ViewCall::Fill(p) = call {
                prop_assert!(!p.is_nan());
                prop_assert!((0.0..=100.0).contains(p));
            }
        }
    }
}
