use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use playbar::{ControlAction, InputEvent, TransportAction, config};

use crate::mpris::{ControlCmd, MprisHandle};
use crate::ui::{self, WidgetView};

use super::HostController;
use super::mpris_sync::{Published, update_mpris};
use super::timer::IntervalScheduler;

/// Upper bound on how long the loop blocks on terminal input, so MPRIS
/// commands are picked up while no timer is running.
const IDLE_WAIT: Duration = Duration::from_millis(200);

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyAction {
    Quit,
    CursorUp,
    CursorDown,
    Input(InputEvent),
}

/// Map a key to its action. `space`/`p` trigger whatever the transport
/// button offers, `enter` activates the row under the cursor.
fn key_action(key: KeyEvent, view: &WidgetView) -> Option<KeyAction> {
    let control = |a| Some(KeyAction::Input(InputEvent::Control(a)));
    match key.code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(KeyAction::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(KeyAction::CursorUp),
        KeyCode::Char('h') | KeyCode::Left => control(ControlAction::Prev),
        KeyCode::Char('l') | KeyCode::Right => control(ControlAction::Next),
        KeyCode::Char('s') => control(ControlAction::Stop),
        KeyCode::Char(' ') | KeyCode::Char('p') => match view.button() {
            TransportAction::Play => control(ControlAction::Play),
            TransportAction::Pause => control(ControlAction::Pause),
        },
        KeyCode::Enter => Some(KeyAction::Input(InputEvent::PlaylistItem(view.cursor()))),
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|n| KeyAction::Input(InputEvent::ProgressBar(f64::from(n) / 10.0))),
        _ => None,
    }
}

fn mouse_input(mouse: MouseEvent, view: &WidgetView) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => view.click(mouse.column, mouse.row),
        _ => None,
    }
}

/// Dispatch one event and follow up with the metadata notification when the
/// primitive learned a duration while handling it.
fn dispatch(controller: &mut HostController, event: InputEvent) {
    if let Err(e) = controller.dispatch(event) {
        tracing::warn!(?event, error = %e, "input rejected");
    }
    if controller.primitive_mut().take_metadata_loaded() {
        if let Err(e) = controller.dispatch(InputEvent::MetadataLoaded) {
            tracing::warn!(error = %e, "metadata refresh failed");
        }
    }
}

fn wait_timeout(timers: &IntervalScheduler) -> Duration {
    timers
        .next_due()
        .map(|due| due.saturating_duration_since(Instant::now()))
        .map_or(IDLE_WAIT, |d| d.min(IDLE_WAIT))
}

/// Main terminal event loop: draws the widget, turns terminal input, MPRIS
/// commands and due timers into input events. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut HostController,
    timers: &IntervalScheduler,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut published: Option<Published> = None;

    // Priming may already have read the duration of the default track.
    if controller.primitive_mut().take_metadata_loaded() {
        dispatch(controller, InputEvent::MetadataLoaded);
    }

    loop {
        update_mpris(mpris, controller, &mut published);

        terminal.draw(|f| ui::draw(f, controller.render_port_mut(), &settings.ui.header_text))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if cmd == ControlCmd::Quit {
                return Ok(());
            }
            if let Some(event) = cmd.to_event(controller.render_port().button()) {
                dispatch(controller, event);
            }
        }

        if event::poll(wait_timeout(timers))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key_action(key, controller.render_port()) {
                        Some(KeyAction::Quit) => return Ok(()),
                        Some(KeyAction::CursorUp) => controller.render_port_mut().cursor_up(),
                        Some(KeyAction::CursorDown) => controller.render_port_mut().cursor_down(),
                        Some(KeyAction::Input(event)) => dispatch(controller, event),
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(event) = mouse_input(mouse, controller.render_port()) {
                        dispatch(controller, event);
                    }
                }
                _ => {}
            }
        }

        if timers.take_due(Instant::now()) > 0 {
            dispatch(controller, InputEvent::Tick);
        }
    }
}
