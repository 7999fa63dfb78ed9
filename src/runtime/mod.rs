use std::env;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use playbar::PlayerController;

use crate::audio::RodioPrimitive;
use crate::mpris::ControlCmd;
use crate::ui::WidgetView;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;
mod timer;

use timer::IntervalScheduler;

/// The controller as hosted in the terminal.
pub type HostController = PlayerController<RodioPrimitive, WidgetView, IntervalScheduler>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    logging::init(&settings.log)?;
    if let Some(reason) = fallback {
        tracing::warn!("{reason}");
    }

    let playlist = startup::build_playlist(&settings, env::args().nth(1))?;
    let options = startup::controller_options(&settings);

    let timers = IntervalScheduler::new();
    let mut controller = PlayerController::new(
        playlist,
        options,
        RodioPrimitive::new()?,
        WidgetView::new(),
        timers.clone(),
    )?;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &timers,
        &mpris,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
