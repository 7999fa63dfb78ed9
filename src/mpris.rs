use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use playbar::{ControlAction, InputEvent, Track, TransportAction, TransportState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

impl ControlCmd {
    /// The input event this command stands for. `PlayPause` follows the
    /// action the transport button currently offers. `Quit` has no event.
    pub fn to_event(self, offered: TransportAction) -> Option<InputEvent> {
        let action = match self {
            ControlCmd::Quit => return None,
            ControlCmd::Play => ControlAction::Play,
            ControlCmd::Pause => ControlAction::Pause,
            ControlCmd::PlayPause => match offered {
                TransportAction::Play => ControlAction::Play,
                TransportAction::Pause => ControlAction::Pause,
            },
            ControlCmd::Stop => ControlAction::Stop,
            ControlCmd::Next => ControlAction::Next,
            ControlCmd::Prev => ControlAction::Prev,
        };
        Some(InputEvent::Control(action))
    }
}

#[derive(Debug, Default)]
struct SharedState {
    playback: TransportState,
    track_id: Option<String>,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: TransportState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Publish `track` at `index`. `duration` is in seconds and only
    /// published when known.
    pub fn set_track_metadata(&self, index: usize, track: &Track, duration: f64) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.track_id = Some(format!("/org/mpris/MediaPlayer2/track/{index}"));
        s.title = Some(track.track_name.clone());
        s.artist = vec![track.track_artist.clone()];
        s.album = Some(track.track_album.clone());
        s.url = Some(track.file_url.clone());
        s.art_url = Some(track.thumb_url.clone()).filter(|u| !u.is_empty());
        s.length_micros = (duration.is_finite() && duration > 0.0)
            .then(|| (duration * 1_000_000.0).round() as i64);
    }
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "playbar"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            TransportState::Stopped => "Stopped",
            TransportState::Playing => "Playing",
            TransportState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut insert = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        let track_id = s
            .track_id
            .as_deref()
            .and_then(|id| ObjectPath::try_from(id).ok());
        insert("mpris:trackid", track_id.and_then(|p| owned(Value::from(p))));
        insert(
            "xesam:title",
            s.title.clone().and_then(|t| owned(Value::from(t))),
        );
        if !s.artist.is_empty() {
            insert("xesam:artist", owned(Value::from(s.artist.clone())));
        }
        insert(
            "xesam:album",
            s.album.clone().and_then(|a| owned(Value::from(a))),
        );
        insert("xesam:url", s.url.clone().and_then(|u| owned(Value::from(u))));
        insert(
            "mpris:artUrl",
            s.art_url.clone().and_then(|u| owned(Value::from(u))),
        );
        insert(
            "mpris:length",
            s.length_micros.and_then(|l| owned(Value::from(l))),
        );
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(error = %e, "mpris: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.playbar")
                .await
            {
                tracing::warn!(error = %e, "mpris: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                tracing::warn!(error = %e, "mpris: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                tracing::warn!(error = %e, "mpris: failed to register player iface");
                return;
            }

            tracing::info!("mpris: service registered");
            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
