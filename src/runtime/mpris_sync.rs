use playbar::{PlaybackPrimitive, TransportState};

use crate::mpris::MprisHandle;

use super::HostController;

/// What was last published to MPRIS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Published {
    index: usize,
    state: TransportState,
    duration_known: bool,
}

impl Published {
    fn of(controller: &HostController) -> Self {
        Self {
            index: controller.current_index(),
            state: controller.transport_state(),
            duration_known: controller.primitive().duration().is_finite(),
        }
    }
}

/// Push playback status and track metadata when they changed since `last`.
pub fn update_mpris(mpris: &MprisHandle, controller: &HostController, last: &mut Option<Published>) {
    let now = Published::of(controller);
    if *last == Some(now) {
        return;
    }

    mpris.set_track_metadata(
        controller.current_index(),
        controller.current_track(),
        controller.primitive().duration(),
    );
    mpris.set_playback(controller.transport_state());
    *last = Some(now);
}
