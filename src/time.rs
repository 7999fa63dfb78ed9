//! Time and progress helpers used by the controller's views.
//!
//! Both helpers accept the raw `f64` seconds the playback primitive reports,
//! which may be NaN before metadata is known.

/// Format a number of seconds as `MM:SS`.
///
/// Minutes are not rolled over into hours, so `3661.0` renders as `61:01`.
/// A component that is not a finite, non-negative number renders as `00`.
pub fn format_clock(seconds: f64) -> String {
    let minutes = clock_component((seconds / 60.0).floor());
    let secs = clock_component((seconds % 60.0).floor());
    format!("{minutes}:{secs}")
}

fn clock_component(value: f64) -> String {
    if value.is_finite() && value >= 0.0 {
        format!("{:02}", value as u64)
    } else {
        "00".to_string()
    }
}

/// Progress through the track as a percentage in `[0, 100]`.
///
/// An unknown, zero or negative `duration` yields `0.0`.
pub fn progress_percentage(current: f64, duration: f64) -> f64 {
    if !has_known_duration(duration) || !current.is_finite() {
        return 0.0;
    }
    (current * 100.0 / duration).clamp(0.0, 100.0)
}

/// Whether `duration` is usable for seeking and progress math.
pub fn has_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}
