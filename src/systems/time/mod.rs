use bevy::prelude::*;

/// Substituted for frame deltas that are zero, negative, non-finite or longer than
/// [`MAX_FRAME_DELTA`].
pub const FALLBACK_FRAME_DELTA: f32 = 1.0 / 60.0;
pub const MAX_FRAME_DELTA: f32 = 0.5;

pub fn clamp_frame_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 && delta <= MAX_FRAME_DELTA {
        delta
    } else {
        FALLBACK_FRAME_DELTA
    }
}

/// The app's last frame delta, clamped for the menu.
pub fn frame_delta(time: &Time) -> f32 {
    clamp_frame_delta(time.delta_secs())
}
