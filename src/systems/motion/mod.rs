/// Frames of delay added per position in a staggered reveal.
pub const STAGGER_FRAMES: u32 = 2;
pub const DEFAULT_ENTRANCE_SPEED: f32 = 4.0;

pub fn ease_out_cubic(t: f32) -> f32 {
    let inverse = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inverse * inverse * inverse
}

pub fn stagger_delay(visible_index: usize) -> u32 {
    u32::try_from(visible_index)
        .unwrap_or(u32::MAX / STAGGER_FRAMES)
        .saturating_mul(STAGGER_FRAMES)
}

/// Scale-in played when a widget is revealed.
///
/// While frames of delay remain the widget is held at zero scale; after that the
/// progress advances with the frame delta and the factor eases out towards one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceAnimation {
    progress: f32,
    delay_frames: u32,
}

impl Default for EntranceAnimation {
    fn default() -> Self {
        Self {
            progress: 1.0,
            delay_frames: 0,
        }
    }
}

impl EntranceAnimation {
    pub fn start(&mut self, delay_frames: u32) {
        self.progress = 0.0;
        self.delay_frames = delay_frames;
    }

    pub fn finish(&mut self) {
        self.progress = 1.0;
        self.delay_frames = 0;
    }

    pub fn tick(&mut self, delta: f32, speed: f32) {
        if self.delay_frames > 0 {
            self.delay_frames -= 1;
            return;
        }
        if self.progress < 1.0 {
            self.progress = (self.progress + delta * speed).min(1.0);
        }
    }

    /// Multiplier applied on top of the widget's base scale.
    pub fn factor(&self) -> f32 {
        if self.delay_frames > 0 {
            0.0
        } else {
            ease_out_cubic(self.progress)
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn delay_frames(&self) -> u32 {
        self.delay_frames
    }

    pub fn is_finished(&self) -> bool {
        self.delay_frames == 0 && self.progress >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_animation_is_full_scale() {
        let animation = EntranceAnimation::default();
        assert_eq!(animation.factor(), 1.0);
        assert!(animation.is_finished());
    }

    #[test]
    fn delay_holds_zero_scale_then_eases_in() {
        let mut animation = EntranceAnimation::default();
        animation.start(stagger_delay(2));
        assert_eq!(animation.delay_frames(), 4);

        for _ in 0..4 {
            assert_eq!(animation.factor(), 0.0);
            animation.tick(0.016, DEFAULT_ENTRANCE_SPEED);
        }
        assert_eq!(animation.progress(), 0.0);

        animation.tick(0.125, DEFAULT_ENTRANCE_SPEED);
        assert!((animation.progress() - 0.5).abs() < 1e-6);
        assert!((animation.factor() - 0.875).abs() < 1e-6);

        animation.tick(10.0, DEFAULT_ENTRANCE_SPEED);
        assert_eq!(animation.progress(), 1.0);
        assert_eq!(animation.factor(), 1.0);
    }

    #[test]
    fn ease_is_monotonic_and_clamped() {
        let mut previous = 0.0;
        for step in 0..=20 {
            let value = ease_out_cubic(step as f32 / 20.0);
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
