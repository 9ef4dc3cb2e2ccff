pub const LASER_SMOOTHING_RATE: f32 = 15.0;

/// Length of the pointer beam, smoothed towards the current hit distance.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LaserPointer {
    length: f32,
    visible: bool,
}

impl LaserPointer {
    /// Snaps on the first frame after being hidden, then eases exponentially.
    pub fn update(&mut self, target_length: f32, delta: f32) {
        if !self.visible {
            self.visible = true;
            self.length = target_length;
            return;
        }
        let blend = 1.0 - (-LASER_SMOOTHING_RATE * delta).exp();
        self.length += (target_length - self.length) * blend;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn length(&self) -> Option<f32> {
        self.visible.then_some(self.length)
    }
}
