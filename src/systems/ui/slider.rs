use bevy::prelude::*;
use smallvec::smallvec;

use super::{
    commands::{CommandPayload, Reactions, WidgetTrigger},
    transform::NodeTransform,
};

pub const DEFAULT_SLIDER_WIDTH: f32 = 6.0;
pub const DEFAULT_SLIDER_HEIGHT: f32 = 1.0;
/// Changes at or below this are not reported.
pub const VALUE_EPSILON: f32 = 1e-4;
const RANGE_EPSILON: f32 = 1e-4;
const PLANE_EPSILON: f32 = 1e-4;

/// Continuous value control dragged along its local X axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderState {
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
}

impl SliderState {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Clamps into `[min, max]` and stores. Returns the new value when it moved by more
    /// than [`VALUE_EPSILON`].
    pub fn set_value(&mut self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.clamp(self.min, self.max);
        if (clamped - self.value).abs() > VALUE_EPSILON {
            self.value = clamped;
            Some(clamped)
        } else {
            None
        }
    }

    pub fn percent(&self) -> f32 {
        let range = self.max - self.min;
        if range <= RANGE_EPSILON {
            0.5
        } else {
            (self.value - self.min) / range
        }
    }

    /// Handle position along local X for a track of the given width.
    pub fn handle_offset(&self, width: f32) -> f32 {
        (self.percent() - 0.5) * width
    }

    /// Intersects a world ray with the slider's local depth-zero plane and maps the hit
    /// onto the value range. Parallel rays and hits behind the origin keep the
    /// current value.
    pub fn value_from_ray(
        &self,
        world: &NodeTransform,
        width: f32,
        origin: Vec3,
        direction: Vec3,
    ) -> f32 {
        let Some((local_origin, local_direction)) = world.to_local_ray(origin, direction) else {
            return self.value;
        };
        if local_direction.y.abs() < PLANE_EPSILON || width.abs() <= f32::EPSILON {
            return self.value;
        }
        let t = -local_origin.y / local_direction.y;
        if t < 0.0 {
            return self.value;
        }
        let hit = local_origin + local_direction * t;
        let percent = (hit.x / width + 0.5).clamp(0.0, 1.0);
        self.min + percent * (self.max - self.min)
    }

    pub fn enter(&self) -> Reactions {
        smallvec![(WidgetTrigger::Hover, CommandPayload::Hovered(true))]
    }

    pub fn exit(&self) -> Reactions {
        smallvec![(WidgetTrigger::Hover, CommandPayload::Hovered(false))]
    }

    pub fn press(&mut self) -> Reactions {
        self.dragging = true;
        smallvec![(WidgetTrigger::Press, CommandPayload::None)]
    }

    pub fn release(&mut self) -> Reactions {
        self.dragging = false;
        smallvec![(WidgetTrigger::Release, CommandPayload::None)]
    }

    pub fn reset(&mut self) {
        self.dragging = false;
    }
}
