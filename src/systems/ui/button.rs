use super::commands::{CommandPayload, Reactions, WidgetTrigger};
use smallvec::smallvec;

pub const HOVERED_SCALE: f32 = 1.1;
pub const PRESSED_SCALE: f32 = 0.9;
pub const SCALE_BLEND_RATE: f32 = 10.0;
pub const SCALE_SETTLE_EPSILON: f32 = 0.001;
/// Depth a latched toggle is pushed in by.
pub const TOGGLE_DEPTH_OFFSET: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVisual {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

impl ButtonVisual {
    pub fn target_scale(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Hovered => HOVERED_SCALE,
            Self::Pressed => PRESSED_SCALE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonState {
    visual: ButtonVisual,
    hovered: bool,
    current_scale: f32,
    pub label: String,
    pub sublabel: String,
    pub slot_index: Option<usize>,
    pub mesh: Option<String>,
    pub texture: Option<String>,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            visual: ButtonVisual::Normal,
            hovered: false,
            current_scale: 1.0,
            label: String::new(),
            sublabel: String::new(),
            slot_index: None,
            mesh: None,
            texture: None,
        }
    }
}

impl ButtonState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = sublabel.into();
        self
    }

    pub fn with_slot(mut self, slot_index: usize) -> Self {
        self.slot_index = Some(slot_index);
        self
    }

    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn visual(&self) -> ButtonVisual {
        self.visual
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    pub fn tick(&mut self, delta: f32) {
        let target = self.visual.target_scale();
        let difference = target - self.current_scale;
        if difference.abs() > SCALE_SETTLE_EPSILON {
            let blend = (delta * SCALE_BLEND_RATE).min(1.0);
            self.current_scale += difference * blend;
        }
    }

    pub fn enter(&mut self) -> Reactions {
        self.hovered = true;
        if self.visual != ButtonVisual::Pressed {
            self.visual = ButtonVisual::Hovered;
        }
        smallvec![(WidgetTrigger::Hover, CommandPayload::Hovered(true))]
    }

    pub fn exit(&mut self) -> Reactions {
        self.hovered = false;
        if self.visual != ButtonVisual::Pressed {
            self.visual = ButtonVisual::Normal;
        }
        smallvec![(WidgetTrigger::Hover, CommandPayload::Hovered(false))]
    }

    pub fn press(&mut self) -> Reactions {
        self.visual = ButtonVisual::Pressed;
        smallvec![(WidgetTrigger::Press, CommandPayload::None)]
    }

    /// Back to `Hovered` when the pointer is still on the button.
    pub fn release(&mut self) -> Reactions {
        self.visual = if self.hovered {
            ButtonVisual::Hovered
        } else {
            ButtonVisual::Normal
        };
        smallvec![(WidgetTrigger::Release, CommandPayload::None)]
    }

    /// Drops back to `Normal` without firing anything.
    pub fn reset(&mut self) {
        self.visual = ButtonVisual::Normal;
        self.hovered = false;
    }
}

/// A button that latches on every press.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ToggleState {
    pub button: ButtonState,
    toggled: bool,
}

impl ToggleState {
    pub fn new(button: ButtonState, toggled: bool) -> Self {
        Self { button, toggled }
    }

    pub fn is_toggled(&self) -> bool {
        self.toggled
    }

    pub fn set_toggled(&mut self, toggled: bool) {
        self.toggled = toggled;
    }

    pub fn depth_offset(&self) -> f32 {
        if self.toggled {
            TOGGLE_DEPTH_OFFSET
        } else {
            0.0
        }
    }

    pub fn press(&mut self) -> Reactions {
        let mut reactions = self.button.press();
        self.toggled = !self.toggled;
        reactions.push((WidgetTrigger::Toggle, CommandPayload::Toggled(self.toggled)));
        reactions
    }
}
