use bevy::prelude::*;

use super::{
    button::{ButtonState, ToggleState},
    commands::{ActionBindings, Reactions},
    layout::ContainerState,
    panel::PanelState,
    slider::SliderState,
    transform::NodeTransform,
};
use crate::systems::motion::EntranceAnimation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Exit,
    Press,
    Release,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WidgetKind {
    Plain,
    Button(ButtonState),
    Toggle(ToggleState),
    Slider(SliderState),
    Container(ContainerState),
    Panel(PanelState),
}

impl WidgetKind {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Button(_) | Self::Toggle(_) | Self::Slider(_))
    }

    pub fn container(&self) -> Option<&ContainerState> {
        match self {
            Self::Container(container) => Some(container),
            Self::Panel(panel) => Some(&panel.container),
            _ => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut ContainerState> {
        match self {
            Self::Container(container) => Some(container),
            Self::Panel(panel) => Some(&mut panel.container),
            _ => None,
        }
    }

    pub fn panel(&self) -> Option<&PanelState> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn panel_mut(&mut self) -> Option<&mut PanelState> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn button(&self) -> Option<&ButtonState> {
        match self {
            Self::Button(button) => Some(button),
            Self::Toggle(toggle) => Some(&toggle.button),
            _ => None,
        }
    }

    pub fn button_mut(&mut self) -> Option<&mut ButtonState> {
        match self {
            Self::Button(button) => Some(button),
            Self::Toggle(toggle) => Some(&mut toggle.button),
            _ => None,
        }
    }

    pub fn slider(&self) -> Option<&SliderState> {
        match self {
            Self::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn slider_mut(&mut self) -> Option<&mut SliderState> {
        match self {
            Self::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    /// Applies a pointer event and reports which triggers fired.
    pub fn react(&mut self, event: PointerEvent) -> Reactions {
        match (self, event) {
            (Self::Button(button), PointerEvent::Enter) => button.enter(),
            (Self::Button(button), PointerEvent::Exit) => button.exit(),
            (Self::Button(button), PointerEvent::Press) => button.press(),
            (Self::Button(button), PointerEvent::Release) => button.release(),
            (Self::Toggle(toggle), PointerEvent::Enter) => toggle.button.enter(),
            (Self::Toggle(toggle), PointerEvent::Exit) => toggle.button.exit(),
            (Self::Toggle(toggle), PointerEvent::Press) => toggle.press(),
            (Self::Toggle(toggle), PointerEvent::Release) => toggle.button.release(),
            (Self::Slider(slider), PointerEvent::Enter) => slider.enter(),
            (Self::Slider(slider), PointerEvent::Exit) => slider.exit(),
            (Self::Slider(slider), PointerEvent::Press) => slider.press(),
            (Self::Slider(slider), PointerEvent::Release) => slider.release(),
            _ => Reactions::new(),
        }
    }

    /// Clears hover/press/drag state without firing triggers.
    pub fn reset_interaction(&mut self) {
        match self {
            Self::Button(button) => button.reset(),
            Self::Toggle(toggle) => toggle.button.reset(),
            Self::Slider(slider) => slider.reset(),
            _ => {}
        }
    }

    fn visual_scale(&self) -> f32 {
        self.button().map_or(1.0, ButtonState::current_scale)
    }

    fn depth_offset(&self) -> f32 {
        match self {
            Self::Toggle(toggle) => toggle.depth_offset(),
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetNode {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    /// Position, rotation and base scale relative to the parent.
    pub local: NodeTransform,
    pub animation: EntranceAnimation,
    pub kind: WidgetKind,
    pub bindings: ActionBindings,
    pub(super) parent: Option<super::tree::WidgetId>,
    pub(super) children: Vec<super::tree::WidgetId>,
}

impl WidgetNode {
    pub fn new(name: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            width: 1.0,
            height: 1.0,
            visible: true,
            local: NodeTransform::IDENTITY,
            animation: EntranceAnimation::default(),
            kind,
            bindings: ActionBindings::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Local transform as rendered: base scale times the hover/press scale and the
    /// entrance factor, with toggles pushed in along depth.
    pub fn effective_local(&self) -> NodeTransform {
        let mut transform = self.local;
        transform.scale *= self.kind.visual_scale() * self.animation.factor();
        transform.translation.y += self.kind.depth_offset();
        transform
    }
}
