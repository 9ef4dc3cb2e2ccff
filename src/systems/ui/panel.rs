use bevy::prelude::*;

use super::layout::{ContainerState, LayoutMode};

pub const PANEL_FADE_SECS: f32 = 0.2;
pub const DEFAULT_PANEL_SPACING: f32 = 0.4;

/// Top-level container that can be attached to the menu hand.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelState {
    pub container: ContainerState,
    /// Lift the first child by half its height after layout, so a top-anchored
    /// column ends up centered on the hand.
    pub center_content: bool,
    pub(crate) active: bool,
    pub(crate) shown: bool,
    pub(crate) attached: bool,
    pub(crate) fade_timer: f32,
    pub(crate) offset: Vec3,
    pub(crate) custom_offset: Option<Vec3>,
    pub(crate) custom_scale: Option<f32>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            container: ContainerState::new(LayoutMode::ColumnDown, DEFAULT_PANEL_SPACING),
            center_content: false,
            active: true,
            shown: false,
            attached: false,
            fade_timer: 0.0,
            offset: Vec3::ZERO,
            custom_offset: None,
            custom_scale: None,
        }
    }
}

impl PanelState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Per-panel offset used instead of the configured menu offset.
    pub fn custom_offset(&self) -> Option<Vec3> {
        self.custom_offset
    }

    pub fn set_custom_offset(&mut self, offset: Option<Vec3>) {
        self.custom_offset = offset;
    }

    /// Per-panel scale used instead of the configured menu scale.
    pub fn custom_scale(&self) -> Option<f32> {
        self.custom_scale
    }

    pub fn set_custom_scale(&mut self, scale: Option<f32>) {
        self.custom_scale = scale.filter(|scale| scale.is_finite() && *scale > 0.0);
    }

    /// Returns false, without side effects, for an inactive panel.
    pub fn show(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.shown = true;
        self.fade_timer = PANEL_FADE_SECS;
        true
    }

    pub fn hide(&mut self) -> bool {
        let was_shown = self.shown;
        self.shown = false;
        self.fade_timer = PANEL_FADE_SECS;
        was_shown
    }

    /// Deactivating also hides.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.hide();
        }
    }

    pub fn attach(&mut self, offset: Vec3) {
        self.attached = true;
        self.offset = offset;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Advances the fade. Returns true on the frame a hide fade completes.
    pub fn tick_fade(&mut self, delta: f32) -> bool {
        if self.fade_timer <= 0.0 {
            return false;
        }
        self.fade_timer -= delta;
        self.fade_timer <= 0.0 && !self.shown
    }
}
