use super::*;
use crate::{
    data::settings::MIN_MENU_SCALE,
    systems::{
        interaction::{
            hit_test::{closest_hit, hit_test, InteractionVolume, PointerRay},
            Hand, HoverTransition, TriggerEdge, HOVER_PULSE_FACTOR,
        },
        time::clamp_frame_delta,
        ui::{transform::euler_degrees, widget::PointerEvent},
    },
};

/// Everything the host samples for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub delta: f32,
    /// World transform of the hand the menu is attached to.
    pub menu_hand: Option<NodeTransform>,
    /// World transform of the pointing hand. Its ray leaves along local +Z.
    pub pointer_hand: Option<NodeTransform>,
}

/// What happened during one [`VrMenu::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// `Some(open)` when the menu toggled this frame.
    pub toggled: Option<bool>,
    /// Every action that fired, built-in ones included, in firing order.
    pub commands: Vec<WidgetCommand>,
    pub haptics: Vec<HapticPulse>,
    pub hovered: Option<WidgetId>,
    pub laser_length: Option<f32>,
}

impl VrMenu {
    /// Runs one frame: activation gesture, hover, trigger, then widget animation,
    /// slider drags and panel fades. Commands fired along the way are resolved after
    /// the interaction pass.
    pub fn update(&mut self, input: FrameInput) -> FrameReport {
        let delta = clamp_frame_delta(input.delta);
        if let Some(anchor) = input.menu_hand {
            self.anchor = anchor;
        }
        let snapshot = self.input.snapshot();
        let ray = input.pointer_hand.as_ref().map(PointerRay::from_hand);

        let hold = self.settings.activation_hold_time;
        if self
            .interaction
            .gesture
            .tick(snapshot.grip_held, delta, hold)
        {
            self.toggle_menu();
        }

        if self.open {
            match ray {
                Some(ray) => self.process_hover(&ray, delta),
                None => {
                    self.release_hover();
                    self.interaction.laser.hide();
                }
            }
            self.process_trigger(snapshot.trigger_held);
        }
        self.drain_commands();

        self.tick_panels(delta, ray.as_ref());
        self.drain_commands();

        let mut report = std::mem::take(&mut self.report);
        report.hovered = self.interaction.hovered();
        report.laser_length = self.interaction.laser.length();
        report
    }

    /// Interactive widgets that can be hit this frame: effectively visible, inside a
    /// panel that is both active and shown. Pre-order, panel registration order.
    pub fn hit_candidates(&self) -> Vec<WidgetId> {
        self.panels
            .iter()
            .copied()
            .filter(|panel| {
                self.panel_state(*panel)
                    .is_some_and(|state| state.is_active() && state.is_shown())
            })
            .flat_map(|panel| self.tree.descendants(panel))
            .filter(|id| {
                self.tree.is_visible(*id)
                    && self.tree.get(*id).is_some_and(|node| node.kind.is_interactive())
            })
            .collect()
    }

    /// Nearest candidate hit by `ray` within the configured range.
    pub fn pick(&self, ray: &PointerRay) -> Option<(WidgetId, f32)> {
        let hitbox_scale = self.settings.hitbox_scale;
        let depth = self.settings.hit_test_depth;
        let hits = self.hit_candidates().into_iter().map(|id| {
            let distance = self.tree.get(id).and_then(|node| {
                let world = self.tree.world_transform(id, &self.anchor)?;
                let volume = InteractionVolume::for_widget(node.size(), hitbox_scale, depth);
                hit_test(&world, &volume, ray)
            });
            (id, distance)
        });
        closest_hit(hits, self.settings.raycast_max_distance)
    }

    fn process_hover(&mut self, ray: &PointerRay, delta: f32) {
        let hit = self.pick(ray);
        let lock = self.settings.hover_lock_time;
        let transition = self
            .interaction
            .hover
            .resolve(hit.map(|(id, _)| id), delta, lock);

        if let HoverTransition::Changed { exited, entered } = transition {
            if let Some(exited) = exited {
                self.send_pointer_event(exited, PointerEvent::Exit);
            }
            if let Some(entered) = entered {
                self.send_pointer_event(entered, PointerEvent::Enter);
                if self.settings.haptic_on_hover {
                    self.push_haptic(HapticPulse {
                        hand: Hand::Pointer,
                        intensity: self.settings.haptic_intensity * HOVER_PULSE_FACTOR,
                        duration: self.settings.haptic_duration,
                    });
                }
            }
            if self.settings.verbose_logging {
                debug!("hover {:?} -> {:?}", exited, entered);
            }
        }

        let length = hit.map_or(self.settings.raycast_max_distance, |(_, distance)| distance);
        self.interaction.laser.update(length, delta);
    }

    fn process_trigger(&mut self, held: bool) {
        let Some(edge) = self.interaction.trigger.update(held) else {
            return;
        };
        let Some(hovered) = self.interaction.hovered() else {
            return;
        };
        match edge {
            TriggerEdge::Pressed => {
                self.send_pointer_event(hovered, PointerEvent::Press);
                if self.settings.haptic_on_press {
                    self.push_haptic(HapticPulse {
                        hand: Hand::Pointer,
                        intensity: self.settings.haptic_intensity,
                        duration: self.settings.haptic_duration,
                    });
                }
            }
            TriggerEdge::Released => self.send_pointer_event(hovered, PointerEvent::Release),
        }
    }

    /// Applies a pointer event to a live widget and queues whatever it fires.
    pub(crate) fn send_pointer_event(&mut self, id: WidgetId, event: PointerEvent) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let reactions = node.kind.react(event);
        self.queue_reactions(id, reactions);
    }

    fn tick_panels(&mut self, delta: f32, ray: Option<&PointerRay>) {
        let speed = self.settings.entrance_speed;
        let rotation = euler_degrees(self.settings.menu_rotation_degrees());
        let scale = self.settings.menu_scale.max(MIN_MENU_SCALE);

        for panel in self.panels.clone() {
            let Some(node) = self.tree.get_mut(panel) else {
                continue;
            };
            node.animation.tick(delta, speed);
            let Some(state) = node.kind.panel_mut() else {
                continue;
            };
            let faded_out = state.tick_fade(delta);
            let (attached, shown, offset) = (state.is_attached(), state.is_shown(), state.offset());
            let panel_scale = state.custom_scale().unwrap_or(scale);
            if faded_out {
                node.visible = false;
            }
            if attached {
                node.local = NodeTransform::from_translation(offset)
                    .with_rotation(rotation)
                    .with_scale(panel_scale);
            }
            if shown {
                self.tick_widgets(panel, delta, speed, ray);
            }
        }
    }

    fn tick_widgets(&mut self, panel: WidgetId, delta: f32, speed: f32, ray: Option<&PointerRay>) {
        for id in self.tree.descendants(panel).into_iter().skip(1) {
            let Some(node) = self.tree.get_mut(id) else {
                continue;
            };
            node.animation.tick(delta, speed);
            if let Some(button) = node.kind.button_mut() {
                button.tick(delta);
            }

            let dragging = node.kind.slider().is_some_and(SliderState::is_dragging);
            if let (true, Some(ray)) = (dragging, ray) {
                self.drag_slider(id, ray);
            }
        }
    }

    fn drag_slider(&mut self, id: WidgetId, ray: &PointerRay) {
        let Some(world) = self.tree.world_transform(id, &self.anchor) else {
            return;
        };
        let Some(node) = self.tree.get(id) else {
            return;
        };
        let Some(slider) = node.kind.slider() else {
            return;
        };
        let value = slider.value_from_ray(&world, node.width, ray.origin, ray.direction);
        if let Err(error) = self.set_slider_value(id, value, true) {
            warn!("slider drag failed: {error}");
        }
    }
}
