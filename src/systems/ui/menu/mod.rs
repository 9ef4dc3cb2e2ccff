//! The hand-attached menu context.
//!
//! [`VrMenu`] owns the widget arena, the registered panels, the settings and the
//! interaction state. Hosts build panels through it, feed it one [`FrameInput`] per
//! frame and read back a [`FrameReport`]; nothing in here is global.
//!
//! Submodules:
//! - `panels`: open/close, panel switching and settings refresh
//! - `frame`: the per-frame update (gesture, hover, trigger, widget ticks)
//! - `command_reducer` / `command_effects`: widget command resolution
//! - `defaults`: the stock main grid and settings panel
//! - `builder`: incremental construction of extra panels
use std::collections::VecDeque;

use bevy::prelude::*;
use smallvec::smallvec;

use crate::{
    data::settings::MenuSettings,
    systems::interaction::{HapticPulse, InteractionController, MenuInputLatch},
};

use super::{
    button::{ButtonState, ToggleState},
    commands::{
        resolve_reactions, CommandPayload, MenuAction, Reactions, WidgetCommand, WidgetTrigger,
    },
    label::{layout_glyphs, LabelStyle, PlacedGlyph},
    layout::{ContainerState, LayoutMetrics, LayoutMode},
    panel::PanelState,
    reflow::{reflow, stagger_entrance},
    slider::SliderState,
    transform::NodeTransform,
    tree::{MenuError, WidgetId, WidgetTree},
    widget::{WidgetKind, WidgetNode},
};

mod builder;
mod command_effects;
mod command_reducer;
pub mod defaults;
mod frame;
mod panels;


pub use builder::PanelBuilder;
pub use frame::{FrameInput, FrameReport};

pub const MAIN_PANEL: &str = "MainPanel";
pub const SETTINGS_PANEL: &str = "MCM_Panel";
pub const MAIN_GRID: &str = "Grid3x3";

/// A label widget that mirrors a float setting as `"{title}: {value:.2}"`.
#[derive(Clone, Debug, PartialEq)]
struct SettingReadout {
    widget: WidgetId,
    title: String,
    key: String,
}

#[derive(Resource)]
pub struct VrMenu {
    tree: WidgetTree,
    panels: Vec<WidgetId>,
    settings: MenuSettings,
    interaction: InteractionController,
    input: MenuInputLatch,
    open: bool,
    anchor: NodeTransform,
    pending: VecDeque<WidgetCommand>,
    report: FrameReport,
    readouts: Vec<SettingReadout>,
}

impl Default for VrMenu {
    fn default() -> Self {
        Self::new(MenuSettings::default())
    }
}

impl VrMenu {
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            tree: WidgetTree::new(),
            panels: Vec::new(),
            settings,
            interaction: InteractionController::default(),
            input: MenuInputLatch::default(),
            open: false,
            anchor: NodeTransform::IDENTITY,
            pending: VecDeque::new(),
            report: FrameReport::default(),
            readouts: Vec::new(),
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn widget(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.tree.get(id)
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Mutable settings. Call [`VrMenu::refresh_active_panels`] afterwards for layout
    /// related keys to take effect before the next content change.
    pub fn settings_mut(&mut self) -> &mut MenuSettings {
        &mut self.settings
    }

    /// Handle for input callbacks. Clones share state with the menu.
    pub fn input_latch(&self) -> MenuInputLatch {
        self.input.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hovered_widget(&self) -> Option<WidgetId> {
        self.interaction.hovered()
    }

    pub fn laser_length(&self) -> Option<f32> {
        self.interaction.laser.length()
    }

    pub fn anchor(&self) -> NodeTransform {
        self.anchor
    }

    pub fn panels(&self) -> &[WidgetId] {
        &self.panels
    }

    pub fn panel_named(&self, name: &str) -> Option<WidgetId> {
        self.panels
            .iter()
            .copied()
            .find(|id| self.tree.get(*id).is_some_and(|node| node.name == name))
    }

    pub fn panel_state(&self, panel: WidgetId) -> Option<&PanelState> {
        self.tree.get(panel)?.kind.panel()
    }

    /// First registered panel that is currently active.
    pub fn active_panel(&self) -> Option<WidgetId> {
        self.panels
            .iter()
            .copied()
            .find(|id| self.panel_state(*id).is_some_and(PanelState::is_active))
    }

    /// Searches every registered panel, in registration order.
    pub fn find_widget(&self, name: &str) -> Option<WidgetId> {
        self.panels
            .iter()
            .find_map(|panel| self.tree.find_by_name(*panel, name))
    }

    pub fn world_transform(&self, id: WidgetId) -> Option<NodeTransform> {
        self.tree.world_transform(id, &self.anchor)
    }

    pub(crate) fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            cell_scale: self.settings.button_mesh_scale,
            invert_grid_x: self.settings.invert_grid_x,
        }
    }

    // ---- construction -------------------------------------------------------

    pub fn spawn(&mut self, node: WidgetNode) -> WidgetId {
        self.tree.insert(node)
    }

    /// Creates and registers an active panel. It stays invisible until shown.
    pub fn create_panel(&mut self, name: &str) -> WidgetId {
        let mut node = WidgetNode::new(name, WidgetKind::Panel(PanelState::default()));
        node.visible = false;
        let id = self.spawn(node);
        self.panels.push(id);
        id
    }

    pub fn create_container(&mut self, name: &str, layout: LayoutMode, spacing: f32) -> WidgetId {
        self.spawn(WidgetNode::new(
            name,
            WidgetKind::Container(ContainerState::new(layout, spacing)),
        ))
    }

    pub fn create_button(&mut self, name: &str, label: &str, width: f32, height: f32) -> WidgetId {
        self.spawn(
            WidgetNode::new(name, WidgetKind::Button(ButtonState::new(label)))
                .with_size(width, height),
        )
    }

    pub fn create_toggle(
        &mut self,
        name: &str,
        label: &str,
        toggled: bool,
        width: f32,
        height: f32,
    ) -> WidgetId {
        self.spawn(
            WidgetNode::new(
                name,
                WidgetKind::Toggle(ToggleState::new(ButtonState::new(label), toggled)),
            )
            .with_size(width, height),
        )
    }

    pub fn create_slider(
        &mut self,
        name: &str,
        min: f32,
        max: f32,
        value: f32,
        width: f32,
        height: f32,
    ) -> WidgetId {
        self.spawn(
            WidgetNode::new(name, WidgetKind::Slider(SliderState::new(min, max, value)))
                .with_size(width, height),
        )
    }

    pub fn create_spacer(&mut self, name: &str, width: f32, height: f32) -> WidgetId {
        self.spawn(WidgetNode::new(name, WidgetKind::Plain).with_size(width, height))
    }

    /// Adds `child` under a container or panel and reflows from the top of the tree.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), MenuError> {
        let node = self.tree.get(parent).ok_or(MenuError::UnknownWidget(parent))?;
        if node.kind.container().is_none() {
            return Err(MenuError::WrongKind {
                name: node.name.clone(),
                expected: "container",
            });
        }
        self.tree.attach(parent, child)?;
        self.reflow_from(parent);
        Ok(())
    }

    /// Removes a widget subtree. Registered panels are unregistered first; a removed
    /// hover target is dropped without events.
    pub fn remove_widget(&mut self, id: WidgetId) -> usize {
        if !self.tree.contains(id) {
            return 0;
        }
        let doomed = self.tree.descendants(id);
        if let Some(hovered) = self.interaction.hovered() {
            if doomed.contains(&hovered) {
                self.interaction.hover.clear();
            }
        }
        self.panels.retain(|panel| !doomed.contains(panel));
        self.readouts.retain(|readout| !doomed.contains(&readout.widget));
        let parent = self.tree.parent(id);
        let removed = self.tree.remove(id);
        if let Some(parent) = parent {
            self.reflow_from(parent);
        }
        removed
    }

    pub fn bind(
        &mut self,
        id: WidgetId,
        trigger: WidgetTrigger,
        action: MenuAction,
    ) -> Result<(), MenuError> {
        let node = self.tree.get_mut(id).ok_or(MenuError::UnknownWidget(id))?;
        node.bindings[trigger] = Some(action);
        Ok(())
    }

    pub fn bind_setting_readout(
        &mut self,
        widget: WidgetId,
        title: &str,
        key: &str,
    ) -> Result<(), MenuError> {
        if !self.tree.contains(widget) {
            return Err(MenuError::UnknownWidget(widget));
        }
        self.readouts.push(SettingReadout {
            widget,
            title: title.to_string(),
            key: key.to_string(),
        });
        self.refresh_readouts();
        Ok(())
    }

    pub(crate) fn refresh_readouts(&mut self) {
        for readout in &self.readouts {
            let Some(value) = self.settings.get(&readout.key).and_then(|value| value.as_float())
            else {
                continue;
            };
            if let Some(button) = self
                .tree
                .get_mut(readout.widget)
                .and_then(|node| node.kind.button_mut())
            {
                button.label = format!("{}: {value:.2}", readout.title);
            }
        }
    }

    pub fn recalculate_layout(&mut self, id: WidgetId) {
        let metrics = self.layout_metrics();
        reflow(&mut self.tree, id, &metrics);
    }

    pub(crate) fn reflow_from(&mut self, id: WidgetId) {
        let root = self.tree.root_of(id);
        self.recalculate_layout(root);
    }

    // ---- pagination ---------------------------------------------------------

    fn container_mut(&mut self, id: WidgetId) -> Result<&mut ContainerState, MenuError> {
        let node = self.tree.get_mut(id).ok_or(MenuError::UnknownWidget(id))?;
        let name = node.name.clone();
        node.kind.container_mut().ok_or(MenuError::WrongKind {
            name,
            expected: "container",
        })
    }

    pub fn total_pages(&self, id: WidgetId) -> usize {
        self.tree
            .get(id)
            .and_then(|node| node.kind.container())
            .map_or(1, |container| container.total_pages(self.tree.children(id).len()))
    }

    pub fn current_page(&self, id: WidgetId) -> usize {
        self.tree
            .get(id)
            .and_then(|node| node.kind.container())
            .map_or(0, ContainerState::current_page)
    }

    pub fn set_page_size(&mut self, id: WidgetId, page_size: usize) -> Result<(), MenuError> {
        self.container_mut(id)?.set_page_size(page_size);
        self.reflow_from(id);
        Ok(())
    }

    /// Selects a page (clamped), reflows and staggers the newly visible widgets in.
    pub fn set_page(&mut self, id: WidgetId, page: usize) -> Result<usize, MenuError> {
        let children = self.tree.children(id).len();
        let page = self.container_mut(id)?.set_page(page, children);
        self.after_page_change(id);
        Ok(page)
    }

    pub fn next_page(&mut self, id: WidgetId) -> Result<usize, MenuError> {
        let children = self.tree.children(id).len();
        let page = self.container_mut(id)?.next_page(children);
        self.after_page_change(id);
        Ok(page)
    }

    pub fn prev_page(&mut self, id: WidgetId) -> Result<usize, MenuError> {
        let children = self.tree.children(id).len();
        let page = self.container_mut(id)?.prev_page(children);
        self.after_page_change(id);
        Ok(page)
    }

    fn after_page_change(&mut self, id: WidgetId) {
        self.reflow_from(id);
        stagger_entrance(&mut self.tree, id);
        if let Some(hovered) = self.interaction.hovered() {
            if !self.tree.is_visible(hovered) {
                self.release_hover();
            }
        }
        if self.settings.verbose_logging {
            debug!(
                "container {:?} now on page {}/{}",
                id,
                self.current_page(id) + 1,
                self.total_pages(id)
            );
        }
    }

    // ---- widget values ------------------------------------------------------

    pub fn slider_value(&self, id: WidgetId) -> Option<f32> {
        self.tree.get(id)?.kind.slider().map(SliderState::value)
    }

    /// Stores a clamped slider value. With `notify`, a real change queues the
    /// widget's value-changed action. Returns the stored value.
    pub fn set_slider_value(
        &mut self,
        id: WidgetId,
        value: f32,
        notify: bool,
    ) -> Result<f32, MenuError> {
        let node = self.tree.get_mut(id).ok_or(MenuError::UnknownWidget(id))?;
        let name = node.name.clone();
        let slider = node.kind.slider_mut().ok_or(MenuError::WrongKind {
            name,
            expected: "slider",
        })?;
        let changed = slider.set_value(value);
        let stored = slider.value();
        if let (Some(changed), true) = (changed, notify) {
            let reactions: Reactions =
                smallvec![(WidgetTrigger::ValueChanged, CommandPayload::Value(changed))];
            self.queue_reactions(id, reactions);
        }
        Ok(stored)
    }

    pub fn is_toggled(&self, id: WidgetId) -> Option<bool> {
        match &self.tree.get(id)?.kind {
            WidgetKind::Toggle(toggle) => Some(toggle.is_toggled()),
            _ => None,
        }
    }

    /// Sets the latch without firing the toggle action.
    pub fn set_toggled(&mut self, id: WidgetId, toggled: bool) -> bool {
        match self.tree.get_mut(id).map(|node| &mut node.kind) {
            Some(WidgetKind::Toggle(toggle)) => {
                toggle.set_toggled(toggled);
                true
            }
            _ => false,
        }
    }

    /// Glyph placement for a button's label and sublabel, relative to the button.
    pub fn label_glyphs(
        &self,
        id: WidgetId,
        has_glyph: impl Fn(char) -> bool,
    ) -> Option<(Vec<PlacedGlyph>, Vec<PlacedGlyph>)> {
        let button = self.tree.get(id)?.kind.button()?;
        let offset = self.settings.label_offset();
        let spacing = self.settings.label_spacing;
        let scale = self.settings.label_scale;

        let shift = |mut glyphs: Vec<PlacedGlyph>| {
            for glyph in &mut glyphs {
                glyph.offset += offset;
            }
            glyphs
        };
        let label = shift(layout_glyphs(&button.label, &LabelStyle::title(spacing, scale), &has_glyph));
        let sublabel = shift(layout_glyphs(
            &button.sublabel,
            &LabelStyle::sublabel(spacing, scale),
            &has_glyph,
        ));
        Some((label, sublabel))
    }

    // ---- commands -----------------------------------------------------------

    /// Queues the bound action of every reaction, in firing order. Unbound triggers
    /// and removed widgets queue nothing.
    pub(crate) fn queue_reactions(&mut self, id: WidgetId, reactions: Reactions) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        self.pending
            .extend(resolve_reactions(id, &node.bindings, reactions));
    }

    pub(crate) fn push_haptic(&mut self, pulse: HapticPulse) {
        self.report.haptics.push(pulse);
    }
}
