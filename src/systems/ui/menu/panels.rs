use super::*;
use crate::systems::{
    interaction::{Hand, TOGGLE_PULSE_INTENSITY, TOGGLE_PULSE_SECS},
    ui::widget::PointerEvent,
};

impl VrMenu {
    /// Registers an existing panel widget. Registering twice is a no-op.
    pub fn register_panel(&mut self, panel: WidgetId) -> Result<(), MenuError> {
        let node = self.tree.get(panel).ok_or(MenuError::UnknownWidget(panel))?;
        if node.kind.panel().is_none() {
            return Err(MenuError::WrongKind {
                name: node.name.clone(),
                expected: "panel",
            });
        }
        if self.panels.contains(&panel) {
            return Ok(());
        }
        self.panels.push(panel);
        Ok(())
    }

    /// Hides, detaches and forgets a panel. The widgets stay in the arena.
    pub fn unregister_panel(&mut self, panel: WidgetId) -> bool {
        let Some(index) = self.panels.iter().position(|id| *id == panel) else {
            return false;
        };
        self.close_panel(panel);
        self.panels.remove(index);
        true
    }

    pub fn set_panel_active(&mut self, panel: WidgetId, active: bool) -> Result<(), MenuError> {
        if !active {
            self.close_panel(panel);
        }
        let state = self.panel_state_mut(panel)?;
        state.set_active(active);
        Ok(())
    }

    /// Opens or closes the whole menu.
    ///
    /// Opening attaches and shows every active panel. Closing hides and detaches all
    /// panels and ends any hover or press in flight, so a widget never stays stuck
    /// hovered or pressed.
    pub fn toggle_menu(&mut self) {
        self.open = !self.open;

        if self.open {
            for panel in self.panels.clone() {
                if self.panel_state(panel).is_some_and(PanelState::is_active) {
                    self.attach_panel(panel);
                    self.show_panel(panel);
                }
            }
        } else {
            self.release_hover();
            self.interaction.trigger.clear();
            self.interaction.laser.hide();
            for panel in self.panels.clone() {
                self.close_panel(panel);
            }
        }

        self.push_haptic(HapticPulse {
            hand: Hand::Menu,
            intensity: TOGGLE_PULSE_INTENSITY,
            duration: TOGGLE_PULSE_SECS,
        });
        self.report.toggled = Some(self.open);
        info!("menu {}", if self.open { "opened" } else { "closed" });
    }

    /// Activates one panel without touching the others. While the menu is open it is
    /// attached, reflowed and shown straight away.
    pub fn open_panel(&mut self, panel: WidgetId) -> Result<(), MenuError> {
        self.panel_state_mut(panel)?.set_active(true);
        if self.open {
            self.attach_panel(panel);
            self.recalculate_layout(panel);
            self.show_panel(panel);
        }
        Ok(())
    }

    /// Deactivates one panel: it is hidden, detached and stops taking hits.
    pub fn hide_panel(&mut self, panel: WidgetId) -> Result<(), MenuError> {
        self.set_panel_active(panel, false)
    }

    pub fn is_panel_visible(&self, panel: WidgetId) -> bool {
        self.panel_state(panel)
            .is_some_and(|state| state.is_active() && state.is_shown())
    }

    /// Pins a panel to its own offset from the hand instead of the configured one.
    pub fn set_panel_offset(&mut self, panel: WidgetId, offset: Vec3) -> Result<(), MenuError> {
        let state = self.panel_state_mut(panel)?;
        state.set_custom_offset(Some(offset));
        if state.is_attached() {
            state.attach(offset);
        }
        Ok(())
    }

    pub fn set_panel_scale(&mut self, panel: WidgetId, scale: f32) -> Result<(), MenuError> {
        self.panel_state_mut(panel)?.set_custom_scale(Some(scale));
        Ok(())
    }

    /// Makes `name` the active panel. While the menu is open the new panel is
    /// attached, reflowed and shown immediately.
    pub fn switch_to_panel(&mut self, name: &str) -> Result<(), MenuError> {
        let Some(target) = self.panel_named(name) else {
            warn!("cannot switch to unknown panel `{name}`");
            return Err(MenuError::UnknownPanel(name.to_string()));
        };
        let current = self.active_panel();
        if current == Some(target) {
            warn!("panel `{name}` is already active");
            return Ok(());
        }

        for panel in self.panels.clone() {
            if panel != target && self.panel_state(panel).is_some_and(PanelState::is_active) {
                self.close_panel(panel);
                self.panel_state_mut(panel)?.set_active(false);
            }
        }
        self.panel_state_mut(target)?.set_active(true);

        if self.open {
            self.attach_panel(target);
            self.recalculate_layout(target);
            self.show_panel(target);
        }
        info!("switched to panel `{name}`");
        Ok(())
    }

    /// Re-applies layout related settings to every panel and re-attaches the open
    /// ones with the current offset.
    pub fn refresh_active_panels(&mut self) {
        let spacing = self.settings.button_spacing;
        for panel in self.panels.clone() {
            if let Some(grid) = self.tree.find_by_name(panel, MAIN_GRID) {
                if let Ok(container) = self.container_mut(grid) {
                    container.spacing = spacing;
                }
            }
            self.recalculate_layout(panel);

            let live = self
                .panel_state(panel)
                .is_some_and(|state| state.is_active() && state.is_shown());
            if self.open && live {
                self.attach_panel(panel);
            }
        }
        self.refresh_readouts();
        debug!("refreshed {} panel(s)", self.panels.len());
    }

    fn panel_state_mut(&mut self, panel: WidgetId) -> Result<&mut PanelState, MenuError> {
        let node = self.tree.get_mut(panel).ok_or(MenuError::UnknownWidget(panel))?;
        let name = node.name.clone();
        node.kind.panel_mut().ok_or(MenuError::WrongKind {
            name,
            expected: "panel",
        })
    }

    fn attach_panel(&mut self, panel: WidgetId) {
        let offset = self.settings.menu_offset();
        if let Ok(state) = self.panel_state_mut(panel) {
            let offset = state.custom_offset().unwrap_or(offset);
            state.attach(offset);
        }
    }

    /// Shows a panel and staggers its visible widgets in. Inactive panels stay hidden.
    fn show_panel(&mut self, panel: WidgetId) {
        let shown = self
            .panel_state_mut(panel)
            .is_ok_and(|state| state.show());
        if !shown {
            return;
        }
        self.tree.set_visible(panel, true);
        stagger_entrance(&mut self.tree, panel);
    }

    /// Hides and detaches a panel. A hover inside it is ended and every widget drops
    /// back to its idle interaction state.
    fn close_panel(&mut self, panel: WidgetId) {
        if let Some(hovered) = self.interaction.hovered() {
            if self.tree.root_of(hovered) == panel {
                self.release_hover();
            }
        }
        if let Ok(state) = self.panel_state_mut(panel) {
            state.hide();
            state.detach();
        }
        for id in self.tree.descendants(panel) {
            if let Some(node) = self.tree.get_mut(id) {
                node.kind.reset_interaction();
            }
        }
    }

    /// Ends the current hover: the widget gets an exit, plus a release when the
    /// trigger is still held on it.
    pub(crate) fn release_hover(&mut self) {
        let Some(hovered) = self.interaction.hover.clear() else {
            return;
        };
        self.send_pointer_event(hovered, PointerEvent::Exit);
        if self.interaction.trigger.is_pressed() {
            self.send_pointer_event(hovered, PointerEvent::Release);
        }
    }
}
