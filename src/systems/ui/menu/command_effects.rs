use super::{
    command_reducer::{reduce_menu_action, CommandEffect},
    *,
};

/// Upper bound on commands resolved in one drain, so a binding that re-fires
/// itself cannot stall a frame.
const MAX_COMMANDS_PER_DRAIN: usize = 256;

impl VrMenu {
    /// Resolves queued widget commands in firing order. Every command is reported to
    /// the host after its built-in effect, if any, has been applied.
    pub(super) fn drain_commands(&mut self) {
        let mut resolved = 0;
        while let Some(command) = self.pending.pop_front() {
            if resolved == MAX_COMMANDS_PER_DRAIN {
                warn!(
                    "dropping {} widget command(s) queued in a single frame",
                    self.pending.len() + 1
                );
                self.pending.clear();
                break;
            }
            resolved += 1;

            let effect = reduce_menu_action(&command.action, self.open);
            self.apply_command_effect(effect);
            self.report.commands.push(command);
        }
    }

    fn apply_command_effect(&mut self, effect: CommandEffect) {
        match effect {
            CommandEffect::TurnPage { container, forward } => {
                let Some(id) = self.find_widget(&container) else {
                    warn!("no container named `{container}` to page");
                    return;
                };
                let result = if forward {
                    self.next_page(id)
                } else {
                    self.prev_page(id)
                };
                if let Err(error) = result {
                    warn!("paging `{container}` failed: {error}");
                }
            }
            CommandEffect::SwitchPanel(panel) => {
                if let Err(error) = self.switch_to_panel(&panel) {
                    debug!("panel switch from a command failed: {error}");
                }
            }
            CommandEffect::CloseMenu => self.toggle_menu(),
            CommandEffect::AdjustSetting { key, step } => match self.settings.adjust(&key, step) {
                Ok(value) => {
                    info!("setting `{key}` adjusted to {value:.2}");
                    self.refresh_active_panels();
                }
                Err(error) => warn!("{error}"),
            },
            CommandEffect::ForwardOnly => {}
        }
    }
}
