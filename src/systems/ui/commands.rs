//! Typed actions bound to widget triggers.
//!
//! Widgets never call back into the menu directly. A trigger that fires produces a
//! [`WidgetCommand`], and the menu drains those after the interaction pass has
//! finished mutating widget state.
use bevy::prelude::*;
use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tree::WidgetId;

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetTrigger {
    Press,
    Release,
    Hover,
    Toggle,
    ValueChanged,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MenuAction {
    NextPage(String),
    PrevPage(String),
    SwitchPanel(String),
    CloseMenu,
    AdjustSetting { key: String, step: f32 },
    SaveSettings,
    Custom(String),
}

impl MenuAction {
    /// Actions the menu resolves on its own. Everything else is only forwarded.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::SaveSettings | Self::Custom(_))
    }

    /// Maps a configured slot action name onto an action, ignoring case. `"None"`
    /// and empty strings yield no binding.
    pub fn from_slot_action(action: &str, grid_name: &str) -> Option<Self> {
        let action = action.trim();
        match action.to_ascii_lowercase().as_str() {
            "" | "none" => None,
            "nextpage" => Some(Self::NextPage(grid_name.to_string())),
            "prevpage" => Some(Self::PrevPage(grid_name.to_string())),
            "close" | "closemenu" => Some(Self::CloseMenu),
            "settings" => Some(Self::SwitchPanel(super::menu::SETTINGS_PANEL.to_string())),
            _ => Some(Self::Custom(action.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CommandPayload {
    #[default]
    None,
    Hovered(bool),
    Toggled(bool),
    Value(f32),
}

#[derive(Event, Clone, Debug, PartialEq)]
pub struct WidgetCommand {
    pub widget: WidgetId,
    pub action: MenuAction,
    pub payload: CommandPayload,
}

pub type ActionBindings = EnumMap<WidgetTrigger, Option<MenuAction>>;

/// Triggers fired by a single pointer event, in firing order.
pub type Reactions = SmallVec<[(WidgetTrigger, CommandPayload); 2]>;

pub fn resolve_reactions(
    widget: WidgetId,
    bindings: &ActionBindings,
    reactions: Reactions,
) -> impl Iterator<Item = WidgetCommand> + '_ {
    reactions.into_iter().filter_map(move |(trigger, payload)| {
        bindings[trigger].clone().map(|action| WidgetCommand {
            widget,
            action,
            payload,
        })
    })
}
