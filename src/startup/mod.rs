//! Bevy host for the menu core.
//!
//! [`ImmersiveMenuPlugin`] owns a [`VrMenu`] resource and runs it once per `Update`:
//! input is latched first, then the menu is driven from the tracked hands, then the
//! widget tree is mirrored onto proxy entities.
use bevy::prelude::*;

use crate::{
    data::settings::MenuSettings,
    systems::{
        interaction::{HapticPulse, MenuInputLatch},
        ui::{
            commands::WidgetCommand,
            menu::{FrameReport, VrMenu},
        },
    },
};

pub mod hands;
pub mod render;
pub mod shortcuts;

use render::ProxyIndex;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum MenuSystem {
    Input,
    Drive,
    Sync,
}

/// What the menu reported on its most recent frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct LastFrameReport(pub FrameReport);

/// Builds the menu from a [`MenuSettings`] resource when one is present at plugin
/// build time, otherwise from defaults. Later changes to that resource are pushed
/// into the menu.
pub struct ImmersiveMenuPlugin;

impl Plugin for ImmersiveMenuPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<MenuSettings>()
            .cloned()
            .unwrap_or_default();
        let menu = VrMenu::new(settings.clone());

        app.insert_resource::<MenuInputLatch>(menu.input_latch())
            .insert_resource(settings)
            .insert_resource(menu)
            .init_resource::<LastFrameReport>()
            .init_resource::<ProxyIndex>()
            .add_event::<WidgetCommand>()
            .add_event::<HapticPulse>()
            .configure_sets(
                Update,
                (MenuSystem::Input, MenuSystem::Drive, MenuSystem::Sync).chain(),
            )
            .add_systems(
                Update,
                (
                    apply_settings_changes,
                    hands::assign_hand_roles,
                    shortcuts::keyboard_menu_input,
                )
                    .in_set(MenuSystem::Input),
            )
            .add_systems(Update, hands::drive_menu.in_set(MenuSystem::Drive))
            .add_systems(Update, render::sync_widget_proxies.in_set(MenuSystem::Sync));
    }
}

/// Copies an edited [`MenuSettings`] resource into the menu and re-lays out its
/// panels.
fn apply_settings_changes(settings: Res<MenuSettings>, mut menu: ResMut<VrMenu>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    if *menu.settings() == *settings {
        return;
    }
    *menu.settings_mut() = settings.clone();
    menu.refresh_active_panels();
    info!("menu settings reloaded");
}
