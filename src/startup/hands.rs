use bevy::prelude::*;

use super::LastFrameReport;
use crate::{
    data::settings::MenuSettings,
    systems::{
        interaction::HapticPulse,
        time::frame_delta,
        ui::{
            commands::{MenuAction, WidgetCommand},
            menu::{FrameInput, VrMenu},
            transform::NodeTransform,
        },
    },
};

/// The tracked hand the menu panels are attached to.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(Transform)]
pub struct MenuHand;

/// The tracked hand whose local +Z axis is the selection ray.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(Transform)]
pub struct PointerHand;

/// A tracked controller by physical side. Sided hands get their [`MenuHand`] or
/// [`PointerHand`] role from `use_left_hand_as_menu`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
#[require(Transform)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn holds_menu(self, settings: &MenuSettings) -> bool {
        (self == Self::Left) == settings.use_left_hand_as_menu
    }
}

/// Moves the menu and pointer roles onto the configured sides. Hands spawned with a
/// role marker and no [`HandSide`] are left alone.
pub fn assign_hand_roles(
    mut commands: Commands,
    settings: Res<MenuSettings>,
    hands: Query<(Entity, &HandSide, Has<MenuHand>, Has<PointerHand>)>,
) {
    for (entity, side, is_menu, is_pointer) in &hands {
        let holds_menu = side.holds_menu(&settings);
        if is_menu == holds_menu && is_pointer != holds_menu {
            continue;
        }
        let mut hand = commands.entity(entity);
        if holds_menu {
            hand.remove::<PointerHand>().insert(MenuHand);
        } else {
            hand.remove::<MenuHand>().insert(PointerHand);
        }
        debug!("{side:?} hand now holds the {}", if holds_menu { "menu" } else { "pointer" });
    }
}

/// Samples both hands, runs one menu frame and publishes what it produced.
pub fn drive_menu(
    time: Res<Time>,
    mut menu: ResMut<VrMenu>,
    mut settings: ResMut<MenuSettings>,
    mut last_report: ResMut<LastFrameReport>,
    menu_hand: Query<&GlobalTransform, With<MenuHand>>,
    pointer_hand: Query<&GlobalTransform, With<PointerHand>>,
    mut commands: EventWriter<WidgetCommand>,
    mut haptics: EventWriter<HapticPulse>,
) {
    let menu_transform = menu_hand.single().ok().map(NodeTransform::from_global);
    if menu_transform.is_none() && menu.is_open() {
        warn_once!("menu is open but no single MenuHand entity is tracked");
    }
    let pointer_transform = pointer_hand.single().ok().map(NodeTransform::from_global);

    let report = menu.update(FrameInput {
        delta: frame_delta(&time),
        menu_hand: menu_transform,
        pointer_hand: pointer_transform,
    });

    let adjusted = report
        .commands
        .iter()
        .any(|command| matches!(command.action, MenuAction::AdjustSetting { .. }));
    if adjusted {
        *settings = menu.settings().clone();
    }

    commands.write_batch(report.commands.iter().cloned());
    haptics.write_batch(report.haptics.iter().copied());
    last_report.0 = report;
}
