use bevy::prelude::*;

use crate::systems::{interaction::MenuInputLatch, ui::menu::VrMenu};

pub const GRIP_KEY: KeyCode = KeyCode::KeyG;
pub const TRIGGER_KEY: KeyCode = KeyCode::KeyT;
pub const TOGGLE_KEY: KeyCode = KeyCode::F8;

/// Keyboard stand-in for the controllers. Only key edges are written, so a tracked
/// controller feeding the same latch is not overridden while no key is touched.
pub fn keyboard_menu_input(
    keyboard_input: Option<Res<ButtonInput<KeyCode>>>,
    latch: Res<MenuInputLatch>,
    mut menu: ResMut<VrMenu>,
) {
    let Some(keyboard_input) = keyboard_input else {
        return;
    };

    if keyboard_input.just_pressed(GRIP_KEY) {
        latch.set_grip(true);
    } else if keyboard_input.just_released(GRIP_KEY) {
        latch.set_grip(false);
    }

    if keyboard_input.just_pressed(TRIGGER_KEY) {
        latch.set_trigger(true);
    } else if keyboard_input.just_released(TRIGGER_KEY) {
        latch.set_trigger(false);
    }

    if keyboard_input.just_pressed(TOGGLE_KEY) {
        menu.toggle_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app() -> App {
        let mut app = App::new();
        let menu = VrMenu::default();
        app.insert_resource(menu.input_latch())
            .insert_resource(menu)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, keyboard_menu_input);
        app
    }

    fn tap(app: &mut App, key: KeyCode, pressed: bool) {
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            if pressed {
                keys.press(key);
            } else {
                keys.release(key);
            }
        }
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    }

    #[test]
    fn grip_and_trigger_keys_drive_latch() {
        let mut app = make_app();
        tap(&mut app, GRIP_KEY, true);
        tap(&mut app, TRIGGER_KEY, true);
        let snapshot = app.world().resource::<MenuInputLatch>().snapshot();
        assert!(snapshot.grip_held && snapshot.trigger_held);

        tap(&mut app, GRIP_KEY, false);
        let snapshot = app.world().resource::<MenuInputLatch>().snapshot();
        assert!(!snapshot.grip_held && snapshot.trigger_held);
    }

    #[test]
    fn untouched_keys_leave_latch_alone() {
        let mut app = make_app();
        app.world().resource::<MenuInputLatch>().set_grip(true);
        app.update();
        assert!(app.world().resource::<MenuInputLatch>().snapshot().grip_held);
    }

    #[test]
    fn toggle_key_flips_menu() {
        let mut app = make_app();
        tap(&mut app, TOGGLE_KEY, true);
        assert!(app.world().resource::<VrMenu>().is_open());
        tap(&mut app, TOGGLE_KEY, false);
        tap(&mut app, TOGGLE_KEY, true);
        assert!(!app.world().resource::<VrMenu>().is_open());
    }
}
