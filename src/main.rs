//! Headless walkthrough of the menu: holds the grip until the menu opens, aims the
//! pointer hand at the page-turn slot, pulls the trigger, then exits.
use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, input::InputPlugin, log::LogPlugin, prelude::*};

use immersive_menu::{
    startup::{
        hands::{HandSide, PointerHand},
        ImmersiveMenuPlugin, MenuSystem,
    },
    systems::{
        interaction::{HapticPulse, MenuInputLatch},
        ui::{
            commands::WidgetCommand,
            menu::{defaults::build_default_menu, VrMenu},
            tree::WidgetId,
        },
    },
};

const FRAME_RATE: f64 = 90.0;
const GRIP_RELEASE_FRAME: u32 = 40;
const AIM_FRAME: u32 = 80;
const TRIGGER_DOWN_FRAME: u32 = 100;
const TRIGGER_UP_FRAME: u32 = 104;
const EXIT_FRAME: u32 = 150;
const AIM_DISTANCE: f32 = 5.0;

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / FRAME_RATE,
            ))),
            LogPlugin::default(),
            TransformPlugin,
            InputPlugin,
            ImmersiveMenuPlugin,
        ))
        .init_resource::<DemoScript>()
        .add_systems(Startup, setup)
        .add_systems(Update, run_script.before(MenuSystem::Input))
        .add_systems(Update, log_menu_output.after(MenuSystem::Drive))
        .run();
}

#[derive(Resource, Default)]
struct DemoScript {
    frame: u32,
    next_page_slot: Option<WidgetId>,
}

fn setup(mut commands: Commands, mut menu: ResMut<VrMenu>, mut script: ResMut<DemoScript>) {
    commands.spawn((Name::new("Left Hand"), HandSide::Left, Transform::IDENTITY));
    commands.spawn((
        Name::new("Right Hand"),
        HandSide::Right,
        Transform::from_xyz(0.0, -20.0, 0.0),
    ));

    match build_default_menu(&mut menu) {
        Ok(stock) => {
            script.next_page_slot = stock
                .slots
                .iter()
                .copied()
                .find(|id| menu.widget(*id).is_some_and(|node| node.name == "NextPage"));
        }
        Err(error) => error!("could not build the default menu: {error}"),
    }
}

fn run_script(
    mut script: ResMut<DemoScript>,
    latch: Res<MenuInputLatch>,
    menu: Res<VrMenu>,
    mut pointer_hand: Query<&mut Transform, With<PointerHand>>,
    mut exit: EventWriter<AppExit>,
) {
    script.frame += 1;
    match script.frame {
        1 => latch.set_grip(true),
        GRIP_RELEASE_FRAME => latch.set_grip(false),
        AIM_FRAME => {
            let target = script.next_page_slot.and_then(|id| menu.world_transform(id));
            let (Some(target), Ok(mut hand)) = (target, pointer_hand.single_mut()) else {
                warn!("nothing to aim at");
                return;
            };
            let normal = target.rotation * Vec3::Y;
            hand.translation = target.translation - normal * AIM_DISTANCE;
            hand.rotation = Quat::from_rotation_arc(Vec3::Z, normal);
        }
        TRIGGER_DOWN_FRAME => latch.set_trigger(true),
        TRIGGER_UP_FRAME => latch.set_trigger(false),
        EXIT_FRAME => {
            info!("demo finished after {} frames", script.frame);
            exit.write(AppExit::Success);
        }
        _ => {}
    }
}

fn log_menu_output(
    mut commands: EventReader<WidgetCommand>,
    mut haptics: EventReader<HapticPulse>,
    menu: Res<VrMenu>,
) {
    for command in commands.read() {
        let name = menu.widget(command.widget).map_or("?", |node| node.name.as_str());
        info!("`{name}` fired {:?} ({:?})", command.action, command.payload);
    }
    for pulse in haptics.read() {
        debug!(
            "haptic {:?}: {:.2} for {:.2}s",
            pulse.hand, pulse.intensity, pulse.duration
        );
    }
}
