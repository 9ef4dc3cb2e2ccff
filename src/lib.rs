//! Hand-attached, ray-driven spatial menu core for dual-controller VR.
//!
//! The interaction core lives in [`systems`] and is plain Rust driven one frame at a
//! time through [`systems::ui::menu::VrMenu::update`]. [`startup`] wires it into a
//! bevy app; [`data`] holds the persisted settings.
pub mod data;
pub mod startup;
pub mod systems;
