//! Retained widget tree and the menu built on it.
//!
//! - `tree` / `widget`: the widget arena, node data and composed transforms
//! - `button`, `slider`, `panel`, `layout`: per-kind widget state
//! - `reflow`: layout and pagination passes over the tree
//! - `label`: glyph placement for button captions
//! - `commands`: trigger bindings and the commands widgets fire
//!
//! `systems::ui::menu` composes these into the hand-attached menu.
pub mod button;
pub mod commands;
pub mod label;
pub mod layout;
pub mod menu;
pub mod panel;
pub mod reflow;
pub mod slider;
pub mod transform;
pub mod tree;
pub mod widget;
