pub mod interaction;
pub mod motion;
pub mod time;
pub mod ui;
