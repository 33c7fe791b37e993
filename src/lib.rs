//! snapscene
pub mod core;
pub mod drag;
pub mod logging;
pub mod scenes;
pub mod selection;
pub mod systems;
