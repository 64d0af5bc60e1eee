//! Command implementations for foscam-cli

pub mod camera;
pub mod info;
pub mod table;

pub use camera::{run, snap};
pub use info::info;
pub use table::commands;
