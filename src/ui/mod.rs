//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`menu`]: The clickable File/Edit menu bar
//! - [`dialog`] and [`picker`]: Key handling for the modal dialogs
//! - [`text`]: Display-column math for buffer lines

pub mod dialog;
pub mod menu;
pub mod picker;
pub mod text;

mod overlays;
mod render;
mod status;

pub use overlays::{render_confirm_dialog, render_error_dialog, render_file_picker};
pub use render::{render, split_screen};

#[cfg(test)]
mod tests;
