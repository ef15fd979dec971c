//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Wrapping blocks into screen rows
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod layout;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::{centered_popup_rect, dialog_rect};
pub use render::{
    PLACEHOLDER, REFRESH_LABEL, SUBMIT_LABEL, ScreenLayout, point_in_rect, render, screen_layout,
};
