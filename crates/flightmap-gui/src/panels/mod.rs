pub mod alert;
pub mod controls;
mod helpers;
pub mod menu_bar;
pub mod status;
pub mod viewport;

pub(crate) use helpers::{action_button, section_header};
