//! Atlas library exports for testing

pub mod api;
pub mod core;
pub mod tui;
