//! egui desk: state, controller, renderers.

/// Line-chart data and per-chart handle slots.
pub mod charts;
/// Background jobs and the state transitions they drive.
pub mod controller;
/// Ring layout of the institution network.
pub mod diagram;
/// Plain UI state consumed by the renderer.
pub mod state;
/// eframe application and panels.
pub mod ui;
