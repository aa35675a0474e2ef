//! Library exports for reuse in benchmarks and tests.
/// Backend HTTP API client and wire types.
pub mod api;
/// Per-user application directories.
pub mod app_dirs;
/// Child process hosting the analytical backend.
pub mod backend;
/// Persisted application settings.
pub mod config;
/// egui desk: state, controller and renderers.
pub mod egui_app;
mod http_client;
/// Log subscriber setup.
pub mod logging;
/// Domain types: dates, budgets, solutions, risk models, institution graph.
pub mod model;
