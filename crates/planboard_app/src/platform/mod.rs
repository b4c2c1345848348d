mod app;
mod config;
mod effects;
mod logging;
mod persistence;
mod render;

pub use app::run_app;
