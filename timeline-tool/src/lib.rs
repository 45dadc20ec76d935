mod app;
mod config;

pub use app::run_native;
