mod args;
mod commands;
pub mod config;
pub mod export_target;
mod handlers;
pub mod logging;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;

pub use args::Cli;
pub use commands::run;
