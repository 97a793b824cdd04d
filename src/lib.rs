pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod types;
pub mod validation;

pub use app::{app, AppState};
pub use config::AppConfig;
