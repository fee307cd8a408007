//! Interactive terminal session: setup screen, preview list, confirmation and progress.

pub mod app;
mod app_logic;
pub mod events;
pub mod models;
mod processing;
pub mod rendering;

pub use app::{App, Session};
pub use events::run_tui;
