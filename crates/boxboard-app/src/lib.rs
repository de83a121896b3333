//! Boxboard Application
//!
//! The application shell: windowing, input translation, the system
//! clipboard and configuration loading around [`boxboard_core::Canvas`].

mod app;
mod clipboard;
mod event_handler;

pub use app::{App, AppConfig, AppError};
pub use clipboard::SystemClipboard;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
