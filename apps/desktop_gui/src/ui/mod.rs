//! UI layer for the desktop GUI: app shell, enrollment and gallery panels.

pub mod app;

pub use app::AdminGuiApp;
