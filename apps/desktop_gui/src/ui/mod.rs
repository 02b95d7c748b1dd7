//! UI layer for the desktop app: application shell, responsive roster
//! views, and the student editor modal.

pub mod app;

pub use app::DesktopGuiApp;
