//! Events flowing from the backend worker to the UI thread.

use client_core::DisplayCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A controller display command, applied to the view model as-is.
    Display(DisplayCommand),
    /// Operator-facing note that belongs to no status region (e.g. unreadable file).
    Notice(String),
    BackendUnavailable(String),
}
