//! Terminal rendering of controller display commands.

use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

use client_core::{DisplayCommand, DisplaySink, StatusKind, StatusMessage, StatusRegion};

/// Prints each display command as one or more plain lines.
///
/// Control enable/disable churn is only printed at `debug` level since a
/// terminal has no buttons to grey out.
pub struct TerminalDisplay<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn render_lines(command: &DisplayCommand) -> Vec<String> {
    match command {
        DisplayCommand::SetControl { .. }
        | DisplayCommand::HidePreview
        | DisplayCommand::ClearSelection => Vec::new(),
        DisplayCommand::ShowStatus { region, message } => match message {
            StatusMessage::Hidden => Vec::new(),
            StatusMessage::Visible { kind, text } => {
                let region = match region {
                    StatusRegion::Enrollment => "enroll",
                    StatusRegion::Upload => "upload",
                };
                let tag = match kind {
                    StatusKind::Info => "info",
                    StatusKind::Success => "ok",
                    StatusKind::Error => "error",
                };
                vec![format!("[{region}:{tag}] {text}")]
            }
        },
        DisplayCommand::ShowPreview(student) => vec![
            format!("Student ID: {}", student.student_id),
            format!("Name:       {}", student.student_name),
            format!("School ID:  {}", student.school_id),
            format!("Photo:      {}", student.photo_url),
        ],
        DisplayCommand::SetSelectionCounter(text) => vec![text.clone()],
        DisplayCommand::ReplaceGallery(entries) => {
            let mut lines = vec![format!("Gallery ({} images)", entries.len())];
            lines.extend(
                entries
                    .iter()
                    .map(|entry| format!("  {}  {}", entry.label, entry.image_url)),
            );
            lines
        }
    }
}

impl<W: Write + Send> DisplaySink for TerminalDisplay<W> {
    fn apply(&self, command: DisplayCommand) {
        if let DisplayCommand::SetControl {
            control,
            enabled,
            label,
        } = &command
        {
            tracing::debug!(?control, enabled, label, "control state");
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in render_lines(&command) {
            if let Err(err) = writeln!(out, "{line}") {
                tracing::warn!("failed to write to terminal: {err}");
                return;
            }
        }
    }
}
