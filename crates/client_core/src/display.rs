//! Display commands emitted by the controllers and the sink that receives them.
//!
//! Controllers never touch a rendering surface directly; each front end
//! supplies a [`DisplaySink`] that applies these commands to whatever it draws.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use shared::domain::{GalleryImage, StudentRecord};

pub const NO_FILES_SELECTED: &str = "No files selected";
pub const UPLOAD_IN_PROGRESS: &str = "Uploading and processing images...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Fetch,
    Commit,
    Upload,
}

impl Control {
    pub fn idle_label(self) -> &'static str {
        match self {
            Control::Fetch => "Fetch Details",
            Control::Commit => "Enroll Student",
            Control::Upload => "Upload & Process",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            Control::Fetch => "Fetching...",
            Control::Commit => "Enrolling...",
            Control::Upload => "Uploading...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusRegion {
    Enrollment,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Content of a single status region. A new message always replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Hidden,
    Visible { kind: StatusKind, text: String },
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self::Visible {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::Visible {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Visible {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// One rendered gallery tile: the image by URL, labelled with its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub image_url: String,
    pub label: String,
}

impl From<GalleryImage> for GalleryEntry {
    fn from(image: GalleryImage) -> Self {
        Self {
            image_url: image.image_url,
            label: image.filename,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    SetControl {
        control: Control,
        enabled: bool,
        label: &'static str,
    },
    ShowStatus {
        region: StatusRegion,
        message: StatusMessage,
    },
    HidePreview,
    ShowPreview(StudentRecord),
    SetSelectionCounter(String),
    ClearSelection,
    ReplaceGallery(Vec<GalleryEntry>),
}

pub fn selection_counter_text(count: usize) -> String {
    if count == 0 {
        NO_FILES_SELECTED.to_string()
    } else {
        format!("{count} files selected")
    }
}

pub trait DisplaySink: Send + Sync {
    fn apply(&self, command: DisplayCommand);
}

impl<T: DisplaySink + ?Sized> DisplaySink for Arc<T> {
    fn apply(&self, command: DisplayCommand) {
        (**self).apply(command);
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &T {
    fn apply(&self, command: DisplayCommand) {
        (**self).apply(command);
    }
}

/// Count of operations currently running for one control.
///
/// Advisory only: a second caller is not turned away, it just bumps the count.
#[derive(Debug, Default)]
pub struct InFlight(AtomicUsize);

impl InFlight {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire) > 0
    }

    fn enter(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel)
    }

    fn leave(&self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Disables a control for the lifetime of an operation and restores it on drop.
pub struct ControlBracket<'a, D: DisplaySink + ?Sized> {
    display: &'a D,
    in_flight: &'a InFlight,
    control: Control,
    enabled_on_release: bool,
}

impl<'a, D: DisplaySink + ?Sized> ControlBracket<'a, D> {
    pub fn acquire(display: &'a D, in_flight: &'a InFlight, control: Control) -> Self {
        let already_running = in_flight.enter();
        if already_running > 0 {
            tracing::debug!(?control, already_running, "overlapping operation started");
        }
        display.apply(DisplayCommand::SetControl {
            control,
            enabled: false,
            label: control.busy_label(),
        });
        Self {
            display,
            in_flight,
            control,
            enabled_on_release: true,
        }
    }

    pub fn release_enabled(&mut self, enabled: bool) {
        self.enabled_on_release = enabled;
    }
}

impl<D: DisplaySink + ?Sized> Drop for ControlBracket<'_, D> {
    fn drop(&mut self) {
        self.in_flight.leave();
        self.display.apply(DisplayCommand::SetControl {
            control: self.control,
            enabled: self.enabled_on_release,
            label: self.control.idle_label(),
        });
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
