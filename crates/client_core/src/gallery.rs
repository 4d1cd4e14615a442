//! Select -> batch upload -> refresh workflow for the image gallery.

use std::{
    fmt,
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use shared::domain::UploadResult;
use tracing::{error, info, warn};

use crate::{
    display::{
        selection_counter_text, Control, ControlBracket, DisplayCommand, DisplaySink,
        GalleryEntry, InFlight, StatusMessage, StatusRegion, UPLOAD_IN_PROGRESS,
    },
    error::{ClientError, UploadError},
    MediaLibrary,
};

/// A file chosen by the operator, held in memory until the next upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub content: Vec<u8>,
}

impl PendingFile {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            filename,
            mime_type,
            content,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(filename, content))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl UploadSummary {
    /// Counts `"success"` entries; every other status is an error and is logged.
    pub fn tally(results: &[UploadResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            if result.status.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
                warn!(
                    filename = %result.filename,
                    reason = result.message.as_deref().unwrap_or("no message"),
                    "gallery upload rejected file"
                );
            }
        }
        summary
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Upload complete. Success: {}, Errors: {}",
            self.succeeded, self.failed
        )
    }
}

/// Drives file selection, batch upload, and gallery listing against a [`MediaLibrary`].
///
/// The rendered gallery is never cached here; every mutation is followed by a
/// full reload from the listing endpoint.
pub struct GalleryController<M, D> {
    library: M,
    display: D,
    selection: Mutex<Vec<PendingFile>>,
    uploading: InFlight,
}

impl<M: MediaLibrary, D: DisplaySink> GalleryController<M, D> {
    pub fn new(library: M, display: D) -> Self {
        Self {
            library,
            display,
            selection: Mutex::new(Vec::new()),
            uploading: InFlight::default(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.is_active()
    }

    pub fn selection_len(&self) -> usize {
        self.lock_selection().len()
    }

    /// Replaces the pending selection and refreshes the counter and upload control.
    pub fn select_files(&self, files: Vec<PendingFile>) {
        *self.lock_selection() = files;
        self.on_selection_changed();
    }

    pub fn on_selection_changed(&self) {
        let count = self.selection_len();
        self.display
            .apply(DisplayCommand::SetSelectionCounter(selection_counter_text(count)));
        self.display.apply(DisplayCommand::SetControl {
            control: Control::Upload,
            enabled: count > 0,
            label: Control::Upload.idle_label(),
        });
    }

    /// Uploads the whole selection as one request.
    ///
    /// Returns `Ok(None)` without side effects when nothing is selected. On every
    /// other path the gallery is reloaded and the selection is cleared.
    pub async fn upload(&self) -> Result<Option<UploadSummary>, UploadError> {
        let files = self.lock_selection().clone();
        if files.is_empty() {
            return Ok(None);
        }

        let mut bracket = ControlBracket::acquire(&self.display, &self.uploading, Control::Upload);
        self.show_status(StatusMessage::info(UPLOAD_IN_PROGRESS));

        let outcome = match self.library.upload_images(&files).await {
            Ok(results) => {
                let summary = UploadSummary::tally(&results);
                info!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    "gallery upload finished"
                );
                self.show_status(StatusMessage::info(summary.to_string()));
                Ok(Some(summary))
            }
            Err(source) => {
                error!(files = files.len(), error = %source, "gallery upload failed");
                let err = UploadError::from(source);
                self.show_status(StatusMessage::error(err.to_string()));
                Err(err)
            }
        };

        // Reload failures are logged inside and never change the upload outcome.
        let _ = self.load_gallery().await;

        self.lock_selection().clear();
        self.display.apply(DisplayCommand::ClearSelection);
        self.display
            .apply(DisplayCommand::SetSelectionCounter(selection_counter_text(0)));
        bracket.release_enabled(self.selection_len() > 0);

        outcome
    }

    /// Replaces the rendered gallery with the server's list, in server order.
    ///
    /// On failure the previous gallery stays as it was and only a log line is written.
    pub async fn load_gallery(&self) -> Result<usize, ClientError> {
        match self.library.list_images().await {
            Ok(images) => {
                let entries: Vec<GalleryEntry> =
                    images.into_iter().map(GalleryEntry::from).collect();
                let count = entries.len();
                self.display.apply(DisplayCommand::ReplaceGallery(entries));
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "error loading gallery");
                Err(err)
            }
        }
    }

    fn show_status(&self, message: StatusMessage) {
        self.display.apply(DisplayCommand::ShowStatus {
            region: StatusRegion::Upload,
            message,
        });
    }

    fn lock_selection(&self) -> MutexGuard<'_, Vec<PendingFile>> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
