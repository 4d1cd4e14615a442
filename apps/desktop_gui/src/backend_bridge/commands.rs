//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchStudent { student_id: String },
    CommitEnrollment,
    SelectFiles { paths: Vec<PathBuf> },
    UploadSelection,
    ReloadGallery,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchStudent { .. } => "fetch_student",
            BackendCommand::CommitEnrollment => "commit_enrollment",
            BackendCommand::SelectFiles { .. } => "select_files",
            BackendCommand::UploadSelection => "upload_selection",
            BackendCommand::ReloadGallery => "reload_gallery",
        }
    }
}
