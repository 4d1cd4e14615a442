use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{GalleryImage, StudentRecord, UploadResult, UploadStatus},
    error::ApiException,
    protocol::SaveEnrollmentResponse,
};
use tokio::sync::Notify;

use crate::{
    display::{Control, DisplayCommand, DisplaySink, StatusMessage, StatusRegion},
    error::ClientError,
    gallery::PendingFile,
    MediaLibrary, StudentDirectory,
};

#[derive(Default)]
pub(crate) struct RecordingDisplay {
    commands: Mutex<Vec<DisplayCommand>>,
}

impl RecordingDisplay {
    pub(crate) fn commands(&self) -> Vec<DisplayCommand> {
        self.commands.lock().expect("display lock").clone()
    }

    pub(crate) fn clear(&self) {
        self.commands.lock().expect("display lock").clear();
    }

    pub(crate) fn statuses(&self, region: StatusRegion) -> Vec<StatusMessage> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                DisplayCommand::ShowStatus { region: r, message } if r == region => Some(message),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_status(&self, region: StatusRegion) -> Option<StatusMessage> {
        self.statuses(region).pop()
    }

    pub(crate) fn control_states(&self, control: Control) -> Vec<(bool, &'static str)> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                DisplayCommand::SetControl {
                    control: c,
                    enabled,
                    label,
                } if c == control => Some((enabled, label)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn galleries(&self) -> Vec<Vec<crate::display::GalleryEntry>> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                DisplayCommand::ReplaceGallery(entries) => Some(entries),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySink for RecordingDisplay {
    fn apply(&self, command: DisplayCommand) {
        self.commands.lock().expect("display lock").push(command);
    }
}

pub(crate) fn student(id: &str) -> StudentRecord {
    StudentRecord {
        student_id: id.to_string(),
        student_name: format!("Student {id}"),
        school_id: "SCH-7".to_string(),
        photo_url: format!("https://photos.test/{id}.jpg"),
    }
}

pub(crate) fn api_error(status: u16, detail: Option<&str>) -> ClientError {
    ApiException::new(status, detail.map(str::to_owned)).into()
}

#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub(crate) students: HashMap<String, StudentRecord>,
    pub(crate) save_error: Option<(u16, Option<String>)>,
    pub(crate) save_gate: Option<Arc<Notify>>,
    pub(crate) fetch_calls: Mutex<Vec<String>>,
    pub(crate) saved: Mutex<Vec<StudentRecord>>,
}

impl FakeDirectory {
    pub(crate) fn with_students(ids: &[&str]) -> Self {
        Self {
            students: ids.iter().map(|id| (id.to_string(), student(id))).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn saved(&self) -> Vec<StudentRecord> {
        self.saved.lock().expect("saved lock").clone()
    }
}

#[async_trait]
impl StudentDirectory for FakeDirectory {
    async fn fetch_student(&self, student_id: &str) -> Result<StudentRecord, ClientError> {
        self.fetch_calls
            .lock()
            .expect("calls lock")
            .push(student_id.to_string());
        self.students
            .get(student_id)
            .cloned()
            .ok_or_else(|| api_error(404, Some("Student not found in API response")))
    }

    async fn save_enrollment(
        &self,
        student: &StudentRecord,
    ) -> Result<SaveEnrollmentResponse, ClientError> {
        if let Some(gate) = &self.save_gate {
            gate.notified().await;
        }
        self.saved
            .lock()
            .expect("saved lock")
            .push(student.clone());
        if let Some((status, detail)) = &self.save_error {
            return Err(api_error(*status, detail.as_deref()));
        }
        Ok(SaveEnrollmentResponse {
            message: format!("Student {} enrolled successfully.", student.student_id),
        })
    }
}

pub(crate) fn upload_result(filename: &str, status: UploadStatus) -> UploadResult {
    UploadResult {
        filename: filename.to_string(),
        status,
        message: (status != UploadStatus::Success).then(|| "No face detected".to_string()),
        url: None,
    }
}

pub(crate) fn image(filename: &str) -> GalleryImage {
    GalleryImage {
        image_url: format!("https://cdn.test/gallery/{filename}"),
        filename: filename.to_string(),
        id: None,
    }
}

/// Scripted media service. Each `list_images` call pops the next scripted
/// listing; an exhausted script answers with a 500.
#[derive(Default)]
pub(crate) struct FakeLibrary {
    pub(crate) upload_response: Mutex<Option<Result<Vec<UploadResult>, ClientError>>>,
    pub(crate) listings: Mutex<VecDeque<Result<Vec<GalleryImage>, ClientError>>>,
    pub(crate) uploaded: Mutex<Vec<Vec<PendingFile>>>,
    pub(crate) list_calls: Mutex<usize>,
}

impl FakeLibrary {
    pub(crate) fn uploading(results: Vec<UploadResult>) -> Self {
        let library = Self::default();
        *library.upload_response.lock().expect("lock") = Some(Ok(results));
        library
    }

    pub(crate) fn failing_upload(err: ClientError) -> Self {
        let library = Self::default();
        *library.upload_response.lock().expect("lock") = Some(Err(err));
        library
    }

    pub(crate) fn then_list(self, listing: Result<Vec<GalleryImage>, ClientError>) -> Self {
        self.listings.lock().expect("lock").push_back(listing);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        *self.list_calls.lock().expect("lock")
    }

    pub(crate) fn uploaded(&self) -> Vec<Vec<PendingFile>> {
        self.uploaded.lock().expect("lock").clone()
    }
}

#[async_trait]
impl MediaLibrary for FakeLibrary {
    async fn upload_images(&self, files: &[PendingFile]) -> Result<Vec<UploadResult>, ClientError> {
        self.uploaded.lock().expect("lock").push(files.to_vec());
        self.upload_response
            .lock()
            .expect("lock")
            .take()
            .unwrap_or_else(|| Err(api_error(500, Some("no scripted upload"))))
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>, ClientError> {
        *self.list_calls.lock().expect("lock") += 1;
        self.listings
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500, None)))
    }
}

pub(crate) fn pending(filename: &str) -> PendingFile {
    PendingFile::new(filename, filename.as_bytes().to_vec())
}
