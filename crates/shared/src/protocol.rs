use serde::{Deserialize, Serialize};

use crate::domain::{GalleryImage, StudentRecord, UploadResult};

pub const FORM_STUDENT_ID: &str = "student_id";
pub const FORM_STUDENT_NAME: &str = "student_name";
pub const FORM_PHOTO_URL: &str = "photo_url";
pub const FORM_SCHOOL_ID: &str = "school_id";
pub const FORM_FILES: &str = "files";

/// Lookup prefix; the student id is appended as a single percent-encoded path segment.
pub fn enroll_fetch_route() -> &'static str {
    "/enroll/fetch"
}

pub fn enroll_save_route() -> &'static str {
    "/enroll/save"
}

pub fn gallery_upload_route() -> &'static str {
    "/gallery/upload"
}

pub fn gallery_list_route() -> &'static str {
    "/gallery/list"
}

/// Multipart field pairs submitted to the save endpoint, in submission order.
pub fn enrollment_form_fields(student: &StudentRecord) -> [(&'static str, &str); 4] {
    [
        (FORM_STUDENT_ID, student.student_id.as_str()),
        (FORM_STUDENT_NAME, student.student_name.as_str()),
        (FORM_PHOTO_URL, student.photo_url.as_str()),
        (FORM_SCHOOL_ID, student.school_id.as_str()),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnrollmentResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub results: Vec<UploadResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryListResponse {
    pub images: Vec<GalleryImage>,
}
