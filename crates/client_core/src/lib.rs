use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{GalleryImage, StudentRecord, UploadResult},
    error::{ApiException, ErrorDetail},
    protocol::{
        enroll_fetch_route, enroll_save_route, enrollment_form_fields, gallery_list_route,
        gallery_upload_route, GalleryListResponse, SaveEnrollmentResponse, UploadResponse,
        FORM_FILES,
    },
};
use tracing::debug;
use url::Url;

pub mod display;
pub mod enrollment;
pub mod error;
pub mod gallery;
pub mod settings;

pub use display::{
    Control, ControlBracket, DisplayCommand, DisplaySink, GalleryEntry, StatusKind,
    StatusMessage, StatusRegion,
};
pub use enrollment::{CommitOutcome, EnrollmentController};
pub use error::{ClientError, EnrollmentError, UploadError};
pub use gallery::{GalleryController, PendingFile, UploadSummary};
pub use settings::{load_settings, Settings};

/// Remote student-record service: lookup and enrollment commit.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn fetch_student(&self, student_id: &str) -> Result<StudentRecord, ClientError>;
    async fn save_enrollment(
        &self,
        student: &StudentRecord,
    ) -> Result<SaveEnrollmentResponse, ClientError>;
}

/// Remote media service: batch upload and listing.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn upload_images(&self, files: &[PendingFile]) -> Result<Vec<UploadResult>, ClientError>;
    async fn list_images(&self) -> Result<Vec<GalleryImage>, ClientError>;
}

#[async_trait]
impl<T: StudentDirectory + ?Sized> StudentDirectory for Arc<T> {
    async fn fetch_student(&self, student_id: &str) -> Result<StudentRecord, ClientError> {
        (**self).fetch_student(student_id).await
    }

    async fn save_enrollment(
        &self,
        student: &StudentRecord,
    ) -> Result<SaveEnrollmentResponse, ClientError> {
        (**self).save_enrollment(student).await
    }
}

#[async_trait]
impl<T: MediaLibrary + ?Sized> MediaLibrary for Arc<T> {
    async fn upload_images(&self, files: &[PendingFile]) -> Result<Vec<UploadResult>, ClientError> {
        (**self).upload_images(files).await
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>, ClientError> {
        (**self).list_images().await
    }
}

#[derive(Debug, Clone)]
pub struct AdminApiClient {
    http: Client,
    base_url: String,
}

impl AdminApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: settings::validate_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    fn student_url(&self, student_id: &str) -> Result<Url, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url =
            Url::parse(&self.endpoint(enroll_fetch_route())).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot carry path segments".to_string()))?
            .push(student_id);
        Ok(url)
    }
}

/// Decodes a JSON body, turning any non-success status into an [`ApiException`]
/// that carries the server's `detail` when it sent one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let detail = ErrorDetail::from_body(&body).detail;
        return Err(ApiException::new(status.as_u16(), detail).into());
    }
    Ok(serde_json::from_str(&body)?)
}

fn file_part(file: &PendingFile) -> Result<Part, ClientError> {
    let part = Part::bytes(file.content.clone()).file_name(file.filename.clone());
    match &file.mime_type {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}

#[async_trait]
impl StudentDirectory for AdminApiClient {
    async fn fetch_student(&self, student_id: &str) -> Result<StudentRecord, ClientError> {
        let url = self.student_url(student_id)?;
        debug!(%url, "fetching student record");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn save_enrollment(
        &self,
        student: &StudentRecord,
    ) -> Result<SaveEnrollmentResponse, ClientError> {
        let form = enrollment_form_fields(student)
            .into_iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name, value.to_string())
            });
        debug!(student_id = %student.student_id, "submitting enrollment");
        let response = self
            .http
            .post(self.endpoint(enroll_save_route()))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl MediaLibrary for AdminApiClient {
    async fn upload_images(&self, files: &[PendingFile]) -> Result<Vec<UploadResult>, ClientError> {
        let mut form = Form::new();
        for file in files {
            form = form.part(FORM_FILES, file_part(file)?);
        }
        debug!(files = files.len(), "uploading gallery batch");
        let response = self
            .http
            .post(self.endpoint(gallery_upload_route()))
            .multipart(form)
            .send()
            .await?;
        let body: UploadResponse = read_json(response).await?;
        Ok(body.results)
    }

    async fn list_images(&self) -> Result<Vec<GalleryImage>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(gallery_list_route()))
            .send()
            .await?;
        let body: GalleryListResponse = read_json(response).await?;
        Ok(body.images)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
