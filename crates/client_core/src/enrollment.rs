//! Lookup-then-commit workflow for enrolling a single student.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::domain::StudentRecord;
use tracing::{info, warn};

use crate::{
    display::{
        Control, ControlBracket, DisplayCommand, DisplaySink, InFlight, StatusMessage,
        StatusRegion,
    },
    error::EnrollmentError,
    StudentDirectory,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was previewed, so nothing was sent.
    Skipped,
    Enrolled { student_id: String, message: String },
}

/// Drives fetch -> preview -> commit against a [`StudentDirectory`].
///
/// Methods take `&self`: the previewed record sits behind a mutex that is
/// never held across a request, so a fetch may replace it while a commit
/// for the previous record is still in flight. The commit keeps sending the
/// record it read on entry.
pub struct EnrollmentController<S, D> {
    directory: S,
    display: D,
    current_student: Mutex<Option<StudentRecord>>,
    fetching: InFlight,
    committing: InFlight,
}

impl<S: StudentDirectory, D: DisplaySink> EnrollmentController<S, D> {
    pub fn new(directory: S, display: D) -> Self {
        Self {
            directory,
            display,
            current_student: Mutex::new(None),
            fetching: InFlight::default(),
            committing: InFlight::default(),
        }
    }

    pub fn current_student(&self) -> Option<StudentRecord> {
        self.lock_current().clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.is_active()
    }

    pub fn is_committing(&self) -> bool {
        self.committing.is_active()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub async fn fetch(&self, student_id: &str) -> Result<StudentRecord, EnrollmentError> {
        let student_id = student_id.trim();
        // Rejected before the control is touched, so there is nothing to restore.
        if student_id.is_empty() {
            let err = EnrollmentError::Validation;
            self.show_status(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        let _bracket = ControlBracket::acquire(&self.display, &self.fetching, Control::Fetch);
        self.show_status(StatusMessage::Hidden);
        self.display.apply(DisplayCommand::HidePreview);

        match self.directory.fetch_student(student_id).await {
            Ok(student) => {
                info!(student_id = %student.student_id, "student record loaded");
                *self.lock_current() = Some(student.clone());
                self.display.apply(DisplayCommand::ShowPreview(student.clone()));
                Ok(student)
            }
            Err(source) => {
                warn!(student_id, error = %source, "student lookup failed");
                *self.lock_current() = None;
                let err = EnrollmentError::Lookup(source);
                self.show_status(StatusMessage::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn commit(&self) -> Result<CommitOutcome, EnrollmentError> {
        let Some(student) = self.current_student() else {
            return Ok(CommitOutcome::Skipped);
        };

        let _bracket = ControlBracket::acquire(&self.display, &self.committing, Control::Commit);

        match self.directory.save_enrollment(&student).await {
            Ok(response) => {
                info!(student_id = %student.student_id, "student enrolled");
                self.show_status(StatusMessage::success(response.message.clone()));
                Ok(CommitOutcome::Enrolled {
                    student_id: student.student_id,
                    message: response.message,
                })
            }
            Err(source) => {
                warn!(student_id = %student.student_id, error = %source, "enrollment failed");
                let err = EnrollmentError::commit(source);
                self.show_status(StatusMessage::error(err.to_string()));
                Err(err)
            }
        }
    }

    fn show_status(&self, message: StatusMessage) {
        self.display.apply(DisplayCommand::ShowStatus {
            region: StatusRegion::Enrollment,
            message,
        });
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<StudentRecord>> {
        self.current_student
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/enrollment_tests.rs"]
mod tests;
