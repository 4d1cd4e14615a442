//! View model folded from controller display commands.
//!
//! This is the only state the egui layer renders from, so everything the
//! operator can see is reproducible by replaying display commands.

use client_core::{Control, DisplayCommand, GalleryEntry, StatusMessage, StatusRegion};
use shared::domain::StudentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: &'static str,
}

impl ControlState {
    fn idle(control: Control, enabled: bool) -> Self {
        Self {
            enabled,
            label: control.idle_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub fetch: ControlState,
    pub commit: ControlState,
    pub upload: ControlState,
    pub enrollment_status: StatusMessage,
    pub upload_status: StatusMessage,
    pub preview: Option<StudentRecord>,
    pub selection_counter: String,
    pub selected_files: Vec<String>,
    pub gallery: Vec<GalleryEntry>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            fetch: ControlState::idle(Control::Fetch, true),
            commit: ControlState::idle(Control::Commit, true),
            upload: ControlState::idle(Control::Upload, false),
            enrollment_status: StatusMessage::Hidden,
            upload_status: StatusMessage::Hidden,
            preview: None,
            selection_counter: client_core::display::NO_FILES_SELECTED.to_string(),
            selected_files: Vec::new(),
            gallery: Vec::new(),
        }
    }
}

impl ViewModel {
    pub fn apply(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::SetControl {
                control,
                enabled,
                label,
            } => {
                *self.control_mut(control) = ControlState { enabled, label };
            }
            DisplayCommand::ShowStatus { region, message } => match region {
                StatusRegion::Enrollment => self.enrollment_status = message,
                StatusRegion::Upload => self.upload_status = message,
            },
            DisplayCommand::HidePreview => self.preview = None,
            DisplayCommand::ShowPreview(student) => self.preview = Some(student),
            DisplayCommand::SetSelectionCounter(text) => self.selection_counter = text,
            DisplayCommand::ClearSelection => self.selected_files.clear(),
            DisplayCommand::ReplaceGallery(entries) => self.gallery = entries,
        }
    }

    /// Names of the picked files for display under the counter; `None` once cleared.
    pub fn selected_names(&self) -> Option<String> {
        if self.selected_files.is_empty() {
            None
        } else {
            Some(self.selected_files.join(", "))
        }
    }

    pub fn control(&self, control: Control) -> ControlState {
        match control {
            Control::Fetch => self.fetch,
            Control::Commit => self.commit,
            Control::Upload => self.upload,
        }
    }

    fn control_mut(&mut self, control: Control) -> &mut ControlState {
        match control {
            Control::Fetch => &mut self.fetch,
            Control::Commit => &mut self.commit,
            Control::Upload => &mut self.upload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str) -> StudentRecord {
        StudentRecord {
            student_id: id.to_string(),
            student_name: "Asha".to_string(),
            school_id: "SCH-7".to_string(),
            photo_url: format!("https://photos.test/{id}.jpg"),
        }
    }

    #[test]
    fn initial_state_has_upload_disabled_and_nothing_selected() {
        let view = ViewModel::default();
        assert!(!view.upload.enabled);
        assert_eq!(view.upload.label, "Upload & Process");
        assert!(view.fetch.enabled);
        assert_eq!(view.selection_counter, "No files selected");
        assert_eq!(view.enrollment_status, StatusMessage::Hidden);
    }

    #[test]
    fn new_status_replaces_previous_one() {
        let mut view = ViewModel::default();
        view.apply(DisplayCommand::ShowStatus {
            region: StatusRegion::Enrollment,
            message: StatusMessage::error("Student not found or API error"),
        });
        view.apply(DisplayCommand::ShowStatus {
            region: StatusRegion::Enrollment,
            message: StatusMessage::success("Student S-1 enrolled successfully."),
        });

        assert_eq!(
            view.enrollment_status,
            StatusMessage::success("Student S-1 enrolled successfully.")
        );
        assert_eq!(view.upload_status, StatusMessage::Hidden);
    }

    #[test]
    fn preview_follows_show_and_hide() {
        let mut view = ViewModel::default();
        view.apply(DisplayCommand::ShowPreview(student("S-1")));
        assert_eq!(view.preview, Some(student("S-1")));

        view.apply(DisplayCommand::HidePreview);
        assert_eq!(view.preview, None);
    }

    #[test]
    fn control_commands_update_the_named_control_only() {
        let mut view = ViewModel::default();
        view.apply(DisplayCommand::SetControl {
            control: Control::Commit,
            enabled: false,
            label: Control::Commit.busy_label(),
        });

        assert_eq!(
            view.control(Control::Commit),
            ControlState {
                enabled: false,
                label: "Enrolling..."
            }
        );
        assert!(view.control(Control::Fetch).enabled);
    }

    #[test]
    fn gallery_is_replaced_wholesale_and_selection_cleared() {
        let mut view = ViewModel::default();
        view.selected_files = vec!["a.jpg".to_string()];
        view.apply(DisplayCommand::ReplaceGallery(vec![GalleryEntry {
            image_url: "https://cdn.test/old.jpg".to_string(),
            label: "old.jpg".to_string(),
        }]));
        let fresh = vec![
            GalleryEntry {
                image_url: "https://cdn.test/b.jpg".to_string(),
                label: "b.jpg".to_string(),
            },
            GalleryEntry {
                image_url: "https://cdn.test/a.jpg".to_string(),
                label: "a.jpg".to_string(),
            },
        ];
        view.apply(DisplayCommand::ReplaceGallery(fresh.clone()));
        view.apply(DisplayCommand::ClearSelection);

        assert_eq!(view.gallery, fresh);
        assert!(view.selected_files.is_empty());
    }

    #[test]
    fn selected_names_render_until_selection_is_cleared() {
        let mut view = ViewModel::default();
        assert_eq!(view.selected_names(), None);

        view.selected_files = vec!["b.png".to_string(), "a.jpg".to_string()];
        assert_eq!(view.selected_names().as_deref(), Some("b.png, a.jpg"));

        view.apply(DisplayCommand::ClearSelection);
        assert_eq!(view.selected_names(), None);
    }
}
