use std::time::Duration;

use client_core::{StatusKind, StatusMessage};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, orchestration::dispatch_backend_command, view::ViewModel},
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];
const GALLERY_ROW_HEIGHT: f32 = 104.0;
const PREVIEW_MAX_HEIGHT: f32 = 220.0;

pub struct AdminGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewModel,
    student_id_input: String,
    status: String,
}

impl AdminGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewModel::default(),
            student_id_input: String::new(),
            status: "Ready".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Display(command) => self.view.apply(command),
                UiEvent::Notice(message) => self.status = message,
                UiEvent::BackendUnavailable(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_status_message(ui: &mut egui::Ui, message: &StatusMessage) {
        let StatusMessage::Visible { kind, text } = message else {
            return;
        };
        match kind {
            StatusKind::Info => {
                ui.label(text);
            }
            StatusKind::Success => {
                ui.colored_label(egui::Color32::from_rgb(46, 160, 67), text);
            }
            StatusKind::Error => {
                ui.colored_label(egui::Color32::from_rgb(218, 54, 51), text);
            }
        }
    }

    fn show_enrollment_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Enroll Student");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Student ID");
            ui.text_edit_singleline(&mut self.student_id_input);
        });

        let fetch = self.view.fetch;
        if ui
            .add_enabled(fetch.enabled, egui::Button::new(fetch.label))
            .clicked()
        {
            let student_id = self.student_id_input.clone();
            self.dispatch(BackendCommand::FetchStudent { student_id });
        }

        ui.add_space(6.0);
        Self::show_status_message(ui, &self.view.enrollment_status);
        ui.add_space(6.0);

        let Some(student) = self.view.preview.clone() else {
            return;
        };
        ui.separator();
        ui.group(|ui| {
            egui::Grid::new("student_preview_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Student ID");
                    ui.label(&student.student_id);
                    ui.end_row();
                    ui.label("Name");
                    ui.label(&student.student_name);
                    ui.end_row();
                    ui.label("School ID");
                    ui.label(&student.school_id);
                    ui.end_row();
                });
            if !student.photo_url.is_empty() {
                ui.add(
                    egui::Image::new(student.photo_url.as_str())
                        .max_height(PREVIEW_MAX_HEIGHT)
                        .maintain_aspect_ratio(true),
                );
            }

            let commit = self.view.commit;
            if ui
                .add_enabled(commit.enabled, egui::Button::new(commit.label))
                .clicked()
            {
                self.dispatch(BackendCommand::CommitEnrollment);
            }
        });
    }

    fn show_gallery_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Gallery");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Select Images").clicked() {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files()
                {
                    self.view.selected_files = paths
                        .iter()
                        .map(|path| {
                            path.file_name()
                                .map(|name| name.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string())
                        })
                        .collect();
                    self.dispatch(BackendCommand::SelectFiles { paths });
                }
            }
            ui.label(&self.view.selection_counter);

            let upload = self.view.upload;
            if ui
                .add_enabled(upload.enabled, egui::Button::new(upload.label))
                .clicked()
            {
                self.dispatch(BackendCommand::UploadSelection);
            }
            if ui.button("Refresh").clicked() {
                self.dispatch(BackendCommand::ReloadGallery);
            }
        });
        if let Some(names) = self.view.selected_names() {
            ui.small(names);
        }
        Self::show_status_message(ui, &self.view.upload_status);
        ui.separator();

        // Only visible rows are laid out, so off-screen images are never requested.
        let entries = &self.view.gallery;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, GALLERY_ROW_HEIGHT, entries.len(), |ui, rows| {
                for entry in &entries[rows] {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Image::new(entry.image_url.as_str())
                                .fit_to_exact_size(egui::vec2(96.0, 96.0)),
                        )
                        .on_hover_text(entry.label.as_str());
                        ui.label(&entry.label);
                    });
                }
            });
    }
}

impl eframe::App for AdminGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::SidePanel::left("enrollment_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                self.show_enrollment_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_gallery_panel(ui);
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
