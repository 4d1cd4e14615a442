//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    AdminApiClient, DisplayCommand, DisplaySink, EnrollmentController, GalleryController,
    PendingFile, Settings,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

/// Forwards controller display commands to the UI thread.
#[derive(Clone)]
pub struct ChannelDisplay {
    ui_tx: Sender<UiEvent>,
}

impl ChannelDisplay {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl DisplaySink for ChannelDisplay {
    fn apply(&self, command: DisplayCommand) {
        match self.ui_tx.try_send(UiEvent::Display(command)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping display command");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event receiver gone; dropping display command");
            }
        }
    }
}

type Enrollment = EnrollmentController<AdminApiClient, ChannelDisplay>;
type Gallery = GalleryController<AdminApiClient, ChannelDisplay>;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        let client = match AdminApiClient::from_settings(&settings) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!("invalid admin API settings: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };
        tracing::info!(api = client.base_url(), "backend worker started");

        let display = ChannelDisplay::new(ui_tx.clone());
        let enrollment: Arc<Enrollment> =
            Arc::new(EnrollmentController::new(client.clone(), display.clone()));
        let gallery: Arc<Gallery> = Arc::new(GalleryController::new(client, display));

        // Initial mount: show whatever the server already has.
        let initial = Arc::clone(&gallery);
        runtime.spawn(async move {
            let _ = initial.load_gallery().await;
        });

        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend handling command");
            let enrollment = Arc::clone(&enrollment);
            let gallery = Arc::clone(&gallery);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                handle_command(cmd, &enrollment, &gallery, &ui_tx).await;
            });
        }

        tracing::info!("ui command channel closed; backend worker exiting");
    });
}

/// Errors are already rendered by the controllers; results are dropped here.
async fn handle_command(
    cmd: BackendCommand,
    enrollment: &Enrollment,
    gallery: &Gallery,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::FetchStudent { student_id } => {
            let _ = enrollment.fetch(&student_id).await;
        }
        BackendCommand::CommitEnrollment => {
            let _ = enrollment.commit().await;
        }
        BackendCommand::SelectFiles { paths } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                match PendingFile::from_path(path).await {
                    Ok(file) => files.push(file),
                    Err(err) => {
                        tracing::warn!("skipping unreadable selection: {err}");
                        let _ = ui_tx.try_send(UiEvent::Notice(err.to_string()));
                    }
                }
            }
            gallery.select_files(files);
        }
        BackendCommand::UploadSelection => {
            let _ = gallery.upload().await;
        }
        BackendCommand::ReloadGallery => {
            let _ = gallery.load_gallery().await;
        }
    }
}
