use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, AdminApiClient, CommitOutcome, EnrollmentController, GalleryController,
    PendingFile,
};
use tracing_subscriber::EnvFilter;

mod render;

use render::TerminalDisplay;

#[derive(Parser, Debug)]
#[command(about = "Student enrollment and gallery upload client")]
struct Args {
    /// Admin API base URL; overrides admin_client.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a student and print the preview.
    Fetch { student_id: String },
    /// Look up a student and commit the enrollment.
    Enroll { student_id: String },
    /// Upload images as one batch, then print the refreshed gallery.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the current gallery.
    Gallery,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.api_base_url = server_url;
    }
    let client = AdminApiClient::from_settings(&settings)?;
    tracing::info!(api = client.base_url(), "using admin API");
    let display = Arc::new(TerminalDisplay::new(io::stdout()));

    match args.command {
        Command::Fetch { student_id } => {
            let enrollment = EnrollmentController::new(client, display);
            enrollment.fetch(&student_id).await?;
        }
        Command::Enroll { student_id } => {
            let enrollment = EnrollmentController::new(client, display);
            enrollment.fetch(&student_id).await?;
            if let CommitOutcome::Skipped = enrollment.commit().await? {
                anyhow::bail!("no student previewed; nothing was enrolled");
            }
        }
        Command::Upload { files } => {
            let gallery = GalleryController::new(client, display);
            let mut pending = Vec::with_capacity(files.len());
            for path in &files {
                pending.push(
                    PendingFile::from_path(path)
                        .await
                        .with_context(|| format!("cannot select {}", path.display()))?,
                );
            }
            gallery.select_files(pending);
            gallery.upload().await?;
        }
        Command::Gallery => {
            let gallery = GalleryController::new(client, display);
            gallery.load_gallery().await?;
        }
    }

    Ok(())
}
