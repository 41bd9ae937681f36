use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerpilot::backend::HttpBackend;
use careerpilot::config::Config;
use careerpilot::controller::{Controller, FileClipboard, Readiness};
use careerpilot::models::file::StagedFile;
use careerpilot::ui::markup::render_page_html;
use careerpilot::ui::terminal::render_page;

/// Tailor a résumé to a job description using the Career-Pilot backend.
#[derive(Debug, Parser)]
#[command(name = "careerpilot", version)]
struct Cli {
    /// Résumé document (.txt, .md or .pdf)
    #[arg(long)]
    resume: PathBuf,

    /// File containing the job description
    #[arg(long, conflicts_with = "job_text", required_unless_present = "job_text")]
    job_description: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,

    /// Write the status card, notifications and results as an HTML fragment
    #[arg(long)]
    html: Option<PathBuf>,

    /// Copy the tailored résumé into this file
    #[arg(long)]
    copy_to: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    std::panic::set_hook(Box::new(|panic| {
        error!("Panic: {panic}");
    }));

    info!("Starting Career-Pilot client v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Backend: {} (timeout {}s)",
        config.api_base_url,
        config.request_timeout.as_secs()
    );

    let backend = Arc::new(HttpBackend::new(config.api_base_url.clone()));
    let controller = Arc::new(Controller::new(backend, config.request_timeout));

    let task_controller = controller.clone();
    let completed = controller
        .supervise(async move { run(&cli, &task_controller).await })
        .await
        .unwrap_or(false);

    print!("{}", render_page(&controller.page(), Instant::now()));

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Drives the page the way a user would. Returns false when a step was refused or failed;
/// the reason is already on the page.
async fn run(cli: &Cli, controller: &Controller) -> Result<bool> {
    if controller.check_system_status().await != Readiness::Ready {
        warn!("Backend not ready, stopping");
        return Ok(false);
    }

    let file = StagedFile::read_from_path(&cli.resume).await?;
    if !controller.on_file_chosen(file) {
        return Ok(false);
    }
    if controller.upload_resume().await.is_err() {
        return Ok(false);
    }

    let job_description = match (&cli.job_description, &cli.job_text) {
        (Some(path), _) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };
    controller.on_job_description_changed(job_description);

    if controller.tailor_resume().await.is_err() {
        return Ok(false);
    }

    if let Some(path) = &cli.copy_to {
        controller.copy_results(&FileClipboard::new(path)).await;
    }

    if let Some(path) = &cli.html {
        let html = render_page_html(&controller.page(), Instant::now());
        tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        info!("Results written to {}", path.display());
    }

    Ok(true)
}
