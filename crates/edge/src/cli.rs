// crates/edge/src/cli.rs

use crate::{router::app_router, state::AppState, Error};
use axum::{body::Body, http::Request};
use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use commerce::{CommerceState, InMemoryOrders};
use domain::setting::{CmsSettings, ContentSourceKind, Settings};
use serve::{ContentSource, FileSource, GraphQlClient};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// Marketing site server
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Failed to start site server: {}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("Site server stopped");
            ExitCode::SUCCESS
        },
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    let then = Utc::now();
    let settings = load_settings(&start.dir)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let source = content_source(&start.dir, &settings)?;
    let state = AppState::new(settings.site.clone(), source)?;
    let commerce = settings
        .commerce
        .enabled
        .then(|| CommerceState::new(Arc::new(InMemoryOrders::seeded())));

    let routes = app_router(state, commerce);
    let app = axum::ServiceExt::<Request<Body>>::into_make_service(routes);

    let addr = SocketAddr::new(settings.server.ip, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {}", e);
    }
    info!("Shutdown requested");
}

/// Load settings from `<dir>/settings.toml`.
#[tracing::instrument(skip_all)]
pub fn load_settings(dir: &Path) -> Result<Settings> {
    let path = dir.join("settings.toml");

    if !path.exists() {
        return Err(Error::Config(format!(
            "settings.toml not found at {}",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(&path).map_err(|err| {
        Error::Config(format!("Failed reading {}: {}", path.display(), err))
    })?;

    Ok(Settings::from_toml_str(&text)?)
}

/// Pick the content source named in settings. The CMS source needs its
/// credentials in the environment and fails here, before any socket is bound.
#[tracing::instrument(skip_all)]
pub fn content_source(dir: &Path, settings: &Settings) -> Result<Arc<dyn ContentSource>> {
    match settings.content.source {
        ContentSourceKind::Contentful => {
            let cms = CmsSettings::from_env()?;
            info!("Using CMS content source: {:?}", cms);
            Ok(Arc::new(GraphQlClient::new(cms)?))
        }
        ContentSourceKind::Files => {
            let rel = settings
                .content
                .dir
                .clone()
                .ok_or_else(|| Error::Config("content.dir is required for the files source".into()))?;
            let root = dir.join(rel);
            info!("Using file content source at {}", root.display());
            Ok(Arc::new(FileSource::new(root)))
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "site", version, about = "CMS-backed marketing site server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the site described by `<DIR>/settings.toml`
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Site directory (or set SITE_DIR)
    ///
    /// Must exist and contain `settings.toml`.
    #[arg(
        value_name = "DIR",
        env = "SITE_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}
