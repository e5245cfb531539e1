//! Headless driver: loads the constellation from the backend into an
//! in-memory scene, optionally runs one coverage query, and logs the
//! resulting status, satellite list and results panel.
//!
//! Reports are logged at `info`, which is the default level. Verbosity is
//! controlled with `RUST_LOG` (e.g. `RUST_LOG=satviz=debug`).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use satviz::engine::{SatVizCommand, SatVizEngine};
use satviz::error::SatVizError;
use satviz::net::UreqTransport;
use satviz::options::{Options, SessionConfig};
use satviz::scene::MemoryScene;

/// How long to wait for one backend completion before giving up.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Session config (TOML): access token, initial time, model, backend
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Options preset (TOML)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Backend base URL, overrides the session config
    #[arg(short, long)]
    backend: Option<String>,

    /// Satellite model URI, overrides the session config
    #[arg(short, long)]
    model: Option<String>,

    /// Side-swing angle in degrees (0 to 60)
    #[arg(short, long)]
    angle: Option<f64>,

    /// Run a coverage query for this point after loading
    #[arg(short, long, num_args = 2, value_names = ["LAT", "LON"], allow_hyphen_values = true)]
    query: Option<Vec<f64>>,

    /// Request timeout in seconds, overrides the session config
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

fn session(args: &CliArgs) -> Result<SessionConfig, SatVizError> {
    let mut session = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    }
    .with_env();
    if let Some(url) = &args.backend {
        session.backend_url.clone_from(url);
    }
    if let Some(model) = &args.model {
        session.model_uri = Some(model.clone());
    }
    if let Some(timeout) = args.timeout {
        session.request_timeout_secs = timeout;
    }
    Ok(session)
}

fn wait_until_idle(engine: &mut SatVizEngine<MemoryScene>, limit: Duration) -> bool {
    let started = web_time::Instant::now();
    while engine.is_busy() {
        if started.elapsed() > limit {
            return false;
        }
        let _ = engine.wait(POLL_INTERVAL);
    }
    true
}

fn run(args: &CliArgs) -> Result<(), SatVizError> {
    let session = session(args)?;
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let limit = Duration::from_secs(session.request_timeout_secs.saturating_add(5));

    let now = Utc::now();
    let scene = MemoryScene::with_display(now, &options.display);
    let mut engine = SatVizEngine::new(scene, options, &session, now)?;
    let transport = UreqTransport::new(
        session.backend_url.clone(),
        Duration::from_secs(session.request_timeout_secs),
    );
    log::info!("backend: {}", transport.base_url());
    engine.connect(Arc::new(transport))?;

    match args.angle {
        Some(angle) => engine.execute(SatVizCommand::SetSideSwingAngle(angle))?,
        None => engine.execute(SatVizCommand::Reload)?,
    }
    if !wait_until_idle(&mut engine, limit) {
        return Err(SatVizError::Transport(
            "timed out waiting for satellite data".to_owned(),
        ));
    }
    log::info!("{}", engine.status_text());
    for row in engine.satellites() {
        log::info!(
            "  [{}] {}{}",
            row.index,
            row.name,
            if row.valid { "" } else { " (no valid trajectory)" }
        );
    }

    if let Some(point) = &args.query {
        if let [latitude, longitude] = point[..] {
            engine.execute(SatVizCommand::QueryCoverage {
                latitude,
                longitude,
            })?;
            if !wait_until_idle(&mut engine, limit) {
                return Err(SatVizError::Transport(
                    "timed out waiting for the coverage query".to_owned(),
                ));
            }
            log::info!("{}", engine.result_panel());
        }
    }

    engine.shutdown();
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    if args.schema {
        match serde_json::to_string_pretty(&Options::json_schema()) {
            Ok(schema) => log::info!("{schema}"),
            Err(e) => log::error!("cannot render schema: {e}"),
        }
        return;
    }

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
