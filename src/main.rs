//! Wiring & DI. Entry point: bootstrap adapters, inject into the service, run UI.
//! No business logic here; the workflow lives in LogTimeService.

use dotenv::dotenv;
use jira_logtime::adapters::jira::JiraClient;
use jira_logtime::adapters::ui::{TerminalPresenter, TuiInputPort};
use jira_logtime::ports::{InputPort, PresenterPort, TrackerPort};
use jira_logtime::shared::config::AppConfig;
use jira_logtime::usecases::LogTimeService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    jira_logtime::adapters::ui::init_ui();

    let presenter = Arc::new(TerminalPresenter::new());
    let cfg = AppConfig::load()?;

    // --- Preconditions: every required setting present before any request ---
    let (credentials, calendar) = match cfg.credentials().and_then(|c| Ok((c, cfg.calendar()?))) {
        Ok(pair) => pair,
        Err(e) => {
            error!(error = %e, "configuration incomplete");
            presenter.show_error(&e.to_string());
            anyhow::bail!("{}", e);
        }
    };
    info!(
        username = %credentials.username,
        api_root = %credentials.api_root(),
        hours_per_day = calendar.hours_per_day(),
        days_per_week = calendar.days_per_week(),
        "configuration loaded"
    );

    // --- Tracker gateway (basic auth per request, no shared session) ---
    let tracker: Arc<dyn TrackerPort> =
        Arc::new(JiraClient::new(credentials).map_err(|e| anyhow::anyhow!("{}", e))?);

    // --- Service ---
    let service = LogTimeService::new(
        tracker,
        Arc::clone(&presenter) as Arc<dyn PresenterPort>,
        calendar,
        cfg.project_title(),
    );

    // --- Run (load table -> log time / reload / quit) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
