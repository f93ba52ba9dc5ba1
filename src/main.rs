//! tabpilot - relays textbook homework questions to an AI chat tab.
//!
//! Main entry point: connects to Chrome over CDP, finds the textbook
//! and assistant tabs, and runs the question flow against them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parking_lot::Mutex;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tabpilot_cdp::protocol::TargetInfo;
use tabpilot_cdp::{CdpClient, TabRegistry, chrome};
use tabpilot_config::schema::WEBSITE_URL_PLACEHOLDER;
use tabpilot_config::{Settings, SettingsStore};
use tabpilot_flow::{FlowConfig, FlowController};
use tabpilot_orchestrator::{AssistantEndpoint, Orchestrator, TextbookEndpoint};
use tabpilot_protocols::{AnswerPayload, RelayMessage};
use tabpilot_providers::adapter_for;

mod cli;

use cli::{Cli, Commands, ConfigAction};

/// Directory holding settings, logs and the managed Chrome profile.
fn tabpilot_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabpilot")
}

/// Initialize tracing with console and rolling file output.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = tabpilot_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tabpilot")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        None => run(&cli.endpoint, false, 9222, None).await,
        Some(Commands::Run {
            launch,
            port,
            profile_dir,
        }) => run(&cli.endpoint, launch, port, profile_dir).await,
        Some(Commands::Tabs) => list_tabs(&cli.endpoint).await,
        Some(Commands::Config { action }) => handle_config(action),
    }
}

/// Run the relay against a live Chrome.
async fn run(
    endpoint: &str,
    launch: bool,
    port: u16,
    profile_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    info!("tabpilot v{}", env!("CARGO_PKG_VERSION"));

    let store = SettingsStore::open_default();
    let settings = store.load()?;
    info!(
        "settings: provider={} delays={}..{}s turbo={}",
        settings.ai_model, settings.min_delay, settings.max_delay, settings.turbo_mode
    );
    if settings.website_url == WEBSITE_URL_PLACEHOLDER {
        warn!(
            "website_url is still the placeholder; set it with `tabpilot config set website_url <subdomain>`"
        );
    }

    if !chrome::is_chrome_running(endpoint).await {
        if !launch {
            anyhow::bail!(
                "no Chrome answering at {}; start one with --remote-debugging-port or pass --launch",
                endpoint
            );
        }
        let profile = profile_dir.unwrap_or_else(|| tabpilot_dir().join("chrome-profile"));
        chrome::launch_chrome(port, &profile).await?;
        wait_for_chrome(endpoint).await?;
    }

    let client = Arc::new(CdpClient::connect(endpoint).await?);

    let registry = Arc::new(Mutex::new(TabRegistry::new(
        settings.website_url.clone(),
        settings.ai_model,
    )));

    let targets = client.get_targets().await?;
    registry.lock().resolve(&targets);
    record_window_ids(&client, &registry).await;

    let snapshot = registry.lock().snapshot();
    let Some(textbook_tab) = snapshot.textbook else {
        anyhow::bail!(
            "no textbook tab found; open a tab whose URL contains \"{}\"",
            settings.website_url
        );
    };
    let textbook_session = Arc::new(client.attach_page(&textbook_tab.target_id).await?);

    let Some(assistant_tab) = snapshot.assistant else {
        let message = format!(
            "No {} tab is open. Open {} in another tab and restart tabpilot.",
            settings.ai_model.display_name(),
            settings.ai_model.chat_url()
        );
        textbook_session.alert(&message).await?;
        anyhow::bail!("{}", message);
    };
    let assistant_session = Arc::new(client.attach_page(&assistant_tab.target_id).await?);

    info!(
        "tabs resolved: textbook={} assistant={} same_window={}",
        textbook_tab.target_id, assistant_tab.target_id, snapshot.same_window
    );

    let (events_tx, events_rx) = mpsc::unbounded_channel::<RelayMessage>();
    let (answers_tx, answers_rx) = mpsc::unbounded_channel::<AnswerPayload>();

    let adapter = adapter_for(settings.ai_model);
    let assistant_endpoint = Arc::new(AssistantEndpoint::new(
        assistant_session,
        adapter,
        events_tx.clone(),
    ));
    let textbook_endpoint = Arc::new(TextbookEndpoint::new(textbook_session.clone(), answers_tx));

    let orchestrator = Arc::new(Orchestrator::new(
        registry.clone(),
        client.clone(),
        textbook_endpoint,
        assistant_endpoint.clone(),
        settings.ai_model,
    ));

    let (min_delay, max_delay) = settings.effective_delays();
    let (flow, flow_handle) = FlowController::new(
        textbook_session,
        events_tx,
        answers_rx,
        FlowConfig {
            min_delay,
            max_delay,
        },
    );

    tokio::spawn(orchestrator.run(events_rx));
    tokio::spawn(watch_targets(client.clone(), registry.clone()));
    tokio::spawn(skip_on_stdin(flow_handle.clone()));

    let flow_task = tokio::spawn(flow.run());

    info!("running; press Enter to skip a delay, Ctrl-C to stop");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            flow_handle.stop();
            assistant_endpoint.cancel_observation();
        }
        _ = flow_task => {
            info!("question flow ended");
            assistant_endpoint.cancel_observation();
        }
    }

    Ok(())
}

/// Poll the debug endpoint until a freshly launched Chrome answers.
async fn wait_for_chrome(endpoint: &str) -> anyhow::Result<()> {
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(500)).await;
        if chrome::is_chrome_running(endpoint).await {
            return Ok(());
        }
    }
    anyhow::bail!("Chrome did not come up on {}", endpoint)
}

/// Record browser window IDs for the tracked tabs. Best effort: a
/// failure just leaves same-window detection off.
async fn record_window_ids(client: &CdpClient, registry: &Mutex<TabRegistry>) {
    let tracked: Vec<String> = {
        let registry = registry.lock();
        [registry.textbook(), registry.assistant()]
            .into_iter()
            .flatten()
            .map(|tab| tab.target_id.clone())
            .collect()
    };
    for target_id in tracked {
        match client.window_for_target(&target_id).await {
            Ok(window_id) => registry.lock().set_window_id(&target_id, window_id),
            Err(e) => debug!("window lookup failed for {}: {}", target_id, e),
        }
    }
}

/// Keep the registry current from target discovery events.
async fn watch_targets(client: Arc<CdpClient>, registry: Arc<Mutex<TabRegistry>>) {
    let mut events = match client.watch_targets().await {
        Ok(events) => events,
        Err(e) => {
            warn!("target discovery unavailable: {}", e);
            return;
        }
    };

    while let Some(event) = events.recv().await {
        let Some(method) = event.method.as_deref() else {
            continue;
        };
        let Some(params) = event.params else {
            continue;
        };
        match method {
            "Target.targetCreated" | "Target.targetInfoChanged" => {
                if let Ok(target) =
                    serde_json::from_value::<TargetInfo>(params["targetInfo"].clone())
                {
                    registry.lock().observe(&target);
                    record_window_ids(&client, &registry).await;
                }
            }
            "Target.targetDestroyed" => {
                if let Some(target_id) = params["targetId"].as_str() {
                    registry.lock().remove(target_id);
                }
            }
            _ => {}
        }
    }
}

/// Any line on stdin skips the current pre-answer countdown.
async fn skip_on_stdin(handle: tabpilot_flow::FlowHandle) {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Ok(Some(_)) = lines.next_line().await {
        handle.skip_delay();
    }
}

/// List open tabs and their classification.
async fn list_tabs(endpoint: &str) -> anyhow::Result<()> {
    let settings = SettingsStore::open_default().load()?;
    let client = CdpClient::connect(endpoint).await?;
    let registry = TabRegistry::new(settings.website_url, settings.ai_model);

    let targets = client.get_targets().await?;
    for target in targets.iter().filter(|t| t.is_page()) {
        let role = registry
            .classify(&target.url)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {:<20} {}", role, target.target_id, target.url);
    }
    Ok(())
}

/// Settings subcommands.
fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    let store = SettingsStore::open_default();
    match action {
        ConfigAction::Show => {
            print_settings(&store.load()?);
        }
        ConfigAction::Set { key, value } => {
            let settings = store.set_key(&key, &value)?;
            println!("{} = {}", key, value);
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("ai_model    = {}", settings.ai_model);
    println!("min_delay   = {}", settings.min_delay);
    println!("max_delay   = {}", settings.max_delay);
    println!("turbo_mode  = {}", settings.turbo_mode);
    println!("website_url = {}", settings.website_url);
}
