use std::io;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use crossterm::event::KeyEventKind;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use chronos_core::models::{ChronosConfig, ReportMonth, TimeEntry};
use chronos_core::services::clockify::ClockifyClient;
use chronos_core::services::gitlab::GitlabClient;
use chronos_core::services::linear::LinearClient;
use chronos_core::services::tracker::{ActivityFeed, TimeTracker};
use chronos_core::services::{config_loader, duration};

use chronos_tui::app::{ActivityPanel, App, LogBuffer};
use chronos_tui::event::{spawn_input_task, AppEvent};
use chronos_tui::{keys, ui};

#[derive(Parser)]
#[command(name = "chronos", version, about = "Log and review Clockify time from the terminal")]
struct Cli {
    /// Write diagnostic logs to .chronos-debug.log in the working directory
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log time for a task today, e.g. `chronos log 1h30m "Code review"`
    #[command(alias = "l")]
    Log { duration: String, task: String },
    /// Open the interactive report for the current month
    #[command(alias = "r")]
    Report,
    /// Print account and workspace details
    #[command(alias = "ws")]
    Workspace,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let _guard = cli.debug.then(setup_debug_logging);

    let config = config_loader::load(&config_loader::default_config_dir())?;
    let clockify = ClockifyClient::new(config.clockify.clone(), config.request_timeout)?;

    match cli.command {
        Command::Log { duration, task } => log_time(&clockify, &config, &duration, &task).await,
        Command::Report => run_report(&clockify, &config).await,
        Command::Workspace => {
            println!("{}", clockify.workspace_info().await?);
            Ok(())
        }
    }
}

/// Configure file-based tracing to `.chronos-debug.log` in CWD.
/// Returns the guard that must be held alive for the duration of the program.
fn setup_debug_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", ".chronos-debug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .init();

    guard
}

async fn log_time(
    tracker: &dyn TimeTracker,
    config: &ChronosConfig,
    text: &str,
    task: &str,
) -> color_eyre::Result<()> {
    let parsed = duration::parse(text)?;
    let entry = TimeEntry::new(task, Utc::now(), parsed, config.default_project.clone());
    let id = tracker.create_entry(&entry).await?;
    println!(
        "Logged {} for task: {task} (ID: {id})",
        duration::format(parsed)
    );
    Ok(())
}

/// Fetch the month, then hand the terminal to the report grid.
async fn run_report(clockify: &ClockifyClient, config: &ChronosConfig) -> color_eyre::Result<()> {
    let month = ReportMonth::current();
    let (from, to) = month.range();

    let entries = clockify.fetch_entries(from, to).await?;
    let mut app = App::new(month, config.default_project.clone());
    app.load_entries(&entries);
    app.log
        .info(format!("Loaded {} time entries for {}", entries.len(), month.title()));

    load_activity(&mut app, config).await;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let _input_task = spawn_input_task(event_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut event_rx, clockify).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    tracker: &dyn TimeTracker,
) -> color_eyre::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let Some(event) = event_rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => {
                keys::handle_key(app, key, tracker).await;
            }
            AppEvent::Key(_) => {}
            AppEvent::Resize(width, height) => {
                tracing::debug!(width, height, "resize");
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Fill the activity panels. Feed failures are reported in the log panel only.
async fn load_activity(app: &mut App, config: &ChronosConfig) {
    let (from, to) = app.month.range();

    match &config.linear {
        Some(linear) => match LinearClient::new(linear.clone(), config.request_timeout) {
            Ok(client) => {
                fill_panel(&mut app.linear_activity, &mut app.log, "Linear", &client, from, to)
                    .await
            }
            Err(e) => app.log.error(format!("Failed to set up Linear client: {e}")),
        },
        None => {
            app.linear_activity = ActivityPanel::new("Linear is not configured (LINEAR_API_KEY)")
        }
    }

    match &config.gitlab {
        Some(gitlab) => match GitlabClient::new(gitlab.clone(), config.request_timeout) {
            Ok(client) => {
                fill_panel(&mut app.git_activity, &mut app.log, "GitLab", &client, from, to).await
            }
            Err(e) => app.log.error(format!("Failed to set up GitLab client: {e}")),
        },
        None => {
            app.git_activity = ActivityPanel::new("GitLab is not configured (GITLAB_API_KEY)")
        }
    }
}

async fn fill_panel(
    panel: &mut ActivityPanel,
    log: &mut LogBuffer,
    source: &str,
    feed: &dyn ActivityFeed,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) {
    match feed.last_activity(from, to).await {
        Ok(items) => panel.items = items,
        Err(e) => {
            tracing::warn!(source, error = %e, "activity_fetch_failed");
            log.error(format!("Failed to load {source} activity: {e}"));
        }
    }
}
