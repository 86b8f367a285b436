//! List Insights
//!
//! Reads fetched task-list snapshots and prints status, member and period
//! analytics for each tracked list.

use anyhow::{Result, bail};
use clap::Parser;
use list_insights::cli::period::resolve_period;
use list_insights::cli::{Cli, Command};
use list_insights::config::{Config, ConfigLoader};
use list_insights::dashboard::{Dashboard, build_dashboard};
use list_insights::format::{
    OutputFormat, format_members_markdown, format_overview_markdown, format_period_markdown,
    format_statuses_markdown, format_tasks_markdown, to_json,
};
use list_insights::logging::{self, LogTarget};
use list_insights::source::{SnapshotSource, TaskSource};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    // If explicit config path given, set it as env var for ConfigLoader to pick up
    if let Some(config_path) = &cli.config {
        // SAFETY: set at startup before the runtime spawns any tasks that read the environment
        unsafe {
            std::env::set_var("LIST_INSIGHTS_CONFIG_PATH", config_path);
        }
    }
    let mut loader = ConfigLoader::load()?;
    if let Some(path) = loader.config_path() {
        debug!(path = %path.display(), "Using configuration file");
    }

    // Override config from CLI arguments
    apply_cli_overrides(loader.config_mut(), &cli);
    let config = loader.into_config();
    config.validate()?;

    let Some(format) = config.report.output_format() else {
        bail!("Unknown output format: {}", config.report.format);
    };
    if config.source.list_ids.is_empty() {
        bail!("No lists to report on. Pass --list <ID> or set source.list_ids in config.yaml.");
    }

    let today = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::minutes(i64::from(
            config.report.utc_offset_minutes,
        )))
        .unwrap_or_else(chrono::Utc::now)
        .date_naive();
    let period = resolve_period(cli.from.as_deref(), cli.to.as_deref(), &config.report, today)?;
    if let Some(ref p) = period
        && p.is_inverted()
    {
        warn!(
            start = %p.start,
            end = %p.end,
            "Reporting period starts after it ends; no tasks will match"
        );
    }

    let source: Arc<dyn TaskSource> =
        Arc::new(SnapshotSource::new(config.source.snapshot_dir.clone()));
    info!(
        lists = config.source.list_ids.len(),
        snapshot_dir = %config.source.snapshot_dir.display(),
        "Building dashboard"
    );
    let dashboard = build_dashboard(source, &config.source.list_ids, period).await;

    let command = cli.command.unwrap_or(Command::Overview);
    let output = render(&dashboard, &command, format, &config)?;
    println!("{}", output);

    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.snapshot_dir {
        config.source.snapshot_dir = dir.into();
    }
    if !cli.lists.is_empty() {
        config.source.list_ids = cli.lists.clone();
    }
    if let Some(format) = &cli.format {
        config.report.format = format.clone();
    }
}

/// Render the selected view.
fn render(
    dashboard: &Dashboard,
    command: &Command,
    format: OutputFormat,
    config: &Config,
) -> Result<String> {
    if matches!(command, Command::Period) && dashboard.period.is_none() {
        bail!("The period view needs --from/--to or report.period_days in config.yaml");
    }

    let top_members = config.report.top_members;
    let output = match (command, format) {
        (Command::Overview, OutputFormat::Markdown) => format_overview_markdown(dashboard),
        (Command::Tasks(args), OutputFormat::Markdown) => {
            format_tasks_markdown(dashboard, args.category()?)
        }
        (Command::Members, OutputFormat::Markdown) => format_members_markdown(dashboard),
        (Command::Period, OutputFormat::Markdown) => {
            format_period_markdown(dashboard, top_members)
        }
        (Command::Statuses, OutputFormat::Markdown) => format_statuses_markdown(dashboard),
        (Command::Tasks(args), OutputFormat::Json) => {
            let category = args.category()?;
            let tasks: Vec<_> = dashboard
                .reports()
                .map(|r| {
                    serde_json::json!({
                        "list_id": r.list_id,
                        "list_name": r.list_name,
                        "category": category,
                        "tasks": r.tasks_in(category),
                    })
                })
                .collect();
            to_json(&tasks)?
        }
        (_, OutputFormat::Json) => to_json(dashboard)?,
    };
    Ok(output)
}
