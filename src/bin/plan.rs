use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use stricto_lib::config::{get_planner_config, load_config_from};
use stricto_lib::request::PlanRequest;
use stricto_lib::service::daily_plan;
use stricto_lib::state::AppState;
use stricto_lib::{logging, topics};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse()?;

    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => get_planner_config().clone(),
    };
    if let Some(dir) = args.topics_dir.clone() {
        config.topics_dir = dir;
    }

    logging::init_logging(&config)?;
    tracing::info!("stricto planner starting");

    let repo = topics::store::load_repository(&config.topics_dir).await;
    let state = AppState::new(repo, config);

    let raw = match &args.request {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    let request: PlanRequest = serde_json::from_str(&raw).context("Request is not valid JSON")?;

    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let response = daily_plan(&state, request, today);

    println!("{}", serde_json::to_string_pretty(&response)?);
    tracing::debug!(metrics = ?state.metrics.snapshot(), "Done");
    Ok(())
}

struct CliArgs {
    request: Option<PathBuf>,
    topics_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    today: Option<NaiveDate>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut parsed = CliArgs {
            request: None,
            topics_dir: None,
            config: None,
            today: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topics" => {
                    let value = args.next().context("Expected a directory after --topics")?;
                    parsed.topics_dir = Some(PathBuf::from(value));
                }
                "--config" => {
                    let value = args.next().context("Expected a file after --config")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--today" => {
                    let value = args.next().context("Expected YYYY-MM-DD after --today")?;
                    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .with_context(|| format!("Invalid --today date '{}'", value))?;
                    parsed.today = Some(date);
                }
                "-h" | "--help" => {
                    println!(
                        "Usage: stricto-plan [REQUEST.json] [--topics DIR] [--config FILE] [--today YYYY-MM-DD]\n\
                         Reads the request from stdin when no file is given."
                    );
                    std::process::exit(0);
                }
                other => {
                    parsed.request = Some(PathBuf::from(other));
                }
            }
        }
        Ok(parsed)
    }
}
