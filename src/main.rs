//! Churnwatch CLI
//!
//! Terminal front end for the churn analytics backend:
//! - Live dashboard with polling and manual refresh
//! - One-shot snapshot
//! - Single and batch churn predictions
//! - Backend health

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use churnwatch::api::{ApiClient, Prediction};
use churnwatch::logging::init_logging;
use churnwatch::render::{format_fraction, frame, render_dashboard, ViewOptions, DEFAULT_WIDTH};
use churnwatch::{
    fetch_snapshot, generate_default_config, Config, DashboardController, DashboardSettings,
    DashboardState, RiskLevel, FETCH_ERROR_MESSAGE,
};

#[derive(Parser)]
#[command(name = "churnwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live churn-prediction dashboard for the ML analytics backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config file and CHURNWATCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./churnwatch.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Live dashboard; Enter refreshes, q quits
    Watch,

    /// Fetch the dashboard once and print it
    Snapshot,

    /// Score one user with the active model
    Predict {
        /// User ID
        user_id: i64,
    },

    /// Score several users in one request
    BatchPredict {
        /// User IDs
        #[arg(required = true)]
        user_ids: Vec<i64>,
    },

    /// Check backend health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }

    init_logging(&config.logging);
    if let Some(path) = config.source() {
        tracing::info!("Loaded config from {:?}", path);
    }
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    let settings = DashboardSettings::from(&config.dashboard);
    let json = cli.format == "json";

    match cli.command {
        Commands::Watch => watch(connect(&config)?, settings).await?,

        Commands::Snapshot => {
            let client = connect(&config)?;
            let snapshot = match fetch_snapshot(&client, &settings).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::error!(error = %e, "Snapshot fetch failed");
                    eprintln!("{}", FETCH_ERROR_MESSAGE);
                    std::process::exit(1);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let state = DashboardState::Ready(snapshot);
                let body = render_dashboard(&state, ViewOptions::default());
                println!("{}", frame(&body, client.base_url(), DEFAULT_WIDTH));
            }
        }

        Commands::Predict { user_id } => {
            let prediction = connect(&config)?.predict_churn(user_id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                print_prediction_header();
                print_prediction_row(&prediction);
            }
        }

        Commands::BatchPredict { user_ids } => {
            let predictions = connect(&config)?.batch_predict(&user_ids).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&predictions)?);
            } else if predictions.is_empty() {
                println!("Backend returned no predictions.");
            } else {
                print_prediction_header();
                for prediction in &predictions {
                    print_prediction_row(prediction);
                }
            }
        }

        Commands::Health => {
            let client = connect(&config)?;
            match client.health_check().await {
                Ok(health) if json => println!("{}", serde_json::to_string_pretty(&health)?),
                Ok(health) => {
                    println!("Backend: {}", client.base_url());
                    println!("Status: {}", health.status);
                    println!("Model version: {}", health.model_version);
                    if let Some(environment) = health.environment {
                        println!("Environment: {}", environment);
                    }
                }
                Err(e) => {
                    eprintln!("Cannot reach analytics backend at {}", client.base_url());
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn connect(config: &Config) -> anyhow::Result<ApiClient> {
    ApiClient::new(&config.api.url)
        .with_context(|| format!("Invalid backend URL {:?}", config.api.url))
}

/// Redraw on every state change until `q`, end of input or Ctrl-C
async fn watch(client: ApiClient, settings: DashboardSettings) -> anyhow::Result<()> {
    let api_url = client.base_url().to_string();
    let controller = DashboardController::new(Arc::new(client), settings);
    let mut states = controller.subscribe();
    let handle = controller.mount();

    let options = ViewOptions {
        width: DEFAULT_WIDTH,
        interactive: true,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let initial = states.borrow_and_update().clone();
    draw(&initial, &api_url, options)?;

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                draw(&state, &api_url, options)?;
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().eq_ignore_ascii_case("q") => break,
                Some(_) => {
                    // Refresh and Retry are the same action
                    let controller = controller.clone();
                    tokio::spawn(async move { controller.refresh().await });
                }
                None => stdin_open = false,
            },
            _ = &mut ctrl_c => break,
        }
    }

    handle.unmount();
    Ok(())
}

fn draw(state: &DashboardState, api_url: &str, options: ViewOptions) -> anyhow::Result<()> {
    let body = render_dashboard(state, options);
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "\x1b[2J\x1b[H{}", frame(&body, api_url, options.width))?;
    stdout.flush()?;
    Ok(())
}

fn print_prediction_header() {
    println!(
        "{:<10} {:<12} {:<8} {:<12} {}",
        "User", "Churn", "Risk", "Confidence", "Model"
    );
    println!("{}", "-".repeat(56));
}

fn print_prediction_row(prediction: &Prediction) {
    println!(
        "{:<10} {:<12} {:<8} {:<12} {}",
        prediction.user_id,
        format_fraction(prediction.prediction),
        RiskLevel::classify(Some(prediction.prediction)).to_string(),
        format_fraction(prediction.confidence),
        prediction.model_version
    );
}
