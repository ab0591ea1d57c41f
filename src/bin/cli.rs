//! Predictdash CLI
//!
//! Command-line client for the dashboard:
//! - Show and edit feature inputs
//! - Submit predictions
//! - Print chart data
//! - Run a one-off prediction without a server

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use predictdash::config::{generate_default_config, Config};
use predictdash::features::{FeatureSet, FEATURE_COUNT};
use predictdash::prediction::{PredictionClient, PredictionStatus, Predictor};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "predictdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the prediction dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard API URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show feature inputs and the current prediction
    Show,

    /// Set one feature value
    Set {
        /// Feature number, 1 to 7
        feature: usize,
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Restore all features to their defaults
    Reset,

    /// Submit the current inputs for prediction
    Predict {
        /// Return as soon as the submission is accepted
        #[arg(long)]
        no_wait: bool,
    },

    /// Print bar chart data
    Charts,

    /// Show server status
    Status,

    /// Predict once against the endpoint directly, without a dashboard server
    Oneshot {
        /// Feature overrides in N=value format (N is 1 to 7)
        #[arg(short, long = "set")]
        overrides: Vec<String>,
        /// Endpoint URL (default: from config)
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

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
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", cli.api_url.trim_end_matches('/'));

    match cli.command {
        Commands::Show => {
            let features = fetch(&client, &format!("{}/features", api)).await?;
            let prediction = fetch(&client, &format!("{}/prediction", api)).await?;

            if cli.format == "json" {
                let combined = serde_json::json!({
                    "features": features["features"],
                    "prediction": prediction,
                });
                println!("{}", serde_json::to_string_pretty(&combined)?);
            } else {
                print_features(&features);
                println!();
                println!("{}", describe_status(&prediction));
            }
        }

        Commands::Set { feature, value } => {
            let index = feature_index(feature)?;
            let response = client
                .put(format!("{}/features/{}", api, index))
                .json(&serde_json::json!({ "value": value }))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let features = read_json(response).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&features)?);
            } else {
                let name = features["features"][index]["name"].as_str().unwrap_or("-");
                println!("Set {} to {}", name, value);
            }
        }

        Commands::Reset => {
            let response = client
                .post(format!("{}/features/reset", api))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let features = read_json(response).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&features)?);
            } else {
                println!("Features reset to defaults");
                println!();
                print_features(&features);
            }
        }

        Commands::Predict { no_wait } => {
            let url = if no_wait {
                format!("{}/predict", api)
            } else {
                format!("{}/predict?wait=true", api)
            };
            let response = client
                .post(url)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let status = read_json(response).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", describe_status(&status));
            }

            if status["state"] == "failed" {
                std::process::exit(1);
            }
        }

        Commands::Charts => {
            let charts = fetch(&client, &format!("{}/charts", api)).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&charts)?);
            } else {
                println!("Feature Values Overview");
                print_chart(&charts["inputs"]);
                println!();
                println!("Feature Impact (Mockup)");
                print_chart(&charts["impact"]);
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url.trim_end_matches('/')))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!("Predictdash v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Endpoint:   {}", health["endpoint"].as_str().unwrap_or("-"));
                    println!(
                        "WebSocket clients: {}",
                        health["ws_connections"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => bail!("API returned error: {}", resp.status()),
                Err(e) => return Err(e).context(connect_hint(&cli.api_url)),
            }
        }

        Commands::Oneshot {
            overrides,
            endpoint,
            config,
        } => {
            let mut config = match config {
                Some(path) => Config::load_with_env(&path)?,
                None => Config::from_env(),
            };
            if let Some(endpoint) = endpoint {
                config.endpoint.url = endpoint;
            }

            let mut features = FeatureSet::with_defaults();
            for assignment in &overrides {
                let (feature, value) = parse_assignment(assignment)?;
                features.set_value(feature_index(feature)?, value)?;
            }

            let predictor = PredictionClient::new(config.endpoint.prediction_config())?;
            let status = PredictionStatus::from(predictor.predict(&features.values()).await);

            if cli.format == "json" {
                let body = serde_json::json!({
                    "features": features.values(),
                    "status": status,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Endpoint: {}", predictor.endpoint_url());
                println!("Features: {:?}", features.values());
                println!();
                match &status {
                    PredictionStatus::Success { prediction } => {
                        println!("Prediction: {}", prediction)
                    }
                    PredictionStatus::Failed { message, .. } => println!("Error: {}", message),
                    _ => {}
                }
            }

            if matches!(status, PredictionStatus::Failed { .. }) {
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn fetch(client: &reqwest::Client, url: &str) -> anyhow::Result<Value> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Cannot reach {}", url))?;
    read_json(response).await
}

async fn read_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(text);
        bail!("Request failed ({}): {}", status, message);
    }
    Ok(response.json().await?)
}

fn connect_hint(api_url: &str) -> String {
    format!(
        "Cannot connect to the dashboard API at {}. Start it with: cargo run --bin predictdash",
        api_url
    )
}

/// Convert a 1-based feature number to an index
fn feature_index(feature: usize) -> anyhow::Result<usize> {
    if feature == 0 || feature > FEATURE_COUNT {
        bail!("Feature number must be between 1 and {}", FEATURE_COUNT);
    }
    Ok(feature - 1)
}

/// Parse `N=value`
fn parse_assignment(s: &str) -> anyhow::Result<(usize, f64)> {
    let (feature, value) = s
        .split_once('=')
        .with_context(|| format!("Expected N=value, got {:?}", s))?;
    let feature = feature
        .trim()
        .parse()
        .with_context(|| format!("Invalid feature number in {:?}", s))?;
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value in {:?}", s))?;
    Ok((feature, value))
}

fn describe_status(status: &Value) -> String {
    match status["state"].as_str() {
        Some("pending") => "Prediction: pending...".to_string(),
        Some("success") => match &status["prediction"] {
            Value::String(s) => format!("Prediction: {}", s),
            other => format!("Prediction: {}", other),
        },
        Some("failed") => format!(
            "Error: {}",
            status["message"].as_str().unwrap_or("unknown error")
        ),
        _ => "No prediction yet".to_string(),
    }
}

fn print_features(data: &Value) {
    let Some(features) = data["features"].as_array() else {
        println!("No features");
        return;
    };

    println!("{:<3} {:<24} {:>12} {:>12}", "#", "Name", "Value", "Default");
    println!("{}", "-".repeat(54));
    for feature in features {
        println!(
            "{:<3} {:<24} {:>12} {:>12}",
            feature["index"].as_u64().map(|i| i + 1).unwrap_or(0),
            feature["name"].as_str().unwrap_or("-"),
            feature["value"].as_f64().unwrap_or(f64::NAN),
            feature["default_value"].as_f64().unwrap_or(f64::NAN),
        );
    }
}

fn print_chart(rows: &Value) {
    let Some(rows) = rows.as_array() else {
        println!("  No data");
        return;
    };

    let max = rows
        .iter()
        .filter_map(|r| r["value"].as_f64())
        .fold(0.0_f64, f64::max);

    for row in rows {
        let value = row["value"].as_f64().unwrap_or(0.0);
        let width = if max > 0.0 {
            ((value.max(0.0) / max) * 40.0).round() as usize
        } else {
            0
        };
        println!(
            "  {:<4} {:<40} {}",
            row["label"].as_str().unwrap_or("-"),
            "#".repeat(width),
            value
        );
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_index_bounds() {
        assert_eq!(feature_index(1).unwrap(), 0);
        assert_eq!(feature_index(7).unwrap(), 6);
        assert!(feature_index(0).is_err());
        assert!(feature_index(8).is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("3=170.5").unwrap(), (3, 170.5));
        assert_eq!(parse_assignment(" 1 = -2 ").unwrap(), (1, -2.0));
        assert!(parse_assignment("3").is_err());
        assert!(parse_assignment("x=1").is_err());
        assert!(parse_assignment("1=abc").is_err());
    }

    #[test]
    fn test_describe_status() {
        assert_eq!(describe_status(&json!({"state": "idle"})), "No prediction yet");
        assert_eq!(
            describe_status(&json!({"state": "success", "prediction": 42})),
            "Prediction: 42"
        );
        assert_eq!(
            describe_status(&json!({"state": "success", "prediction": "approved"})),
            "Prediction: approved"
        );
        assert_eq!(
            describe_status(&json!({"state": "failed", "message": "boom"})),
            "Error: boom"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }
}
