use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs as async_fs;

// Import shared types
use millwright_types::*;

#[derive(Parser)]
#[command(name = "millwright")]
#[command(about = "Inspect and seed Millwright planner defaults")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend server URL
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Timeout for requests in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a defaults file the way the server seeder reads it
    Validate {
        /// Defaults file (default.json)
        file: PathBuf,

        /// Output format (json or summary)
        #[arg(long, default_value = "summary")]
        output: OutputFormat,
    },
    /// Show the seeded default settings
    Show {
        /// Output format (json or summary)
        #[arg(long, default_value = "summary")]
        output: OutputFormat,
    },
    /// Ask the server to seed default settings if none exist
    Seed,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to create HTTP client")?;

    match cli.command {
        Commands::Validate { file, output } => validate_file(&file, &output).await?,
        Commands::Show { output } => show_settings(&client, &cli.server, &output).await?,
        Commands::Seed => seed_settings(&client, &cli.server).await?,
    }

    Ok(())
}

async fn load_defaults(file_path: &Path) -> Result<DefaultSettingsFile> {
    let raw = async_fs::read(file_path)
        .await
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    DefaultSettingsFile::from_slice(&raw)
        .with_context(|| format!("Invalid defaults file: {}", file_path.display()))
}

async fn validate_file(file_path: &Path, output_format: &OutputFormat) -> Result<()> {
    let defaults = load_defaults(file_path).await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&defaults)?),
        OutputFormat::Summary => {
            println!("✅ {} is a valid defaults file", file_path.display());
            for line in summary_lines(&defaults) {
                println!("   {}", line);
            }
        }
    }
    Ok(())
}

fn summary_lines(defaults: &DefaultSettingsFile) -> Vec<String> {
    vec![
        format!("Resource limits: {}", defaults.resource_limits.len()),
        format!("Weights: {}", defaults.weights.len()),
        format!("Disabled recipes: {}", defaults.recipes_off.len()),
        format!("Inputs: {}", defaults.inputs.len()),
        format!("Outputs: {}", defaults.outputs.len()),
        format!(
            "Max item: {}",
            defaults.max_item.as_deref().unwrap_or("(none)")
        ),
        format!("Nuclear waste: {}", defaults.checkbox_nuclear_waste),
    ]
}

async fn show_settings(
    client: &reqwest::Client,
    server: &str,
    output_format: &OutputFormat,
) -> Result<()> {
    let response = client
        .get(format!("{}/api/default-settings", server))
        .send()
        .await
        .context("Failed to send settings request")?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        println!("ℹ️  No default settings have been seeded yet");
        return Ok(());
    }

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow::anyhow!(
            "Request failed with status {}: {}",
            status,
            error_text
        ));
    }

    let settings: DefaultSettingsResponse = response
        .json()
        .await
        .context("Failed to parse settings response")?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
        OutputFormat::Summary => {
            println!("📋 Default settings #{} (created {})", settings.id, settings.created_at);
            println!("   Max item: {}", settings.max_item.as_deref().unwrap_or("(none)"));
            println!("   Nuclear waste: {}", settings.checkbox_nuclear_waste);
            println!("   Disabled recipes: {}", settings.recipes_off);
            println!("   Outputs: {}", settings.outputs);
        }
    }
    Ok(())
}

async fn seed_settings(client: &reqwest::Client, server: &str) -> Result<()> {
    let response = client
        .post(format!("{}/api/admin/seed", server))
        .send()
        .await
        .context("Failed to send seed request")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow::anyhow!(
            "Seed failed with status {}: {}",
            status,
            error_text
        ));
    }

    let seed: SeedResponse = response
        .json()
        .await
        .context("Failed to parse seed response")?;

    println!("{}", describe_seed(&seed));
    Ok(())
}

fn describe_seed(seed: &SeedResponse) -> String {
    match (seed.outcome, seed.settings_id) {
        (SeedStatus::Created, Some(id)) => format!("🌱 Seeded default settings #{}", id),
        (SeedStatus::Created, None) => "🌱 Seeded default settings".to_string(),
        (SeedStatus::AlreadySeeded, _) => "✅ Default settings already present".to_string(),
        (SeedStatus::FileMissing, _) => "⚠️  Server has no defaults file to seed from".to_string(),
        (SeedStatus::DatabaseNotReady, _) => {
            "⏳ Database not ready, run migrations first".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"recipes_off": ["A", "B", "A"], "max_item": ""}"#)
            .unwrap();

        let defaults = load_defaults(file.path()).await.unwrap();
        let lines = summary_lines(&defaults);

        assert!(lines.contains(&"Disabled recipes: 2".to_string()));
        assert!(lines.contains(&"Max item: (none)".to_string()));
    }

    #[tokio::test]
    async fn test_load_defaults_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2]").unwrap();

        let err = load_defaults(file.path()).await.unwrap_err();
        assert!(err.to_string().starts_with("Invalid defaults file"));
    }

    #[test]
    fn test_describe_seed() {
        let seed = SeedResponse {
            outcome: SeedStatus::Created,
            settings_id: Some(3),
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(describe_seed(&seed), "🌱 Seeded default settings #3");
    }

    #[test]
    fn test_output_format_parse() {
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("url".parse::<OutputFormat>().is_err());
    }
}
