//! Command line and environment configuration.

use anyhow::{Context, Result};
use clap::Parser;
use database::neo4j::{Neo4jConfig, Neo4jHttpStore};
use logging::LogMode;
use mcp::handlers::process::{PdfLoaderConfig, TokioProcessLauncher};
use mcp::handlers::weather::{OPENWEATHER_ENDPOINT, OpenWeatherConfig, OpenWeatherProvider};
use mcp::{McpDispatcher, McpServices};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8090;

#[derive(Parser, Debug, Clone)]
#[command(name = "simple-mcp-fileserver", version, about, long_about = None)]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to listen on; falls back to MCP_PORT, then 8090
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
    #[arg(long, env = "MCP_PORT", hide = true)]
    pub mcp_port: Option<u16>,

    #[arg(long, env = "NEO4J_URI", default_value = "http://localhost:7474")]
    pub neo4j_uri: String,
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    pub neo4j_user: String,
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "", hide_env_values = true)]
    pub neo4j_password: String,
    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: Option<String>,
    #[arg(long, env = "WEATHER_ENDPOINT", default_value = OPENWEATHER_ENDPOINT)]
    pub weather_endpoint: String,

    /// Interpreter used for the PDF loader pipeline
    #[arg(long, env = "PDF_LOADER_PYTHON", default_value = "python3")]
    pub python: String,
    #[arg(long, env = "PDF_LOADER_SCRIPT", default_value = "run_pdf_loader.py")]
    pub pdf_loader_script: PathBuf,

    /// Also write logs to a rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    /// Write JSON logs to the log directory only, nothing to stderr
    #[arg(long, requires = "log_dir")]
    pub log_file_only: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_mode(&self) -> LogMode {
        match (&self.log_dir, self.log_file_only) {
            (Some(log_dir), true) => LogMode::ServerBackground {
                log_dir: log_dir.clone(),
            },
            (log_dir, _) => LogMode::ServerForeground {
                log_dir: log_dir.clone(),
            },
        }
    }

    pub fn effective_port(&self) -> u16 {
        self.port.or(self.mcp_port).unwrap_or(DEFAULT_PORT)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.effective_port())
    }

    pub fn neo4j_config(&self) -> Neo4jConfig {
        Neo4jConfig::new(&self.neo4j_uri)
            .with_credentials(&self.neo4j_user, &self.neo4j_password)
            .with_database(&self.neo4j_database)
    }

    pub fn weather_config(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            endpoint: self.weather_endpoint.clone(),
            api_key: self
                .openweather_api_key
                .clone()
                .filter(|key| !key.is_empty()),
        }
    }

    pub fn pdf_loader_config(&self) -> PdfLoaderConfig {
        PdfLoaderConfig {
            program: self.python.clone(),
            script: self.pdf_loader_script.clone(),
        }
    }

    /// Logs the effective configuration. Secrets are reported as set or not set.
    pub fn log_effective(&self) {
        info!("Bind address: {}", self.bind_address());
        info!(
            "Neo4j: {} (user: {}, database: {}, password: {})",
            self.neo4j_uri,
            self.neo4j_user,
            self.neo4j_database,
            set_or_not(!self.neo4j_password.is_empty())
        );
        info!(
            "Weather: {} (API key: {})",
            self.weather_endpoint,
            set_or_not(self.weather_config().api_key.is_some())
        );
        info!(
            "PDF loader: {} {}",
            self.python,
            self.pdf_loader_script.display()
        );
    }

    /// Builds the production collaborators and the dispatcher that owns them.
    pub fn build_dispatcher(&self) -> Result<McpDispatcher> {
        let graph_store =
            Neo4jHttpStore::new(self.neo4j_config()).context("Failed to create Neo4j client")?;
        let weather = OpenWeatherProvider::new(self.weather_config())
            .context("Failed to create weather client")?;

        Ok(McpDispatcher::new(McpServices::new(
            Arc::new(graph_store),
            Arc::new(weather),
            Arc::new(TokioProcessLauncher),
            self.pdf_loader_config(),
        )))
    }
}

fn set_or_not(is_set: bool) -> &'static str {
    if is_set { "set" } else { "not set" }
}
