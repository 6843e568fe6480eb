use async_trait::async_trait;
use database::testing::InMemoryGraphStore;
use mcp::handlers::process::{PdfLoaderConfig, TokioProcessLauncher};
use mcp::handlers::weather::{WeatherProvider, WeatherReport};
use mcp::{McpDispatcher, McpServices, MethodError};
use std::sync::Arc;

pub struct UnavailableWeather;

#[async_trait]
impl WeatherProvider for UnavailableWeather {
    async fn current(&self, _location: &str) -> Result<WeatherReport, MethodError> {
        Err(MethodError::Upstream {
            status: 503,
            message: "weather service unavailable".to_string(),
        })
    }
}

pub fn test_dispatcher() -> McpDispatcher {
    McpDispatcher::new(McpServices::new(
        Arc::new(InMemoryGraphStore::new()),
        Arc::new(UnavailableWeather),
        Arc::new(TokioProcessLauncher),
        PdfLoaderConfig::default(),
    ))
}
