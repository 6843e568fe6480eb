use crate::errors::MethodError;
use crate::methods::WeatherParams;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, info};

pub const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current conditions, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// `City, Country`
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind_speed: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, location: &str) -> Result<WeatherReport, MethodError>;
}

pub async fn get_weather(
    provider: &dyn WeatherProvider,
    params: &WeatherParams,
) -> Result<Value, MethodError> {
    info!("Weather lookup for: {}", params.location);

    let report = provider.current(&params.location).await?;
    serde_json::to_value(report).map_err(|e| MethodError::Internal(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: OPENWEATHER_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

/// Looks up current conditions in imperial units from the OpenWeather API.
pub struct OpenWeatherProvider {
    client: reqwest::Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[derive(Deserialize)]
struct CurrentWeather {
    name: String,
    #[serde(default)]
    sys: Sys,
    main: Main,
    #[serde(default)]
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Deserialize, Default)]
struct Sys {
    #[serde(default)]
    country: String,
}

#[derive(Deserialize)]
struct Main {
    temp: Number,
    humidity: Number,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
}

#[derive(Deserialize)]
struct Wind {
    speed: Number,
}

#[derive(Deserialize)]
struct UpstreamError {
    message: Option<String>,
}

impl From<CurrentWeather> for WeatherReport {
    fn from(current: CurrentWeather) -> Self {
        let description = current
            .weather
            .first()
            .map(|condition| capitalize(&condition.description))
            .unwrap_or_default();

        Self {
            location: format!("{}, {}", current.name, current.sys.country),
            temperature: format!("{} °F", current.main.temp),
            description,
            humidity: format!("{}%", current.main.humidity),
            wind_speed: format!("{} mph", current.wind.speed),
        }
    }
}

fn unreachable_upstream(error: reqwest::Error) -> MethodError {
    MethodError::Upstream {
        status: 500,
        message: error.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &str) -> Result<WeatherReport, MethodError> {
        let mut query = vec![("q", location), ("units", "imperial")];
        if let Some(api_key) = &self.config.api_key {
            query.push(("appid", api_key.as_str()));
        }

        debug!("Requesting {} for {}", self.config.endpoint, location);
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(unreachable_upstream)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<UpstreamError>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

            return Err(MethodError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let current: CurrentWeather = response.json().await.map_err(unreachable_upstream)?;
        Ok(current.into())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
