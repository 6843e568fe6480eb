use crate::errors::MethodError;
use crate::handlers::{
    documents, filesystem, graph, initialize,
    process::{self, PdfLoaderConfig, ProcessLauncher},
    weather::{self, WeatherProvider},
};
use crate::methods::MethodCall;
use database::GraphStore;
use serde_json::Value;
use std::sync::Arc;

/// The external collaborators method handlers call into. Built once at
/// startup and shared read-only by every request.
pub struct McpServices {
    pub graph_store: Arc<dyn GraphStore>,
    pub weather: Arc<dyn WeatherProvider>,
    pub launcher: Arc<dyn ProcessLauncher>,
    pub pdf_loader: PdfLoaderConfig,
}

impl McpServices {
    pub fn new(
        graph_store: Arc<dyn GraphStore>,
        weather: Arc<dyn WeatherProvider>,
        launcher: Arc<dyn ProcessLauncher>,
        pdf_loader: PdfLoaderConfig,
    ) -> Self {
        Self {
            graph_store,
            weather,
            launcher,
            pdf_loader,
        }
    }

    pub async fn call(&self, call: MethodCall) -> Result<Value, MethodError> {
        match call {
            MethodCall::Initialize => Ok(initialize::initialize()),
            MethodCall::ReadFile(params) => filesystem::read_file(&params).await,
            MethodCall::WriteFile(params) => filesystem::write_file(&params).await,
            MethodCall::ListDir(params) => filesystem::list_dir(&params).await,
            MethodCall::ReadPdf(params) => documents::read_pdf(&params).await,
            MethodCall::ReadDocx(params) => documents::read_docx(&params).await,
            MethodCall::ReadExcel(params) => documents::read_excel(&params).await,
            MethodCall::GetWeather(params) => {
                weather::get_weather(self.weather.as_ref(), &params).await
            }
            MethodCall::SaveToNeo4j(params) => {
                graph::save_to_neo4j(self.graph_store.as_ref(), &params).await
            }
            MethodCall::ProcessPdf(params) => {
                process::process_pdf(self.launcher.as_ref(), &self.pdf_loader, &params).await
            }
        }
    }
}
