//! The fixed set of methods this server answers, and the typed payload each one accepts.

use crate::errors::MethodError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum MethodName {
    #[strum(serialize = "initialize")]
    Initialize,
    #[strum(serialize = "readFile")]
    ReadFile,
    #[strum(serialize = "writeFile")]
    WriteFile,
    #[strum(serialize = "listDir")]
    ListDir,
    #[strum(serialize = "readPDF")]
    ReadPdf,
    #[strum(serialize = "readDocx")]
    ReadDocx,
    #[strum(serialize = "readExcel")]
    ReadExcel,
    #[strum(serialize = "get_weather")]
    GetWeather,
    #[strum(serialize = "saveToNeo4j")]
    SaveToNeo4j,
    #[strum(serialize = "processPdf")]
    ProcessPdf,
}

impl MethodName {
    /// Resolves the `method` field of a request. Lookup is exact and case-sensitive.
    pub fn resolve(method: Option<&str>) -> Result<Self, MethodError> {
        method
            .and_then(|name| name.parse().ok())
            .ok_or(MethodError::MethodNotFound)
    }

    pub fn description(&self) -> &'static str {
        match self {
            MethodName::Initialize => "Describe the server and its capabilities",
            MethodName::ReadFile => "Read a file from disk",
            MethodName::WriteFile => "Write a file to disk",
            MethodName::ListDir => "List directory contents",
            MethodName::ReadPdf => "Extract the text of a PDF document",
            MethodName::ReadDocx => "Extract the text of a DOCX document",
            MethodName::ReadExcel => "Read the rows of the first sheet of a spreadsheet",
            MethodName::GetWeather => "Get the current weather conditions for a location",
            MethodName::SaveToNeo4j => "Run a Cypher statement against Neo4j",
            MethodName::ProcessPdf => {
                "Process a PDF file into Neo4j using the external loader pipeline"
            }
        }
    }

    pub fn read_only(&self) -> bool {
        !matches!(
            self,
            MethodName::WriteFile | MethodName::SaveToNeo4j | MethodName::ProcessPdf
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathParams {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriteFileParams {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherParams {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CypherParams {
    pub cypher: String,
}

/// A validated call: the method together with params of the shape it requires.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodCall {
    Initialize,
    ReadFile(PathParams),
    WriteFile(WriteFileParams),
    ListDir(PathParams),
    ReadPdf(PathParams),
    ReadDocx(PathParams),
    ReadExcel(PathParams),
    GetWeather(WeatherParams),
    SaveToNeo4j(CypherParams),
    ProcessPdf(PathParams),
}

impl MethodCall {
    pub fn parse(name: MethodName, params: Value) -> Result<Self, MethodError> {
        let call = match name {
            // initialize takes no input; whatever was sent is ignored
            MethodName::Initialize => MethodCall::Initialize,
            MethodName::ReadFile => MethodCall::ReadFile(decode(params)?),
            MethodName::WriteFile => MethodCall::WriteFile(decode(params)?),
            MethodName::ListDir => MethodCall::ListDir(decode(params)?),
            MethodName::ReadPdf => MethodCall::ReadPdf(decode(params)?),
            MethodName::ReadDocx => MethodCall::ReadDocx(decode(params)?),
            MethodName::ReadExcel => MethodCall::ReadExcel(decode(params)?),
            MethodName::GetWeather => MethodCall::GetWeather(decode(params)?),
            MethodName::SaveToNeo4j => MethodCall::SaveToNeo4j(decode(params)?),
            MethodName::ProcessPdf => MethodCall::ProcessPdf(decode(params)?),
        };

        Ok(call)
    }

    pub fn name(&self) -> MethodName {
        match self {
            MethodCall::Initialize => MethodName::Initialize,
            MethodCall::ReadFile(_) => MethodName::ReadFile,
            MethodCall::WriteFile(_) => MethodName::WriteFile,
            MethodCall::ListDir(_) => MethodName::ListDir,
            MethodCall::ReadPdf(_) => MethodName::ReadPdf,
            MethodCall::ReadDocx(_) => MethodName::ReadDocx,
            MethodCall::ReadExcel(_) => MethodName::ReadExcel,
            MethodCall::GetWeather(_) => MethodName::GetWeather,
            MethodCall::SaveToNeo4j(_) => MethodName::SaveToNeo4j,
            MethodCall::ProcessPdf(_) => MethodName::ProcessPdf,
        }
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T, MethodError> {
    serde_json::from_value(params).map_err(|e| MethodError::InvalidParams(e.to_string()))
}
