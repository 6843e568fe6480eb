use crate::errors::MethodError;
use crate::methods::PathParams;
use async_trait::async_trait;
use serde_json::Value;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Runs `program` with `args` to completion, capturing both output streams.
    async fn run(&self, program: &str, args: &[OsString]) -> io::Result<ProcessOutput>;
}

/// Launches real child processes without a shell in between.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessLauncher;

#[async_trait]
impl ProcessLauncher for TokioProcessLauncher {
    async fn run(&self, program: &str, args: &[OsString]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// How the external PDF loader is invoked: `<program> <script> <pdf path>`.
#[derive(Debug, Clone)]
pub struct PdfLoaderConfig {
    pub program: String,
    pub script: PathBuf,
}

impl Default for PdfLoaderConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from("run_pdf_loader.py"),
        }
    }
}

pub async fn process_pdf(
    launcher: &dyn ProcessLauncher,
    config: &PdfLoaderConfig,
    params: &PathParams,
) -> Result<Value, MethodError> {
    info!("Processing PDF for Neo4j: {}", params.path.display());

    let args = vec![
        OsString::from(config.script.as_os_str()),
        OsString::from(params.path.as_os_str()),
    ];
    let output = launcher
        .run(&config.program, &args)
        .await
        .map_err(|e| MethodError::Process(format!("Failed to start {}: {e}", config.program)))?;

    if !output.success {
        warn!(
            "PDF processing exited with {:?}: {}",
            output.exit_code, output.stderr
        );
        return Err(MethodError::Process(output.stderr));
    }

    info!("PDF processing complete");
    Ok(Value::String(output.stdout))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn script(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn config_for(script: &NamedTempFile) -> PdfLoaderConfig {
        PdfLoaderConfig {
            program: "sh".to_string(),
            script: script.path().to_path_buf(),
        }
    }

    fn params(path: &str) -> PathParams {
        PathParams {
            path: PathBuf::from(path),
        }
    }

    #[tokio::test]
    async fn returns_captured_stdout() {
        let loader = script("echo \"loaded $1\"\n");

        let result = process_pdf(
            &TokioProcessLauncher,
            &config_for(&loader),
            &params("/data/filing.pdf"),
        )
        .await
        .unwrap();

        assert_eq!(result, Value::String("loaded /data/filing.pdf\n".to_string()));
    }

    #[tokio::test]
    async fn path_is_passed_as_a_single_argument() {
        let loader = script("echo \"$#:$1\"\n");

        let result = process_pdf(
            &TokioProcessLauncher,
            &config_for(&loader),
            &params("/data/annual report; rm -rf x.pdf"),
        )
        .await
        .unwrap();

        assert_eq!(
            result,
            Value::String("1:/data/annual report; rm -rf x.pdf\n".to_string())
        );
    }

    #[tokio::test]
    async fn non_zero_exit_reports_stderr() {
        let loader = script("echo partial\necho \"no such pdf\" >&2\nexit 3\n");

        let error = process_pdf(
            &TokioProcessLauncher,
            &config_for(&loader),
            &params("/data/missing.pdf"),
        )
        .await
        .unwrap_err();

        assert_eq!(error.code(), 1);
        assert_eq!(error.to_string(), "no such pdf\n");
    }

    #[tokio::test]
    async fn missing_program_is_local_failure() {
        let config = PdfLoaderConfig {
            program: "/nonexistent/bin/python3".to_string(),
            script: PathBuf::from("run_pdf_loader.py"),
        };

        let error = process_pdf(&TokioProcessLauncher, &config, &params("/data/a.pdf"))
            .await
            .unwrap_err();

        assert_eq!(error.code(), 1);
        assert!(error.to_string().starts_with("Failed to start /nonexistent/bin/python3"));
    }
}
