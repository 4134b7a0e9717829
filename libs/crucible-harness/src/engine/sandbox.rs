//! Remote sandbox backend: ships generated files to an external
//! compile-and-run service over HTTP and captures its stdout/stderr.
//!
//! Protocol: POST `{language, version, files:[{name, content}]}` to
//! `<base>/execute`; the response carries `{run: {stdout, stderr}, message?}`
//! and a non-2xx status indicates failure. One outbound call per request, no
//! retries; any failure is terminal for the request.

use async_trait::async_trait;
use crucible_common::error::ExecutionError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::{Harness, SourceFile};

use super::{ExecutionBackend, RawOutput};

const DEFAULT_SANDBOX_URL: &str = "https://emkc.org/api/v2/piston";

pub struct SandboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl SandboxClient {
    /// Client against `SANDBOX_URL` or the public default service.
    pub fn new() -> Self {
        let base_url =
            std::env::var("SANDBOX_URL").unwrap_or_else(|_| DEFAULT_SANDBOX_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        SandboxClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn execute_url(&self) -> String {
        format!("{}/execute", self.base_url.trim_end_matches('/'))
    }
}

impl Default for SandboxClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SandboxRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<SandboxFile<'a>>,
}

#[derive(Serialize)]
struct SandboxFile<'a> {
    name: &'a str,
    content: &'a str,
}

impl<'a> From<&'a SourceFile> for SandboxFile<'a> {
    fn from(file: &'a SourceFile) -> Self {
        SandboxFile {
            name: &file.name,
            content: &file.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SandboxResponse {
    run: Option<RunOutput>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RunOutput {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
}

#[async_trait]
impl ExecutionBackend for SandboxClient {
    async fn run(&self, harness: &Harness) -> Result<RawOutput, ExecutionError> {
        let (language, version, files) = match harness {
            Harness::Files {
                language,
                version,
                files,
            } => (language.as_str(), version.as_str(), files),
            Harness::Script { .. } => {
                return Err(ExecutionError::BackendFailed {
                    message: "sandbox backend requires generated files".to_string(),
                    stdout: None,
                })
            }
        };

        let body = SandboxRequest {
            language,
            version,
            files: files.iter().map(SandboxFile::from).collect(),
        };

        debug!(
            language = language,
            version = version,
            files = files.len(),
            "Dispatching harness to sandbox"
        );

        let response = self
            .http
            .post(self.execute_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecutionError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        let payload: SandboxResponse =
            response
                .json()
                .await
                .map_err(|e| ExecutionError::BackendFailed {
                    message: format!("unparseable sandbox response: {e}"),
                    stdout: None,
                })?;

        if !status.is_success() {
            // The service's message is the human-readable cause when present.
            let message = payload
                .message
                .unwrap_or_else(|| format!("sandbox returned HTTP {status}"));
            return Err(ExecutionError::BackendFailed {
                message,
                stdout: payload.run.map(|r| r.stdout),
            });
        }

        let run = payload.run.unwrap_or_default();
        Ok(RawOutput::Text {
            stdout: run.stdout,
            stderr: run.stderr,
        })
    }
}
