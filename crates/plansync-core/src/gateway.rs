//! Transport to the GitHub GraphQL API.
//!
//! The crate never speaks HTTP itself: every request is handed to the `gh`
//! command-line client, which owns authentication and transport. The
//! [`Gateway`] trait is the seam that tests replace with a scripted fake.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::CoreError;
use crate::queries::Document;

/// A GraphQL document together with its bound variables.
#[derive(Debug, Clone)]
pub struct GraphQlRequest {
    pub document: Document,
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            variables: Map::new(),
        }
    }

    pub fn var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    pub fn operation(&self) -> &'static str {
        self.document.operation
    }

    pub fn str_var(&self, name: &str) -> Option<&str> {
        self.variables.get(name).and_then(Value::as_str)
    }
}

/// Raw result of one gateway invocation.
#[derive(Debug, Clone, Default)]
pub struct GatewayOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GatewayOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn invoke(&self, request: &GraphQlRequest) -> Result<GatewayOutput, CoreError>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Sends a request and unwraps the `{data, errors}` envelope.
///
/// `gh` exits non-zero when the response carries GraphQL errors, so the
/// envelope is inspected before the exit status: a classified GraphQL error
/// is more useful than a generic transport failure.
pub async fn execute<G: Gateway + ?Sized>(
    gateway: &G,
    request: &GraphQlRequest,
) -> Result<Value, CoreError> {
    tracing::debug!(operation = request.operation(), "gateway request");
    let output = gateway.invoke(request).await?;
    decode_envelope(&output)
}

pub fn decode_envelope(output: &GatewayOutput) -> Result<Value, CoreError> {
    let parsed = serde_json::from_str::<Envelope>(output.stdout.trim());

    if let Ok(envelope) = &parsed {
        if let Some(first) = envelope.errors.first() {
            let message = first.message.as_deref().unwrap_or("Unknown error");
            return Err(CoreError::from_graphql_error(first.kind.as_deref(), message));
        }
    }

    if !output.success {
        let stderr = output.stderr.trim();
        return Err(CoreError::Transport(if stderr.is_empty() {
            "command exited with a non-zero status".to_string()
        } else {
            stderr.to_string()
        }));
    }

    let envelope = parsed?;
    Ok(envelope.data.unwrap_or(Value::Null))
}

/// Production gateway: `gh api graphql -f query=...`.
#[derive(Debug, Clone)]
pub struct GhCliGateway {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for GhCliGateway {
    fn default() -> Self {
        Self::new("gh")
    }
}

impl GhCliGateway {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Command-line arguments for a request. String variables are passed raw
    /// with `-f`; numbers and booleans are typed with `-F`.
    pub fn args(request: &GraphQlRequest) -> Vec<String> {
        let mut args = vec![
            "api".to_string(),
            "graphql".to_string(),
            "-f".to_string(),
            format!("query={}", request.document.text),
        ];
        for (name, value) in &request.variables {
            match value {
                Value::Null => continue,
                Value::String(s) => {
                    args.push("-f".to_string());
                    args.push(format!("{}={}", name, s));
                }
                other => {
                    args.push("-F".to_string());
                    args.push(format!("{}={}", name, other));
                }
            }
        }
        args
    }
}

#[async_trait]
impl Gateway for GhCliGateway {
    async fn invoke(&self, request: &GraphQlRequest) -> Result<GatewayOutput, CoreError> {
        let mut command = Command::new(&self.program);
        command
            .args(Self::args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let pending = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                CoreError::Transport(format!(
                    "'{}' did not answer within {}s",
                    self.program.display(),
                    limit.as_secs()
                ))
            })?,
            None => pending.await,
        };

        let output = output.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::Transport(format!(
                    "'{}' not found; install the GitHub CLI or set gh_path",
                    self.program.display()
                ))
            } else {
                CoreError::Io(e)
            }
        })?;

        Ok(GatewayOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
