use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tower_lsp::lsp_types::Url;
use tracing::debug;

/// One classified span reported by the language server, byte-addressed into
/// the document text it was requested for. Ranges are not required to align
/// with lexical tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticToken {
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub start: u32,
    pub length: u32,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("language server transport failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed language server response: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("semantic token request timed out after {0:?}")]
    Timeout(Duration),
    #[error("language server closed its token stream")]
    Closed,
}

/// Where semantic tokens come from. The bridge only ever sees this trait;
/// both `Ok(None)` and `Err(_)` leave the document in lexer fallback mode,
/// so a broken or absent server degrades highlighting instead of breaking it.
#[tower_lsp::async_trait]
pub trait SemanticTokenSource: Send + Sync {
    async fn semantic_tokens(
        &self,
        uri: &Url,
        text: &str,
        version: u64,
    ) -> Result<Option<Vec<SemanticToken>>, SessionError>;
}

/// The "no server" session: semantic tokens are never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSession;

#[tower_lsp::async_trait]
impl SemanticTokenSource for NullSession {
    async fn semantic_tokens(
        &self,
        _uri: &Url,
        _text: &str,
        _version: u64,
    ) -> Result<Option<Vec<SemanticToken>>, SessionError> {
        Ok(None)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: RequestParams<'a>,
}

#[derive(Serialize)]
struct RequestParams<'a> {
    uri: &'a str,
    text: &'a str,
    version: u64,
}

#[derive(Deserialize)]
struct Response {
    id: Option<u64>,
    #[serde(default)]
    result: Option<ResponsePayload>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ResponsePayload {
    #[serde(default)]
    tokens: Vec<SemanticToken>,
}

struct StdioInner {
    // Held so the child is killed when the session is dropped.
    _child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

/// A live language-server session: a child process spoken to with
/// line-delimited JSON-RPC over its stdin/stdout. One outstanding request at
/// a time; late answers to superseded requests are skipped by id.
pub struct StdioSession {
    timeout: Duration,
    inner: tokio::sync::Mutex<StdioInner>,
}

impl StdioSession {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn spawn<I, S>(program: &str, args: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let stdin = child.stdin.take().ok_or(SessionError::Closed)?;
        let stdout = child.stdout.take().ok_or(SessionError::Closed)?;
        Ok(StdioSession {
            timeout: Self::DEFAULT_TIMEOUT,
            inner: tokio::sync::Mutex::new(StdioInner {
                _child: child,
                stdin,
                lines: BufReader::new(stdout).lines(),
                next_id: 0,
            }),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[tower_lsp::async_trait]
impl SemanticTokenSource for StdioSession {
    async fn semantic_tokens(
        &self,
        uri: &Url,
        text: &str,
        version: u64,
    ) -> Result<Option<Vec<SemanticToken>>, SessionError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let mut line = serde_json::to_string(&Request {
            jsonrpc: "2.0",
            id,
            method: "textDocument/semanticTokens/full",
            params: RequestParams {
                uri: uri.as_str(),
                text,
                version,
            },
        })?;
        line.push('\n');
        let timeout = self.timeout;
        let exchange = async {
            inner.stdin.write_all(line.as_bytes()).await?;
            inner.stdin.flush().await?;
            loop {
                let Some(raw) = inner.lines.next_line().await? else {
                    return Err(SessionError::Closed);
                };
                if raw.trim().is_empty() {
                    continue;
                }
                let response: Response = serde_json::from_str(&raw)?;
                if response.id != Some(id) {
                    // Late answer to a request that already timed out.
                    debug!(got = ?response.id, expected = id, "skipping out-of-order response");
                    continue;
                }
                if let Some(error) = response.error {
                    debug!(%error, "server reported an error; treating tokens as unavailable");
                    return Ok(None);
                }
                return Ok(response.result.map(|payload| payload.tokens));
            }
        };
        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| SessionError::Timeout(timeout))?
    }
}
