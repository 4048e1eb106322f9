use std::sync::Arc;

use angelscript_highlight::{HighlightSpan, classify, fallback_spans};
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use crate::session::{SemanticToken, SemanticTokenSource};

struct SemanticState {
    version: u64,
    spans: Vec<HighlightSpan>,
}

struct DocumentState {
    text: String,
    /// Monotonic; bumps on every update. Created on open, gone on close.
    version: u64,
    semantic: Option<SemanticState>,
}

struct PendingRequest {
    version: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct BridgeState {
    documents: FxHashMap<Url, DocumentState>,
    /// At most one in-flight request per document; a new edit or refresh
    /// aborts the previous one.
    pending: FxHashMap<Url, PendingRequest>,
}

/// Connects open documents to a [`SemanticTokenSource`] and answers
/// highlight queries, preferring current-version semantic spans and falling
/// back to lexer-derived spans otherwise. A response tagged with an older
/// document version is discarded, never applied on top of newer text.
pub struct HighlightBridge<S> {
    session: Arc<S>,
    state: Arc<Mutex<BridgeState>>,
}

impl<S> Clone for HighlightBridge<S> {
    fn clone(&self) -> Self {
        HighlightBridge {
            session: Arc::clone(&self.session),
            state: Arc::clone(&self.state),
        }
    }
}

fn classify_tokens(tokens: &[SemanticToken]) -> Vec<HighlightSpan> {
    tokens
        .iter()
        .filter_map(|token| {
            // Unrecognized types are skipped, leaving those spans to the
            // fallback layer; never an error.
            classify(&token.token_type, &token.modifiers).map(|category| HighlightSpan {
                category,
                start: token.start,
                length: token.length,
            })
        })
        .collect()
}

impl<S: SemanticTokenSource> HighlightBridge<S> {
    pub fn new(session: S) -> Self {
        HighlightBridge {
            session: Arc::new(session),
            state: Arc::new(Mutex::new(BridgeState::default())),
        }
    }

    pub async fn open_document(&self, uri: Url, text: String) {
        let mut state = self.state.lock().await;
        state.documents.insert(
            uri,
            DocumentState {
                text,
                version: 1,
                semantic: None,
            },
        );
    }

    /// Replaces the document text and bumps its version, implicitly
    /// superseding any outstanding request for the prior version.
    pub async fn update_document(&self, uri: &Url, text: String) {
        let mut state = self.state.lock().await;
        if let Some(previous) = state.pending.remove(uri) {
            previous.handle.abort();
        }
        match state.documents.get_mut(uri) {
            Some(doc) => {
                doc.text = text;
                doc.version += 1;
            }
            None => {
                state.documents.insert(
                    uri.clone(),
                    DocumentState {
                        text,
                        version: 1,
                        semantic: None,
                    },
                );
            }
        }
    }

    pub async fn close_document(&self, uri: &Url) {
        let mut state = self.state.lock().await;
        if let Some(previous) = state.pending.remove(uri) {
            previous.handle.abort();
        }
        state.documents.remove(uri);
    }

    pub async fn version(&self, uri: &Url) -> Option<u64> {
        let state = self.state.lock().await;
        state.documents.get(uri).map(|doc| doc.version)
    }

    /// Classifies and stores a semantic-token response, unless the document
    /// has moved on since the request was made. Returns whether it applied.
    pub async fn apply_response(
        &self,
        uri: &Url,
        version: u64,
        tokens: &[SemanticToken],
    ) -> bool {
        let mut state = self.state.lock().await;
        let Some(doc) = state.documents.get_mut(uri) else {
            return false;
        };
        if version != doc.version {
            debug!(
                %uri,
                response_version = version,
                current_version = doc.version,
                "discarding stale semantic token response"
            );
            return false;
        }
        doc.semantic = Some(SemanticState {
            version,
            spans: classify_tokens(tokens),
        });
        true
    }

    /// Current highlight spans for the document: semantic when a response
    /// for the current version is stored, lexer fallback otherwise. `None`
    /// only for documents that are not open.
    pub async fn highlight(&self, uri: &Url) -> Option<Vec<HighlightSpan>> {
        let state = self.state.lock().await;
        let doc = state.documents.get(uri)?;
        match &doc.semantic {
            Some(semantic) if semantic.version == doc.version => Some(semantic.spans.clone()),
            _ => Some(fallback_spans(&doc.text)),
        }
    }

    /// Requests tokens from the session for the document's current version
    /// and applies the response if still current. Returns whether semantic
    /// spans were applied; on `false` the document stays in fallback mode.
    pub async fn refresh(&self, uri: &Url) -> bool {
        let snapshot = {
            let state = self.state.lock().await;
            state
                .documents
                .get(uri)
                .map(|doc| (doc.text.clone(), doc.version))
        };
        let Some((text, version)) = snapshot else {
            return false;
        };
        match self.session.semantic_tokens(uri, &text, version).await {
            Ok(Some(tokens)) => self.apply_response(uri, version, &tokens).await,
            Ok(None) => {
                debug!(%uri, version, "semantic tokens unavailable; staying in fallback mode");
                false
            }
            Err(error) => {
                debug!(%uri, version, %error, "semantic token request failed; staying in fallback mode");
                false
            }
        }
    }
}

impl<S: SemanticTokenSource + 'static> HighlightBridge<S> {
    /// Fires a background refresh, aborting any request still in flight for
    /// this document. The version guard in [`Self::apply_response`] makes
    /// the abort a best-effort optimization: even a task that survives
    /// cancellation can never apply a superseded response.
    pub async fn spawn_refresh(&self, uri: Url) {
        let version = {
            let mut state = self.state.lock().await;
            let Some(version) = state.documents.get(&uri).map(|doc| doc.version) else {
                return;
            };
            if let Some(previous) = state.pending.remove(&uri) {
                previous.handle.abort();
            }
            version
        };
        let bridge = self.clone();
        let task_uri = uri.clone();
        let handle = tokio::spawn(async move {
            bridge.refresh(&task_uri).await;
            let mut state = bridge.state.lock().await;
            if state
                .pending
                .get(&task_uri)
                .is_some_and(|pending| pending.version == version)
            {
                state.pending.remove(&task_uri);
            }
        });
        let mut state = self.state.lock().await;
        match state.pending.get(&uri) {
            // A newer edit raced us and owns the slot; our request is moot.
            Some(pending) if pending.version >= version => handle.abort(),
            _ => {
                state.pending.insert(
                    uri,
                    PendingRequest {
                        version,
                        handle: handle.abort_handle(),
                    },
                );
            }
        }
    }
}
