use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

pub const CONFIRMATION_PAGE: &str = "<html><body><h1>Authentication received.</h1>\
<p>You can close this window/tab and return to spotdash.</p></body></html>";

/// Raw query parameters of the redirect. Everything is optional so a
/// malformed redirect still gets the confirmation page.
#[derive(Debug, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl From<HashMap<String, String>> for CallbackParams {
    /// Picks the known keys out of a decoded query; a repeated key keeps its
    /// last value.
    fn from(mut query: HashMap<String, String>) -> Self {
        Self {
            code: query.remove("code"),
            state: query.remove("state"),
            error: query.remove("error"),
            error_description: query.remove("error_description"),
        }
    }
}

/// Outcome of the redirect, produced once per login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackResult {
    Authorized {
        code: String,
        state: Option<String>,
    },
    Denied {
        error: String,
        description: Option<String>,
        state: Option<String>,
    },
}

impl From<CallbackParams> for CallbackResult {
    fn from(params: CallbackParams) -> Self {
        match (params.error, params.code) {
            (Some(error), _) => CallbackResult::Denied {
                error,
                description: params.error_description,
                state: params.state,
            },
            (None, Some(code)) if !code.is_empty() => CallbackResult::Authorized {
                code,
                state: params.state,
            },
            _ => CallbackResult::Denied {
                error: "invalid_request".to_string(),
                description: Some("missing code parameter".to_string()),
                state: params.state,
            },
        }
    }
}

/// One-shot handoff between the request handler and the waiting attempt.
///
/// The sender is taken out of the mutex by the first request, so the result
/// is published and signalled in one step and later requests find `None`.
#[derive(Debug)]
pub struct CallbackSlot {
    sender: Mutex<Option<oneshot::Sender<CallbackResult>>>,
    hits: AtomicUsize,
}

impl CallbackSlot {
    pub fn channel() -> (Arc<Self>, oneshot::Receiver<CallbackResult>) {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Self {
            sender: Mutex::new(Some(tx)),
            hits: AtomicUsize::new(0),
        });
        (slot, rx)
    }

    /// Delivers `result` if nothing was delivered yet. Returns whether this
    /// call was the one that delivered.
    pub async fn deliver(&self, result: CallbackResult) -> bool {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.sender.lock().await.take() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    /// Drops the sender so no later request can deliver. Returns whether a
    /// sender was still pending.
    pub async fn close(&self) -> bool {
        self.sender.lock().await.take().is_some()
    }

    /// Number of requests that reached the callback route.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Handles the browser redirect. Every request gets the confirmation page;
/// only the first one is delivered to the waiting attempt.
pub async fn callback(
    Query(query): Query<HashMap<String, String>>,
    Extension(slot): Extension<Arc<CallbackSlot>>,
) -> Html<&'static str> {
    let result = CallbackResult::from(CallbackParams::from(query));
    if slot.deliver(result).await {
        tracing::debug!("authorization callback delivered");
    } else {
        tracing::debug!(hits = slot.hits(), "repeated callback request ignored");
    }

    Html(CONFIRMATION_PAGE)
}
