pub mod gemini;
pub mod prompts;

use crate::error::CompletionError;
use crate::event::AppEvent;
use crate::workbench::conversation::{ChatRequest, ConversationEntry};
use crate::workbench::document::AnalysisRequest;
use async_trait::async_trait;
use std::future::Future;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

/// A hosted text-generation service. Calls are stateless: everything the
/// model needs is passed in each time.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str, context: Option<&str>) -> Result<String, CompletionError>;

    async fn converse(
        &self,
        history: &[ConversationEntry],
        context_label: Option<&str>,
        message: &str,
    ) -> Result<String, CompletionError>;
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs completion calls on the tokio runtime and reports each outcome to the
/// UI thread as an [`AppEvent`].
#[derive(Clone)]
pub struct AssistantClient {
    backend: Arc<dyn TextCompletion>,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
    timeout: Duration,
    waker: Option<Waker>,
}

impl AssistantClient {
    pub fn new(
        runtime_handle: Handle,
        backend: Arc<dyn TextCompletion>,
        tx: mpsc::Sender<AppEvent>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            tx,
            runtime_handle,
            timeout,
            waker: None,
        }
    }

    /// Called after every delivered event, typically to request a repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn analyze(&self, request: AnalysisRequest) -> JoinHandle<()> {
        let AnalysisRequest {
            ticket,
            file_name,
            content,
        } = request;
        let backend = Arc::clone(&self.backend);
        let limit = self.timeout;
        self.dispatch(
            async move {
                let prompt = prompts::analysis_prompt(&file_name, &content);
                bounded(
                    limit,
                    backend.complete(&prompt, Some(prompts::ANALYSIS_INSTRUCTION)),
                )
                .await
            },
            move |outcome| AppEvent::AnalysisFinished { ticket, outcome },
        )
    }

    pub fn send(&self, request: ChatRequest) -> JoinHandle<()> {
        let ChatRequest {
            exchange,
            history,
            context_label,
            message,
        } = request;
        let backend = Arc::clone(&self.backend);
        let limit = self.timeout;
        self.dispatch(
            async move {
                bounded(
                    limit,
                    backend.converse(&history, context_label.as_deref(), &message),
                )
                .await
            },
            move |outcome| AppEvent::ChatReplied { exchange, outcome },
        )
    }

    /// Runs `call` in its own task so that a panicking backend still produces
    /// an event for the request.
    fn dispatch<F, E>(&self, call: F, into_event: E) -> JoinHandle<()>
    where
        F: Future<Output = Result<String, CompletionError>> + Send + 'static,
        E: FnOnce(Result<String, CompletionError>) -> AppEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        let call = self.runtime_handle.spawn(call);
        self.runtime_handle.spawn(async move {
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(error = %err, "assistant task failed");
                    Err(CompletionError::TaskFailed(err.to_string()))
                }
            };
            if tx.send(into_event(outcome)).is_err() {
                debug!("event channel closed, dropping assistant result");
                return;
            }
            if let Some(waker) = waker {
                waker();
            }
        })
    }
}

async fn bounded<F>(limit: Duration, call: F) -> Result<String, CompletionError>
where
    F: Future<Output = Result<String, CompletionError>>,
{
    match time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(?limit, "assistant call timed out");
            Err(CompletionError::Timeout(limit))
        }
    }
}
