pub mod conversation;
pub mod document;
pub mod explorer;

use crate::error::{CompletionError, InvalidState, TreeError};
use crate::event::AppEvent;
use crate::project::{Forest, Node};
use conversation::{ChatRequest, ConversationLog, ExchangeId};
use document::{ActiveDocument, AnalysisRequest, AnalysisTicket};
use explorer::{Explorer, TreeRow};
use std::sync::Arc;
use tracing::debug;

/// All view state of the application. The UI reads it to render and mutates
/// it only through these methods.
#[derive(Debug)]
pub struct Workbench {
    forest: Forest,
    explorer: Explorer,
    document: ActiveDocument,
    conversation: ConversationLog,
}

impl Workbench {
    pub fn new(forest: Forest) -> Self {
        Self {
            forest,
            explorer: Explorer::new(),
            document: ActiveDocument::new(),
            conversation: ConversationLog::new(),
        }
    }

    #[cfg(test)]
    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn document(&self) -> &ActiveDocument {
        &self.document
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub fn visible_rows(&self) -> Vec<TreeRow> {
        self.explorer.visible_rows(&self.forest)
    }

    pub fn activate(&mut self, node: &Arc<Node>) {
        if let Some(event) = self.explorer.activate(node) {
            self.document.on_selection_changed(event);
        }
    }

    pub fn activate_path(&mut self, path: &str) -> Result<(), TreeError> {
        let node = Arc::clone(self.forest.find(path)?);
        self.activate(&node);
        Ok(())
    }

    pub fn request_analysis(&mut self) -> Result<AnalysisRequest, InvalidState> {
        self.document.request_analysis().inspect_err(|reason| {
            debug!(%reason, "analysis request refused");
        })
    }

    pub fn finish_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<String, CompletionError>,
    ) -> bool {
        self.document.finish_analysis(ticket, outcome)
    }

    pub fn dismiss_analysis(&mut self) {
        self.document.dismiss_analysis();
    }

    pub fn send_message(&mut self, text: &str) -> Result<ChatRequest, InvalidState> {
        let context_label = self
            .document
            .active_file()
            .map(|node| node.name().to_string());
        self.conversation
            .append_user(text, context_label)
            .inspect_err(|reason| {
                debug!(%reason, "chat message refused");
            })
    }

    pub fn finish_exchange(
        &mut self,
        exchange: ExchangeId,
        outcome: Result<String, CompletionError>,
    ) -> bool {
        self.conversation.finish_exchange(exchange, outcome)
    }

    /// Routes an assistant result to the component that asked for it.
    /// Returns `false` when the result was stale and dropped.
    pub fn apply(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::AnalysisFinished { ticket, outcome } => {
                self.finish_analysis(&ticket, outcome)
            }
            AppEvent::ChatReplied { exchange, outcome } => self.finish_exchange(exchange, outcome),
        }
    }
}
