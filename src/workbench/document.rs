use crate::error::{CompletionError, InvalidState};
use crate::project::Node;
use crate::workbench::explorer::SelectionChanged;
use std::sync::Arc;
use tracing::{debug, warn};

pub const ANALYSIS_ERROR_MESSAGE: &str =
    "Error analyzing file. Please check your API configuration.";
pub const ANALYSIS_EMPTY_MESSAGE: &str = "No response from AI.";

/// Identifies one analysis request and the file it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub id: u64,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ticket: AnalysisTicket,
    pub file_name: String,
    pub content: String,
}

/// What the editor pane shows: the open file and its latest analysis.
#[derive(Debug, Default)]
pub struct ActiveDocument {
    active: Option<Arc<Node>>,
    analysis: String,
    pending: Option<AnalysisTicket>,
    next_ticket: u64,
}

impl ActiveDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_selection_changed(&mut self, event: SelectionChanged) {
        if let Some(ticket) = self.pending.take() {
            debug!(path = %ticket.path, ticket = ticket.id, "abandoning pending analysis");
        }
        self.active = Some(event.node);
        self.analysis.clear();
    }

    pub fn active_file(&self) -> Option<&Arc<Node>> {
        self.active.as_ref()
    }

    pub fn last_analysis(&self) -> &str {
        &self.analysis
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn line_count(&self) -> usize {
        self.active.as_ref().map_or(0, |node| node.line_count())
    }

    pub fn can_request_analysis(&self) -> bool {
        self.check_analysis_allowed().is_ok()
    }

    fn check_analysis_allowed(&self) -> Result<&Arc<Node>, InvalidState> {
        let node = self.active.as_ref().ok_or(InvalidState::NoActiveFile)?;
        if node.content().map_or(true, str::is_empty) {
            return Err(InvalidState::EmptyContent);
        }
        if self.pending.is_some() {
            return Err(InvalidState::AnalysisInFlight);
        }
        Ok(node)
    }

    pub fn request_analysis(&mut self) -> Result<AnalysisRequest, InvalidState> {
        let node = Arc::clone(self.check_analysis_allowed()?);

        self.next_ticket += 1;
        let ticket = AnalysisTicket {
            id: self.next_ticket,
            path: node.path().to_string(),
        };
        self.pending = Some(ticket.clone());

        Ok(AnalysisRequest {
            ticket,
            file_name: node.name().to_string(),
            content: node.content().unwrap_or_default().to_string(),
        })
    }

    /// Applies an analysis outcome. Returns `false` when the outcome belongs to
    /// a request that is no longer current and was dropped.
    pub fn finish_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<String, CompletionError>,
    ) -> bool {
        let current_path = self.active.as_ref().map(|node| node.path());
        if self.pending.as_ref() != Some(ticket) || current_path != Some(ticket.path.as_str()) {
            debug!(path = %ticket.path, ticket = ticket.id, "dropping stale analysis result");
            return false;
        }

        self.pending = None;
        self.analysis = match outcome {
            Ok(text) if text.trim().is_empty() => ANALYSIS_EMPTY_MESSAGE.to_string(),
            Err(CompletionError::EmptyResponse) => ANALYSIS_EMPTY_MESSAGE.to_string(),
            Ok(text) => text,
            Err(err) => {
                warn!(path = %ticket.path, error = %err, "analysis failed");
                ANALYSIS_ERROR_MESSAGE.to_string()
            }
        };
        true
    }

    pub fn dismiss_analysis(&mut self) {
        self.analysis.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Entry, Forest};

    fn forest() -> Forest {
        Forest::from_entries(vec![Entry::folder(
            "root",
            "app",
            vec![
                Entry::folder(
                    "data",
                    "data",
                    vec![Entry::file("cliente", "Cliente.kt", "line1\nline2")],
                ),
                Entry::file("dao", "ClienteDao.kt", "interface ClienteDao"),
                Entry::file("blank", "Empty.kt", ""),
            ],
        )])
        .expect("forest should build")
    }

    fn select(document: &mut ActiveDocument, forest: &Forest, path: &str) {
        let node = Arc::clone(forest.find(path).expect("path should exist"));
        document.on_selection_changed(SelectionChanged { node });
    }

    #[test]
    fn selection_reports_line_count() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        assert_eq!(document.line_count(), 0);

        select(&mut document, &forest, "app/data/Cliente.kt");
        assert_eq!(document.line_count(), 2);
        assert_eq!(
            document.active_file().map(|node| node.path()),
            Some("app/data/Cliente.kt")
        );
    }

    #[test]
    fn analysis_result_is_shown_for_the_open_file() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/data/Cliente.kt");

        let request = document.request_analysis().expect("analysis should start");
        assert_eq!(request.file_name, "Cliente.kt");
        assert_eq!(request.content, "line1\nline2");
        assert!(document.is_analyzing());

        assert!(document.finish_analysis(&request.ticket, Ok("Looks fine.".to_string())));
        assert_eq!(document.last_analysis(), "Looks fine.");
        assert!(!document.is_analyzing());
    }

    #[test]
    fn switching_files_discards_late_results() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/data/Cliente.kt");
        let first = document.request_analysis().expect("analysis should start");
        document.finish_analysis(&first.ticket, Ok("Looks fine.".to_string()));

        let second = document.request_analysis().expect("second analysis should start");
        select(&mut document, &forest, "app/ClienteDao.kt");
        assert_eq!(document.last_analysis(), "");
        assert!(!document.is_analyzing());

        assert!(!document.finish_analysis(&second.ticket, Ok("Late.".to_string())));
        assert_eq!(document.last_analysis(), "");
    }

    #[test]
    fn reselecting_the_same_file_discards_its_pending_result() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/data/Cliente.kt");
        let request = document.request_analysis().expect("analysis should start");

        select(&mut document, &forest, "app/data/Cliente.kt");
        assert!(!document.finish_analysis(&request.ticket, Ok("Old.".to_string())));
        assert_eq!(document.last_analysis(), "");
    }

    #[test]
    fn failures_become_a_fixed_message() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/ClienteDao.kt");
        let request = document.request_analysis().expect("analysis should start");

        assert!(document.finish_analysis(&request.ticket, Err(CompletionError::MissingApiKey)));
        assert_eq!(document.last_analysis(), ANALYSIS_ERROR_MESSAGE);
    }

    #[test]
    fn blank_replies_become_a_fixed_message() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/ClienteDao.kt");
        let request = document.request_analysis().expect("analysis should start");

        document.finish_analysis(&request.ticket, Ok("  \n".to_string()));
        assert_eq!(document.last_analysis(), ANALYSIS_EMPTY_MESSAGE);
    }

    #[test]
    fn analysis_guards() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        assert_eq!(
            document.request_analysis().err(),
            Some(InvalidState::NoActiveFile)
        );

        select(&mut document, &forest, "app/Empty.kt");
        assert_eq!(
            document.request_analysis().err(),
            Some(InvalidState::EmptyContent)
        );

        select(&mut document, &forest, "app/ClienteDao.kt");
        document.request_analysis().expect("analysis should start");
        assert!(!document.can_request_analysis());
        assert_eq!(
            document.request_analysis().err(),
            Some(InvalidState::AnalysisInFlight)
        );
    }

    #[test]
    fn dismiss_clears_analysis_but_keeps_the_file() {
        let forest = forest();
        let mut document = ActiveDocument::new();
        select(&mut document, &forest, "app/ClienteDao.kt");
        let request = document.request_analysis().expect("analysis should start");
        document.finish_analysis(&request.ticket, Ok("Use Flow.".to_string()));

        document.dismiss_analysis();
        assert_eq!(document.last_analysis(), "");
        assert!(document.active_file().is_some());
    }
}
