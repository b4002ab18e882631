use crate::error::CompletionError;
use crate::workbench::conversation::ExchangeId;
use crate::workbench::document::AnalysisTicket;

/// Results sent from assistant tasks back to the UI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    AnalysisFinished {
        ticket: AnalysisTicket,
        outcome: Result<String, CompletionError>,
    },
    ChatReplied {
        exchange: ExchangeId,
        outcome: Result<String, CompletionError>,
    },
}
