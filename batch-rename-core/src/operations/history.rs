use crate::output::HistoryResult;
use crate::Session;

/// History operation - returns structured data, most recent first
pub fn history_operation(session: &Session, limit: Option<usize>) -> HistoryResult {
    HistoryResult::from_entries(&session.history().list_entries(limit))
}
