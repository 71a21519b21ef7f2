use crate::output::UndoResult;
use crate::{Session, SessionError};

/// Undo operation - reverses the most recent batch of `session`
pub fn undo_operation(session: &mut Session) -> UndoResult {
    match session.try_undo() {
        Ok(results) => UndoResult::from_results(&results),
        Err(SessionError::EmptyHistory | SessionError::NoDirectory) => {
            UndoResult::nothing_to_undo()
        },
    }
}
