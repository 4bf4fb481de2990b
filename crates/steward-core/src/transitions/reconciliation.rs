use super::update_by_id;
use crate::entities::ReconciliationMatch;
use crate::enums::ReconciliationAction;
use crate::errors::CoreError;

/// Record the action the steward took on the match for `current_id`.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if no match exists for `current_id`.
pub fn record_action(
    matches: &[ReconciliationMatch],
    current_id: &str,
    action: ReconciliationAction,
) -> Result<Vec<ReconciliationMatch>, CoreError> {
    update_by_id(matches, current_id, |m| {
        Ok(ReconciliationMatch {
            action_taken: Some(action),
            ..m.clone()
        })
    })
}

/// Take the suggested action on every pending match that has one.
///
/// Matches without a suggestion stay pending; already-decided matches keep
/// their decision.
#[must_use]
pub fn accept_suggested_actions(matches: &[ReconciliationMatch]) -> Vec<ReconciliationMatch> {
    matches
        .iter()
        .map(|m| ReconciliationMatch {
            action_taken: m.action_taken.or(m.suggested_action),
            ..m.clone()
        })
        .collect()
}
