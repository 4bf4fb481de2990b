//! Pure entity transitions.
//!
//! Every function takes the current collection by reference and returns a new
//! collection with the change applied. The input is never mutated, so a gate
//! evaluated against either collection always sees a consistent snapshot.

mod cde;
mod issue;
mod lineage;
mod reconciliation;

pub use cde::{approve_all_pending, assign_owner, set_cde_status};
pub use issue::{
    accept_suggested_priority, assign_issue, set_issue_status, set_priority, submit_resolution,
    verify_resolution,
};
pub use lineage::{defer_business_terms, link_business_terms};
pub use reconciliation::{accept_suggested_actions, record_action};

use crate::entities::Identified;
use crate::errors::CoreError;

/// Replace the entity with `id` by the result of `update`.
fn update_by_id<T, F>(items: &[T], id: &str, update: F) -> Result<Vec<T>, CoreError>
where
    T: Identified + Clone,
    F: FnOnce(&T) -> Result<T, CoreError>,
{
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| CoreError::not_found(T::ENTITY_TYPE, id))?;

    let updated = update(&items[index])?;
    let mut next = items.to_vec();
    next[index] = updated;
    Ok(next)
}

fn require_non_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}
