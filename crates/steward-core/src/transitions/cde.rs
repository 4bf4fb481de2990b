use super::{require_non_blank, update_by_id};
use crate::entities::{Cde, Identified, Owner};
use crate::enums::CdeStatus;
use crate::errors::CoreError;

/// Assign (or reassign) the accountable owner of a CDE.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown id and
/// [`CoreError::Validation`] if the owner name is blank.
pub fn assign_owner(cdes: &[Cde], id: &str, owner: Owner) -> Result<Vec<Cde>, CoreError> {
    require_non_blank(&owner.name, "owner name")?;
    update_by_id(cdes, id, |cde| {
        tracing::debug!(cde = id, owner = %owner.name, "assigning owner");
        Ok(Cde {
            owner: Some(owner),
            ..cde.clone()
        })
    })
}

/// Move a CDE to `status`. Setting the status it already has is a no-op.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown id and
/// [`CoreError::InvalidTransition`] if the state machine forbids the move.
pub fn set_cde_status(cdes: &[Cde], id: &str, status: CdeStatus) -> Result<Vec<Cde>, CoreError> {
    update_by_id(cdes, id, |cde| {
        if cde.status == status {
            return Ok(cde.clone());
        }
        if !cde.status.can_transition_to(status) {
            return Err(CoreError::invalid_transition(
                Cde::ENTITY_TYPE,
                id,
                cde.status,
                status,
            ));
        }
        Ok(Cde {
            status,
            ..cde.clone()
        })
    })
}

/// Approve every CDE still pending review.
#[must_use]
pub fn approve_all_pending(cdes: &[Cde]) -> Vec<Cde> {
    cdes.iter()
        .map(|cde| {
            if cde.status == CdeStatus::Pending {
                Cde {
                    status: CdeStatus::Approved,
                    ..cde.clone()
                }
            } else {
                cde.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn cde(id: &str, status: CdeStatus) -> Cde {
        Cde {
            id: id.to_string(),
            name: format!("CDE {id}"),
            status,
            owner: None,
            overall_score: 70,
            criticality: None,
            lineage_info: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn assign_owner_returns_new_collection() {
        let cdes = vec![cde("cde-1", CdeStatus::Approved), cde("cde-2", CdeStatus::Approved)];
        let next = assign_owner(&cdes, "cde-2", Owner::new("Dana Reyes")).unwrap();

        assert!(cdes[1].owner.is_none());
        assert_eq!(next[1].owner, Some(Owner::new("Dana Reyes")));
        assert_eq!(next[0], cdes[0]);
    }

    #[test]
    fn assign_owner_rejects_blank_name() {
        let cdes = vec![cde("cde-1", CdeStatus::Approved)];
        let err = assign_owner(&cdes, "cde-1", Owner::new("  ")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = set_cde_status(&[], "cde-9", CdeStatus::Approved).unwrap_err();
        assert_eq!(
            err,
            CoreError::NotFound {
                entity_type: "cde".to_string(),
                id: "cde-9".to_string(),
            }
        );
    }

    #[test]
    fn set_status_twice_equals_once() {
        let cdes = vec![cde("cde-1", CdeStatus::Pending)];
        let once = set_cde_status(&cdes, "cde-1", CdeStatus::Approved).unwrap();
        let twice = set_cde_status(&once, "cde-1", CdeStatus::Approved).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejected_cannot_jump_to_approved() {
        let cdes = vec![cde("cde-1", CdeStatus::Rejected)];
        let err = set_cde_status(&cdes, "cde-1", CdeStatus::Approved).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn approve_all_pending_leaves_rejected_alone() {
        let cdes = vec![
            cde("cde-1", CdeStatus::Pending),
            cde("cde-2", CdeStatus::Rejected),
        ];
        let next = approve_all_pending(&cdes);
        assert_eq!(next[0].status, CdeStatus::Approved);
        assert_eq!(next[1].status, CdeStatus::Rejected);
    }
}
