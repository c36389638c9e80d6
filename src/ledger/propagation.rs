//! Applies an edit of one installment to every member of its group.

use tracing::{debug, warn};

use super::transaction::{strip_installment_suffix, Transaction};
use crate::errors::{FinanceError, Result};

/// Rewrites the shared fields of every group member from `edited`.
///
/// Category, kind and amount are copied to all members as-is: changing one
/// installment's amount changes the stated amount of every installment rather
/// than redistributing a new total. Descriptions keep each member's own
/// `(current/total)` marker on the edited base description. Only the member
/// whose id matches `edited.id` takes the edited date.
///
/// Fails with [`FinanceError::GroupConsistency`] and changes nothing when the
/// edited transaction is not in `group_members` or the members do not all belong
/// to its group.
pub fn propagate(edited: &Transaction, group_members: &[Transaction]) -> Result<Vec<Transaction>> {
    let anchor = group_members
        .iter()
        .find(|member| member.id == edited.id)
        .ok_or_else(|| {
            warn!(id = %edited.id, "edited transaction missing from its installment group");
            FinanceError::GroupConsistency(format!(
                "transaction {} is not part of the supplied group",
                edited.id
            ))
        })?;
    let group_id = anchor.group_id().ok_or_else(|| {
        FinanceError::GroupConsistency(format!(
            "transaction {} carries no installment info",
            edited.id
        ))
    })?;

    let base = strip_installment_suffix(&edited.description);
    let mut updated = Vec::with_capacity(group_members.len());
    for member in group_members {
        let info = member
            .installment_info
            .filter(|info| info.group_id == group_id)
            .ok_or_else(|| {
                FinanceError::GroupConsistency(format!(
                    "transaction {} does not belong to group {}",
                    member.id, group_id
                ))
            })?;
        let mut next = member.clone();
        next.category = edited.category;
        next.kind = edited.kind;
        next.amount_cents = edited.amount_cents;
        next.description = format!("{}{}", base, info.suffix());
        if member.id == edited.id {
            next.date = edited.date;
        }
        updated.push(next);
    }

    debug!(%group_id, members = updated.len(), "propagated installment edit");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;
    use crate::ledger::{
        installments::expand, Category, TransactionDraft, TransactionKind,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn group() -> Vec<Transaction> {
        let ids = SequentialIds::new();
        let draft = TransactionDraft::expense(Category::Clothing, 90_000, "Coat", date(2024, 1, 31));
        expand(&draft, 3, &ids).unwrap()
    }

    #[test]
    fn only_the_edited_member_moves_date() {
        let members = group();
        let mut edited = members[1].clone();
        edited.date = date(2024, 2, 15);

        let updated = propagate(&edited, &members).unwrap();
        assert_eq!(updated[0].date, members[0].date);
        assert_eq!(updated[1].date, date(2024, 2, 15));
        assert_eq!(updated[2].date, members[2].date);
        let ids: Vec<_> = updated.iter().map(|m| m.id).collect();
        let original_ids: Vec<_> = members.iter().map(|m| m.id).collect();
        assert_eq!(ids, original_ids);
    }

    // Editing one installment's amount overwrites the amount of every installment;
    // the new value is not spread across the remaining ones.
    #[test]
    fn amount_edit_applies_to_every_installment() {
        let members = group();
        let mut edited = members[0].clone();
        edited.amount_cents = 35_000;

        let updated = propagate(&edited, &members).unwrap();
        assert!(updated.iter().all(|m| m.amount_cents == 35_000));
        let total: i64 = updated.iter().map(|m| m.amount_cents).sum();
        assert_eq!(total, 105_000);
    }

    #[test]
    fn shared_fields_and_descriptions_follow_the_edit() {
        let members = group();
        let mut edited = members[2].clone();
        edited.description = "Winter coat (3/3)".into();
        edited.category = Category::Other;
        edited.kind = TransactionKind::Expense;

        let updated = propagate(&edited, &members).unwrap();
        let descriptions: Vec<_> = updated.iter().map(|m| m.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Winter coat (1/3)", "Winter coat (2/3)", "Winter coat (3/3)"]
        );
        assert!(updated.iter().all(|m| m.category == Category::Other));
        assert!(updated
            .iter()
            .all(|m| m.installment_info.unwrap().total == 3));
    }

    #[test]
    fn missing_membership_is_a_consistency_error() {
        let members = group();
        let mut stranger = members[0].clone();
        stranger.id = uuid::Uuid::from_u128(999);

        let err = propagate(&stranger, &members).unwrap_err();
        assert!(matches!(err, FinanceError::GroupConsistency(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn foreign_members_abort_the_whole_edit() {
        let mut members = group();
        let mut intruder = members[2].clone();
        intruder.id = uuid::Uuid::from_u128(500);
        if let Some(info) = intruder.installment_info.as_mut() {
            info.group_id = uuid::Uuid::from_u128(501);
        }
        members.push(intruder);

        let err = propagate(&members[0].clone(), &members).unwrap_err();
        assert!(matches!(err, FinanceError::GroupConsistency(_)));
    }
}
