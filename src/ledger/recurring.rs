use std::collections::HashSet;

use uuid::Uuid;

use super::{
    calendar::YearMonth,
    fixed_expense::FixedExpense,
    transaction::{Transaction, TransactionKind},
};
use crate::core::ids::IdGenerator;
use crate::errors::Result;

/// Identifiers of fixed expenses that already produced a transaction in `target`.
pub fn generated_in(target: YearMonth, existing: &[Transaction]) -> HashSet<Uuid> {
    existing
        .iter()
        .filter(|txn| target.contains(txn.date))
        .filter_map(|txn| txn.fixed_expense_id)
        .collect()
}

/// Builds the transactions for every definition not yet generated in `target`.
///
/// Each new expense is dated on the definition's day of month, clamped to the
/// month's length, and points back to the definition. Running it again with the
/// returned transactions included in `existing` yields nothing.
pub fn generate(
    definitions: &[FixedExpense],
    target: YearMonth,
    existing: &[Transaction],
    ids: &dyn IdGenerator,
) -> Result<Vec<Transaction>> {
    let mut covered = generated_in(target, existing);
    let mut creations = Vec::new();

    for definition in definitions {
        if !covered.insert(definition.id) {
            continue;
        }
        creations.push(Transaction {
            id: ids.next_id(),
            kind: TransactionKind::Expense,
            category: definition.category,
            amount_cents: definition.amount_cents,
            description: definition.description.clone(),
            date: target.clamped_day(definition.day_of_month)?,
            fixed_expense_id: Some(definition.id),
            installment_info: None,
        });
    }

    Ok(creations)
}
