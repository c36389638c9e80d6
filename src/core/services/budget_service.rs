//! Compares budgets against the expenses recorded in a month.

use std::collections::HashMap;

use crate::ledger::{Budget, Category, Transaction, TransactionKind, YearMonth};

/// Spend-against-budget for one category in one month. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent_cents: i64,
    /// Negative once the limit is exceeded.
    pub remaining_cents: i64,
    pub percent_used: f64,
    pub over_limit: bool,
}

pub struct BudgetService;

impl BudgetService {
    /// Sums expense amounts per category within `month`.
    pub fn spending_by_category(
        transactions: &[Transaction],
        month: YearMonth,
    ) -> HashMap<Category, i64> {
        let mut spending = HashMap::new();
        for txn in transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Expense && month.contains(txn.date))
        {
            *spending.entry(txn.category).or_insert(0) += txn.amount_cents;
        }
        spending
    }

    /// One status per budget, in the order the budgets were given.
    pub fn statuses(
        budgets: &[Budget],
        transactions: &[Transaction],
        month: YearMonth,
    ) -> Vec<BudgetStatus> {
        let spending = Self::spending_by_category(transactions, month);
        budgets
            .iter()
            .map(|budget| {
                let spent_cents = spending.get(&budget.category).copied().unwrap_or(0);
                let percent_used = if budget.limit_cents > 0 {
                    spent_cents as f64 / budget.limit_cents as f64 * 100.0
                } else {
                    0.0
                };
                BudgetStatus {
                    budget: budget.clone(),
                    spent_cents,
                    remaining_cents: budget.limit_cents - spent_cents,
                    percent_used,
                    over_limit: spent_cents > budget.limit_cents,
                }
            })
            .collect()
    }
}
