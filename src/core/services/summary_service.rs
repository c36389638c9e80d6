use std::collections::HashMap;

use crate::ledger::{Category, Transaction, TransactionKind, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_cents: i64,
}

/// Income, expense and balance for one month, plus expenses broken down by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub income_cents: i64,
    pub expense_cents: i64,
    pub balance_cents: i64,
    /// Largest category first.
    pub expenses_by_category: Vec<CategoryTotal>,
    pub transaction_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn monthly(transactions: &[Transaction], month: YearMonth) -> MonthlySummary {
        let mut income_cents = 0;
        let mut expense_cents = 0;
        let mut transaction_count = 0;
        let mut per_category: HashMap<Category, i64> = HashMap::new();

        for txn in transactions.iter().filter(|txn| month.contains(txn.date)) {
            transaction_count += 1;
            match txn.kind {
                TransactionKind::Income => income_cents += txn.amount_cents,
                TransactionKind::Expense => {
                    expense_cents += txn.amount_cents;
                    *per_category.entry(txn.category).or_insert(0) += txn.amount_cents;
                }
            }
        }

        let mut expenses_by_category: Vec<CategoryTotal> = per_category
            .into_iter()
            .map(|(category, total_cents)| CategoryTotal {
                category,
                total_cents,
            })
            .collect();
        expenses_by_category.sort_by(|a, b| {
            b.total_cents
                .cmp(&a.total_cents)
                .then_with(|| a.category.cmp(&b.category))
        });

        MonthlySummary {
            month,
            income_cents,
            expense_cents,
            balance_cents: income_cents - expense_cents,
            expenses_by_category,
            transaction_count,
        }
    }
}
