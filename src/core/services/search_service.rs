use crate::ledger::{Transaction, YearMonth};

/// Which months a transaction listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month(YearMonth),
    All,
}

impl Period {
    pub fn includes(&self, txn: &Transaction) -> bool {
        match self {
            Period::Month(month) => month.contains(txn.date),
            Period::All => true,
        }
    }
}

pub struct SearchService;

impl SearchService {
    /// Transactions inside `period` whose description or category label contains
    /// `term` (case-insensitive), newest first. Same-day entries keep their stored order.
    pub fn filter(transactions: &[Transaction], period: Period, term: Option<&str>) -> Vec<Transaction> {
        let needle = term
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());
        let mut matches: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| period.includes(txn))
            .filter(|txn| match &needle {
                Some(needle) => {
                    txn.description.to_lowercase().contains(needle)
                        || txn.category.label().to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }
}
