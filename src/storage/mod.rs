//! Persistence collaborators. The engine never touches storage directly; the
//! [`FinanceTracker`](crate::core::FinanceTracker) receives a backend at construction.

pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FinanceError, Result};
use crate::ledger::{Budget, FixedExpense, Transaction};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Request/response contract every backend fulfils. Failures surface as
/// [`FinanceError::StorageUnavailable`] and are never retried here.
pub trait StorageBackend: Send + Sync {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
    fn insert_transactions(&self, transactions: &[Transaction]) -> Result<()>;
    /// Writes a batch in one step; an unknown id leaves the store untouched.
    fn update_transactions(&self, transactions: &[Transaction]) -> Result<()>;
    fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.update_transactions(std::slice::from_ref(transaction))
    }
    fn delete_transaction(&self, id: Uuid) -> Result<()>;

    fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>>;
    fn insert_fixed_expense(&self, expense: &FixedExpense) -> Result<()>;
    fn delete_fixed_expense(&self, id: Uuid) -> Result<()>;

    fn list_budgets(&self) -> Result<Vec<Budget>>;
    /// Inserts or replaces by id; a budget for an already-budgeted category
    /// replaces that category's entry.
    fn upsert_budget(&self, budget: &Budget) -> Result<()>;
}

/// Everything a backend persists, as one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreDocument {
    #[serde(default = "StoreDocument::default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            fixed_expenses: Vec::new(),
            budgets: Vec::new(),
        }
    }
}

impl StoreDocument {
    fn default_schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn insert_transactions(&mut self, transactions: &[Transaction]) {
        self.transactions.extend_from_slice(transactions);
    }

    /// Replaces every given transaction, or none of them when any id is unknown.
    pub fn update_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        let mut slots = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let index = self
                .transactions
                .iter()
                .position(|existing| existing.id == transaction.id)
                .ok_or(FinanceError::NotFound(transaction.id))?;
            slots.push(index);
        }
        for (index, transaction) in slots.into_iter().zip(transactions) {
            self.transactions[index] = transaction.clone();
        }
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        if self.transactions.len() == before {
            return Err(FinanceError::NotFound(id));
        }
        Ok(())
    }

    pub fn insert_fixed_expense(&mut self, expense: &FixedExpense) {
        self.fixed_expenses.push(expense.clone());
    }

    pub fn delete_fixed_expense(&mut self, id: Uuid) -> Result<()> {
        let before = self.fixed_expenses.len();
        self.fixed_expenses.retain(|expense| expense.id != id);
        if self.fixed_expenses.len() == before {
            return Err(FinanceError::NotFound(id));
        }
        Ok(())
    }

    pub fn upsert_budget(&mut self, budget: &Budget) {
        let slot = self
            .budgets
            .iter()
            .position(|existing| existing.id == budget.id)
            .or_else(|| {
                self.budgets
                    .iter()
                    .position(|existing| existing.category == budget.category)
            });
        match slot {
            Some(index) => self.budgets[index] = budget.clone(),
            None => self.budgets.push(budget.clone()),
        }
        self.budgets
            .retain(|existing| existing.id == budget.id || existing.category != budget.category);
    }
}
