use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::{StorageBackend, StoreDocument};
use crate::errors::{FinanceError, Result};
use crate::ledger::{Budget, FixedExpense, Transaction};

/// Process-lifetime storage for local, single-user sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<StoreDocument>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    pub fn snapshot(&self) -> Result<StoreDocument> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreDocument>> {
        self.document
            .read()
            .map_err(|_| FinanceError::StorageUnavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreDocument>> {
        self.document
            .write()
            .map_err(|_| FinanceError::StorageUnavailable("memory store lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    fn insert_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write()?.insert_transactions(transactions);
        Ok(())
    }

    fn update_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write()?.update_transactions(transactions)
    }

    fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.write()?.delete_transaction(id)
    }

    fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        Ok(self.read()?.fixed_expenses.clone())
    }

    fn insert_fixed_expense(&self, expense: &FixedExpense) -> Result<()> {
        self.write()?.insert_fixed_expense(expense);
        Ok(())
    }

    fn delete_fixed_expense(&self, id: Uuid) -> Result<()> {
        self.write()?.delete_fixed_expense(id)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.read()?.budgets.clone())
    }

    fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        self.write()?.upsert_budget(budget);
        Ok(())
    }
}
