use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use tracing::debug;
use uuid::Uuid;

use super::{StorageBackend, StoreDocument, CURRENT_SCHEMA_VERSION};
use crate::errors::{FinanceError, Result};
use crate::ledger::{Budget, FixedExpense, Transaction};
use crate::utils::write_atomic;

/// Keeps the whole store in one JSON document, rewritten atomically on every change.
#[derive(Debug)]
pub struct JsonStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StoreDocument> {
        let _lock = self.lock()?;
        self.read_document()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| FinanceError::StorageUnavailable("json store lock poisoned".into()))
    }

    fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let document: StoreDocument = serde_json::from_str(&data)?;
        if document.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(FinanceError::StorageUnavailable(format!(
                "store schema v{} is newer than supported v{}",
                document.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(document)
    }

    fn modify<T>(&self, change: impl FnOnce(&mut StoreDocument) -> Result<T>) -> Result<T> {
        let _lock = self.lock()?;
        let mut document = self.read_document()?;
        let outcome = change(&mut document)?;
        document.schema_version = CURRENT_SCHEMA_VERSION;
        let json = serde_json::to_string_pretty(&document)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), "json store written");
        Ok(outcome)
    }
}

impl StorageBackend for JsonStorage {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.load()?.transactions)
    }

    fn insert_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.modify(|doc| {
            doc.insert_transactions(transactions);
            Ok(())
        })
    }

    fn update_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.modify(|doc| doc.update_transactions(transactions))
    }

    fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.modify(|doc| doc.delete_transaction(id))
    }

    fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        Ok(self.load()?.fixed_expenses)
    }

    fn insert_fixed_expense(&self, expense: &FixedExpense) -> Result<()> {
        self.modify(|doc| {
            doc.insert_fixed_expense(expense);
            Ok(())
        })
    }

    fn delete_fixed_expense(&self, id: Uuid) -> Result<()> {
        self.modify(|doc| doc.delete_fixed_expense(id))
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.load()?.budgets)
    }

    fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        self.modify(|doc| {
            doc.upsert_budget(budget);
            Ok(())
        })
    }
}

