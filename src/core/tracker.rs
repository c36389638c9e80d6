//! Facade that runs the scheduling engine against an injected storage backend.

use tracing::{debug, info};
use uuid::Uuid;

use super::{
    ids::{IdGenerator, UuidGenerator},
    services::{BudgetService, BudgetStatus, MonthlySummary, Period, SearchService, SummaryService},
    time::{Clock, SystemClock},
};
use crate::errors::{FinanceError, Result};
use crate::ledger::{
    installments, propagation, recurring, Budget, Category, FixedExpense, InstallmentPlan,
    Transaction, TransactionDraft, TransactionKind, YearMonth,
};
use crate::storage::StorageBackend;

pub struct FinanceTracker {
    storage: Box<dyn StorageBackend>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl FinanceTracker {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self::with_collaborators(storage, Box::new(UuidGenerator), Box::new(SystemClock))
    }

    pub fn with_collaborators(
        storage: Box<dyn StorageBackend>,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            ids,
            clock,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.storage.list_transactions()
    }

    /// Transactions dated inside `month`, oldest first.
    pub fn transactions_in(&self, month: YearMonth) -> Result<Vec<Transaction>> {
        let mut selected: Vec<Transaction> = self
            .storage
            .list_transactions()?
            .into_iter()
            .filter(|txn| month.contains(txn.date))
            .collect();
        selected.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.description.cmp(&b.description)));
        Ok(selected)
    }

    /// Transactions in `period` matching `search` against description or category, newest first.
    pub fn find_transactions(&self, period: Period, search: Option<&str>) -> Result<Vec<Transaction>> {
        let all = self.storage.list_transactions()?;
        Ok(SearchService::filter(&all, period, search))
    }

    pub fn transaction(&self, id: Uuid) -> Result<Transaction> {
        self.storage
            .list_transactions()?
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or(FinanceError::NotFound(id))
    }

    /// Records a new transaction. Expenses honour the installment plan; income is
    /// always a single transaction.
    pub fn add_transaction(
        &self,
        mut draft: TransactionDraft,
        plan: InstallmentPlan,
    ) -> Result<Vec<Transaction>> {
        if draft.amount_cents <= 0 {
            return Err(FinanceError::Validation("amount must be positive".into()));
        }
        let created = match draft.kind {
            TransactionKind::Expense => {
                draft.amount_cents = plan.resolve_total(draft.amount_cents)?;
                installments::expand(&draft, plan.count, self.ids.as_ref())?
            }
            TransactionKind::Income => {
                if plan.count > 1 {
                    debug!(count = plan.count, "installments ignored for income");
                }
                vec![Transaction::from_draft(self.ids.next_id(), draft)]
            }
        };
        self.storage.insert_transactions(&created)?;
        info!(count = created.len(), "transactions recorded");
        Ok(created)
    }

    /// Saves an edited transaction. Installment members update their whole group;
    /// anything else is overwritten field by field. Returns what was written.
    pub fn update_transaction(&self, edited: Transaction) -> Result<Vec<Transaction>> {
        edited.validate()?;
        let all = self.storage.list_transactions()?;
        let existing = all
            .iter()
            .find(|txn| txn.id == edited.id)
            .ok_or(FinanceError::NotFound(edited.id))?;

        let written = match existing.group_id() {
            Some(group_id) => {
                let members: Vec<Transaction> = all
                    .iter()
                    .filter(|txn| txn.group_id() == Some(group_id))
                    .cloned()
                    .collect();
                let mut anchored = edited;
                anchored.installment_info = existing.installment_info;
                propagation::propagate(&anchored, &members)?
            }
            None => {
                let mut replacement = edited;
                replacement.installment_info = None;
                vec![replacement]
            }
        };

        self.storage.update_transactions(&written)?;
        info!(count = written.len(), "transactions updated");
        Ok(written)
    }

    pub fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.storage.delete_transaction(id)?;
        info!(%id, "transaction deleted");
        Ok(())
    }

    pub fn fixed_expenses(&self) -> Result<Vec<FixedExpense>> {
        self.storage.list_fixed_expenses()
    }

    pub fn add_fixed_expense(
        &self,
        description: impl Into<String>,
        amount_cents: i64,
        category: Category,
        day_of_month: u32,
    ) -> Result<FixedExpense> {
        let expense = FixedExpense::new(
            self.ids.next_id(),
            description,
            amount_cents,
            category,
            day_of_month,
        )?;
        self.storage.insert_fixed_expense(&expense)?;
        info!(id = %expense.id, "fixed expense defined");
        Ok(expense)
    }

    /// Removes a definition. Transactions it already generated stay in place.
    pub fn delete_fixed_expense(&self, id: Uuid) -> Result<()> {
        self.storage.delete_fixed_expense(id)?;
        info!(%id, "fixed expense removed");
        Ok(())
    }

    /// Generates and stores the fixed-expense transactions missing from `month`.
    pub fn generate_fixed_transactions(&self, month: YearMonth) -> Result<Vec<Transaction>> {
        let definitions = self.storage.list_fixed_expenses()?;
        if definitions.is_empty() {
            return Ok(Vec::new());
        }
        let existing = self.storage.list_transactions()?;
        let created = recurring::generate(&definitions, month, &existing, self.ids.as_ref())?;
        if !created.is_empty() {
            self.storage.insert_transactions(&created)?;
        }
        info!(%month, generated = created.len(), "fixed expenses generated");
        Ok(created)
    }

    pub fn budgets(&self) -> Result<Vec<Budget>> {
        self.storage.list_budgets()
    }

    /// Creates or replaces the budget of `category`, keeping an existing budget's id.
    pub fn set_budget(&self, category: Category, limit_cents: i64) -> Result<Budget> {
        let id = self
            .storage
            .list_budgets()?
            .into_iter()
            .find(|budget| budget.category == category)
            .map(|budget| budget.id)
            .unwrap_or_else(|| self.ids.next_id());
        let budget = Budget::new(id, category, limit_cents)?;
        self.storage.upsert_budget(&budget)?;
        Ok(budget)
    }

    pub fn budget_statuses(&self, month: YearMonth) -> Result<Vec<BudgetStatus>> {
        let budgets = self.storage.list_budgets()?;
        let transactions = self.storage.list_transactions()?;
        Ok(BudgetService::statuses(&budgets, &transactions, month))
    }

    pub fn monthly_summary(&self, month: YearMonth) -> Result<MonthlySummary> {
        let transactions = self.storage.list_transactions()?;
        Ok(SummaryService::monthly(&transactions, month))
    }

    pub fn current_month(&self) -> YearMonth {
        self.clock.current_month()
    }
}
