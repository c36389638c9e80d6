use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use crate::errors::{FinanceError, Result};

/// A recurring monthly obligation definition. Generated transactions point back to
/// it through `fixed_expense_id`; it never owns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedExpense {
    pub id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub category: Category,
    /// 1-31; clamped to the month's length when a transaction is generated.
    pub day_of_month: u32,
}

impl FixedExpense {
    pub fn new(
        id: Uuid,
        description: impl Into<String>,
        amount_cents: i64,
        category: Category,
        day_of_month: u32,
    ) -> Result<Self> {
        let expense = Self {
            id,
            description: description.into(),
            amount_cents,
            category,
            day_of_month,
        };
        expense.validate()?;
        Ok(expense)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.day_of_month) {
            return Err(FinanceError::Validation(format!(
                "day of month must be between 1 and 31, got {}",
                self.day_of_month
            )));
        }
        if self.amount_cents <= 0 {
            return Err(FinanceError::Validation(
                "fixed expense amount must be positive".into(),
            ));
        }
        Ok(())
    }
}
