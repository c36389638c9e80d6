use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use crate::errors::{FinanceError, Result};

/// A monthly spending guardrail. At most one budget exists per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub category: Category,
    pub limit_cents: i64,
}

impl Budget {
    pub fn new(id: Uuid, category: Category, limit_cents: i64) -> Result<Self> {
        if limit_cents <= 0 {
            return Err(FinanceError::Validation(format!(
                "budget limit for {} must be positive",
                category
            )));
        }
        Ok(Self {
            id,
            category,
            limit_cents,
        })
    }
}
