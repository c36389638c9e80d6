use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{category::Category, dates::utc_midnight};
use crate::errors::{FinanceError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// Position of a transaction inside a purchase split into monthly installments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallmentInfo {
    pub current: u32,
    pub total: u32,
    pub group_id: Uuid,
}

impl InstallmentInfo {
    /// The `" (current/total)"` marker appended to a member's base description.
    pub fn suffix(&self) -> String {
        format!(" ({}/{})", self.current, self.total)
    }

    pub fn is_valid(&self) -> bool {
        self.total >= 1 && (1..=self.total).contains(&self.current)
    }
}

/// A dated money movement. Amounts are positive minor units (cents).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub amount_cents: i64,
    pub description: String,
    #[serde(with = "utc_midnight")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_expense_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_info: Option<InstallmentInfo>,
}

impl Transaction {
    pub fn from_draft(id: Uuid, draft: TransactionDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            category: draft.category,
            amount_cents: draft.amount_cents,
            description: draft.description,
            date: draft.date,
            fixed_expense_id: None,
            installment_info: None,
        }
    }

    pub fn group_id(&self) -> Option<Uuid> {
        self.installment_info.map(|info| info.group_id)
    }

    pub fn is_installment(&self) -> bool {
        self.installment_info.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount_cents <= 0 {
            return Err(FinanceError::Validation(format!(
                "transaction {} must have a positive amount",
                self.id
            )));
        }
        if let Some(info) = self.installment_info {
            if !info.is_valid() {
                return Err(FinanceError::Validation(format!(
                    "installment {}/{} is out of range",
                    info.current, info.total
                )));
            }
        }
        Ok(())
    }
}

/// User input for a new transaction before an identity is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: Category,
    pub amount_cents: i64,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn expense(
        category: Category,
        amount_cents: i64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind: TransactionKind::Expense,
            category,
            amount_cents,
            description: description.into(),
            date,
        }
    }

    pub fn income(
        category: Category,
        amount_cents: i64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind: TransactionKind::Income,
            category,
            amount_cents,
            description: description.into(),
            date,
        }
    }
}

/// Removes a trailing `" (n/m)"` installment marker and trims the remainder.
pub fn strip_installment_suffix(description: &str) -> &str {
    let stripped = description
        .strip_suffix(')')
        .and_then(|rest| rest.rfind('(').map(|open| (rest, open)))
        .and_then(|(rest, open)| {
            let (current, total) = rest[open + 1..].split_once('/')?;
            (is_digits(current) && is_digits(total)).then(|| &rest[..open])
        });
    stripped.unwrap_or(description).trim()
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_numeric_installment_markers() {
        assert_eq!(strip_installment_suffix("Laptop (2/10)"), "Laptop");
        assert_eq!(strip_installment_suffix("Laptop   (2/10)"), "Laptop");
        assert_eq!(strip_installment_suffix("Laptop"), "Laptop");
        assert_eq!(strip_installment_suffix("Laptop (new)"), "Laptop (new)");
        assert_eq!(strip_installment_suffix("Laptop (2/)"), "Laptop (2/)");
        assert_eq!(strip_installment_suffix("Laptop (1/3) "), "Laptop (1/3)");
        assert_eq!(strip_installment_suffix("TV (1/2) (1/3)"), "TV (1/2)");
    }

    #[test]
    fn serializes_kind_as_type_and_date_anchored_to_utc() {
        let txn = Transaction::from_draft(
            Uuid::nil(),
            TransactionDraft::expense(
                Category::Food,
                1250,
                "Groceries",
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            ),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-01-31T00:00:00.000Z");
        assert!(json.get("installment_info").is_none());
        assert!(json.get("fixed_expense_id").is_none());
    }

    #[test]
    fn validate_rejects_out_of_range_installments() {
        let mut txn = Transaction::from_draft(
            Uuid::nil(),
            TransactionDraft::expense(
                Category::Other,
                100,
                "Thing",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        );
        assert!(txn.validate().is_ok());
        txn.installment_info = Some(InstallmentInfo {
            current: 4,
            total: 3,
            group_id: Uuid::nil(),
        });
        assert!(txn.validate().is_err());
        txn.installment_info = None;
        txn.amount_cents = 0;
        assert!(txn.validate().is_err());
    }
}
