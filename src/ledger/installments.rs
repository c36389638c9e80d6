//! Splits one purchase into monthly installment transactions sharing a group id.

use tracing::debug;

use super::{
    calendar::shift_months,
    transaction::{InstallmentInfo, Transaction, TransactionDraft, TransactionKind},
};
use crate::core::ids::IdGenerator;
use crate::errors::{FinanceError, Result};

/// How the amount typed by the user relates to the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountMode {
    /// The entered amount is the whole purchase.
    #[default]
    Total,
    /// The entered amount is charged each month.
    PerInstallment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPlan {
    pub count: u32,
    pub mode: AmountMode,
}

impl Default for InstallmentPlan {
    fn default() -> Self {
        Self::single()
    }
}

impl InstallmentPlan {
    pub fn single() -> Self {
        Self {
            count: 1,
            mode: AmountMode::Total,
        }
    }

    pub fn new(count: u32, mode: AmountMode) -> Self {
        Self { count, mode }
    }

    /// Turns the entered amount into the purchase total handed to [`expand`].
    pub fn resolve_total(&self, entered_cents: i64) -> Result<i64> {
        match self.mode {
            AmountMode::Total => Ok(entered_cents),
            AmountMode::PerInstallment => entered_cents
                .checked_mul(i64::from(self.count))
                .ok_or_else(|| FinanceError::Validation("installment total overflows".into())),
        }
    }
}

/// Splits `total_cents` into `count` shares; the last share absorbs the remainder.
pub fn split_amount(total_cents: i64, count: u32) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let count = i64::from(count);
    let share = total_cents / count;
    let last = total_cents - share * (count - 1);
    let mut shares = vec![share; (count - 1) as usize];
    shares.push(last);
    shares
}

/// Expands a base expense into `installment_count` transactions ordered by index.
///
/// A single installment yields the base expense unchanged with no installment
/// info. Otherwise each member is dated one calendar month after the previous
/// one (clamped to month length), labelled `"<base> (i/n)"`, and shares a fresh
/// group id.
pub fn expand(
    base: &TransactionDraft,
    installment_count: u32,
    ids: &dyn IdGenerator,
) -> Result<Vec<Transaction>> {
    if base.kind != TransactionKind::Expense {
        return Err(FinanceError::Validation(
            "only expenses can be split into installments".into(),
        ));
    }
    if installment_count == 0 {
        return Err(FinanceError::Validation(
            "installment count must be at least 1".into(),
        ));
    }
    if base.amount_cents <= 0 {
        return Err(FinanceError::Validation("amount must be positive".into()));
    }

    if installment_count == 1 {
        return Ok(vec![Transaction::from_draft(ids.next_id(), base.clone())]);
    }
    if base.amount_cents < i64::from(installment_count) {
        return Err(FinanceError::Validation(format!(
            "{} cents cannot be split into {} positive installments",
            base.amount_cents, installment_count
        )));
    }

    let group_id = ids.next_id();
    let shares = split_amount(base.amount_cents, installment_count);
    let mut members = Vec::with_capacity(shares.len());
    for (index, amount_cents) in shares.into_iter().enumerate() {
        let info = InstallmentInfo {
            current: index as u32 + 1,
            total: installment_count,
            group_id,
        };
        members.push(Transaction {
            id: ids.next_id(),
            kind: base.kind,
            category: base.category,
            amount_cents,
            description: format!("{}{}", base.description, info.suffix()),
            date: shift_months(base.date, index as i32)?,
            fixed_expense_id: None,
            installment_info: Some(info),
        });
    }

    debug!(
        %group_id,
        installments = installment_count,
        total_cents = base.amount_cents,
        "expanded purchase into installments"
    );
    Ok(members)
}
