//! Ledger domain models and the installment / fixed-expense scheduling engine.

pub mod budget;
pub mod calendar;
pub mod category;
pub mod dates;
pub mod fixed_expense;
pub mod installments;
pub mod propagation;
pub mod recurring;
pub mod transaction;

pub use budget::Budget;
pub use calendar::{add_months, days_in_month, month_bounds, shift_months, YearMonth};
pub use category::Category;
pub use fixed_expense::FixedExpense;
pub use installments::{AmountMode, InstallmentPlan};
pub use transaction::{
    strip_installment_suffix, InstallmentInfo, Transaction, TransactionDraft, TransactionKind,
};
