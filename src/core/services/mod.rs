pub mod budget_service;
pub mod search_service;
pub mod summary_service;

pub use budget_service::{BudgetService, BudgetStatus};
pub use search_service::{Period, SearchService};
pub use summary_service::{CategoryTotal, MonthlySummary, SummaryService};

#[cfg(test)]
mod tests;
