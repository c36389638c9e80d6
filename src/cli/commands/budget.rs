use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;

use super::{parse_category, require_args};

pub(crate) const BUDGET_SET_USAGE: &str = "budget-set <category> <limit>";

pub fn cmd_budget_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, BUDGET_SET_USAGE)?;
    let category = parse_category(args[0])?;
    let limit_cents = context.parse_amount(args[1])?;
    let budget = context.tracker.set_budget(category, limit_cents)?;
    output::success(format!(
        "Budget for {} set to {}.",
        budget.category,
        context.money.format(budget.limit_cents)
    ));
    Ok(())
}

pub fn cmd_budgets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first())?;
    let statuses = context.tracker.budget_statuses(month)?;

    output::section(format!("Budgets {}", month));
    if statuses.is_empty() {
        output::info("No budgets defined. Use `budget-set` to create one.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|status| {
            vec![
                status.budget.category.to_string(),
                context.money.format(status.budget.limit_cents),
                context.money.format(status.spent_cents),
                context.money.format(status.remaining_cents),
                format!("{:.0}%", status.percent_used),
                if status.over_limit { "OVER" } else { "ok" }.to_string(),
            ]
        })
        .collect();
    output::table(
        &["Category", "Limit", "Spent", "Remaining", "Used", "Status"],
        &rows,
    );
    for status in statuses.iter().filter(|status| status.over_limit) {
        output::warning(format!(
            "{} budget exceeded by {}.",
            status.budget.category,
            context.money.format(-status.remaining_cents)
        ));
    }
    Ok(())
}

pub fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first())?;
    let summary = context.tracker.monthly_summary(month)?;

    output::section(format!("Summary {}", month));
    output::info(format!("Income:   {}", context.money.format(summary.income_cents)));
    output::info(format!("Expenses: {}", context.money.format(summary.expense_cents)));
    output::info(format!("Balance:  {}", context.money.format(summary.balance_cents)));
    if !summary.expenses_by_category.is_empty() {
        let rows: Vec<Vec<String>> = summary
            .expenses_by_category
            .iter()
            .map(|entry| {
                vec![
                    entry.category.to_string(),
                    context.money.format(entry.total_cents),
                ]
            })
            .collect();
        output::table(&["Category", "Spent"], &rows);
    }
    Ok(())
}
