use crate::cli::core::{forget_listed, CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::{parse_category, require_args};

pub(crate) const FIXED_ADD_USAGE: &str = "fixed-add <amount> <category> <day-of-month> <description>";
pub(crate) const FIXED_DELETE_USAGE: &str = "fixed-delete <row|id>";

pub fn cmd_fixed_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, FIXED_ADD_USAGE)?;
    let amount_cents = context.parse_amount(args[0])?;
    let category = parse_category(args[1])?;
    let day_of_month: u32 = args[2].parse().map_err(|_| {
        CommandError::InvalidArguments(format!("day of month must be 1-31, got `{}`", args[2]))
    })?;
    let description = args[3..].join(" ");

    let expense =
        context
            .tracker
            .add_fixed_expense(description, amount_cents, category, day_of_month)?;
    output::success(format!(
        "Fixed expense `{}` of {} due on day {}.",
        expense.description,
        context.money.format(expense.amount_cents),
        expense.day_of_month
    ));
    Ok(())
}

pub fn cmd_fixed_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let expenses = context.tracker.fixed_expenses()?;
    context.listed_fixed_expenses = expenses.iter().map(|expense| Some(expense.id)).collect();

    output::section("Fixed expenses");
    if expenses.is_empty() {
        output::info("No fixed expenses defined.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = expenses
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            vec![
                (index + 1).to_string(),
                expense.day_of_month.to_string(),
                expense.category.to_string(),
                context.money.format(expense.amount_cents),
                expense.description.clone(),
            ]
        })
        .collect();
    output::table(&["#", "Day", "Category", "Amount", "Description"], &rows);
    Ok(())
}

pub fn cmd_fixed_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, FIXED_DELETE_USAGE)?;
    let target = context.resolve_fixed_expense(args[0])?;
    if !context.confirm(&format!("Remove fixed expense `{}`?", target.description))? {
        output::info("Removal cancelled.");
        return Ok(());
    }
    context.tracker.delete_fixed_expense(target.id)?;
    forget_listed(&mut context.listed_fixed_expenses, target.id);
    output::success(format!(
        "Removed `{}`; transactions already generated are kept.",
        target.description
    ));
    Ok(())
}

pub fn cmd_generate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first())?;
    let created = context.tracker.generate_fixed_transactions(month)?;
    output::success(format!(
        "Generated {} fixed expense transaction(s) for {}.",
        created.len(),
        month
    ));
    for txn in &created {
        output::info(format!(
            "{}  {}  {}",
            txn.date,
            context.money.format(txn.amount_cents),
            txn.description
        ));
    }
    Ok(())
}
