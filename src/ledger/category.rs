use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

/// Spending and income categories available to transactions, budgets and fixed expenses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Housing,
    Transport,
    Food,
    Entertainment,
    Health,
    Education,
    Pets,
    Clothing,
    Salary,
    Investment,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Housing,
        Category::Transport,
        Category::Food,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Pets,
        Category::Clothing,
        Category::Salary,
        Category::Investment,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Pets => "Pets",
            Category::Clothing => "Clothing",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| FinanceError::Validation(format!("unknown category `{}`", value)))
    }
}
