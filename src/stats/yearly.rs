// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::dashboard::{CategoryStat, MonthlyPoint, monthly_series};
use super::grouping::{MonthKey, group_sum};
use super::health::{HealthStatus, classify, savings_rate};
use super::{StatsError, validate};
use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyStats {
    pub year: i32,
    pub months: Vec<MonthlyPoint>,
    pub expense_categories: Vec<CategoryStat>,
    pub income_categories: Vec<CategoryStat>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
    pub savings_rate: Option<Decimal>,
    pub health_status: HealthStatus,
}

fn categories_of(items: &[&Transaction], kind: TransactionKind) -> Vec<CategoryStat> {
    let of_kind: Vec<&Transaction> = items.iter().copied().filter(|t| t.kind == kind).collect();
    group_sum(&of_kind, |t| t.category.clone(), |t| t.amount)
        .into_iter()
        .map(|(category, amount)| CategoryStat { category, amount })
        .collect()
}

/// Per-month and per-category view of a single calendar year.
pub fn compute_yearly(transactions: &[Transaction], year: i32) -> Result<YearlyStats, StatsError> {
    validate(transactions, &[])
        .inspect_err(|e| warn!(year, error = %e, "compute_yearly: snapshot rejected"))?;

    let in_year: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.occurred_on.year() == year)
        .collect();
    let months = monthly_series(transactions, &MonthKey::year(year));
    let total_income: Decimal = months.iter().map(|m| m.income).sum();
    let total_expenses: Decimal = months.iter().map(|m| m.expenses).sum();

    debug!(year, transactions = in_year.len(), "compute_yearly: bucketed");

    Ok(YearlyStats {
        year,
        months,
        expense_categories: categories_of(&in_year, TransactionKind::Expense),
        income_categories: categories_of(&in_year, TransactionKind::Income),
        total_income,
        total_expenses,
        savings: total_income - total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
        health_status: classify(total_income, total_expenses),
    })
}
