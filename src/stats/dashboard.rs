// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::grouping::{MonthKey, group_sum};
use super::health::{HealthStatus, classify, savings_rate};
use super::{StatsError, validate};
use crate::models::{Budget, Transaction, TransactionKind};

pub const EVOLUTION_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub reference_month: String,
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub category_stats: Vec<CategoryStat>,
    pub monthly_evolution: Vec<MonthlyPoint>,
    pub savings_rate: Option<Decimal>,
    pub health_status: HealthStatus,
    pub budget_usage: Vec<BudgetUsage>,
}

fn sum_kind<'a, I>(items: I, kind: TransactionKind) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    items
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Monthly income/expense sums for each of `months`, in the order given.
pub(crate) fn monthly_series(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlyPoint> {
    let by_month = |kind: TransactionKind| -> HashMap<MonthKey, Decimal> {
        let of_kind: Vec<&Transaction> = transactions.iter().filter(|t| t.kind == kind).collect();
        group_sum(&of_kind, |t| MonthKey::of(t.occurred_on), |t| t.amount)
            .into_iter()
            .collect()
    };
    let income = by_month(TransactionKind::Income);
    let expenses = by_month(TransactionKind::Expense);
    months
        .iter()
        .map(|key| MonthlyPoint {
            month: key.label(),
            income: income.get(key).copied().unwrap_or(Decimal::ZERO),
            expenses: expenses.get(key).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Builds the dashboard for the calendar month containing `reference`.
///
/// The snapshot is validated up front; a single bad record fails the whole call.
pub fn compute_dashboard(
    transactions: &[Transaction],
    budgets: &[Budget],
    reference: NaiveDate,
) -> Result<DashboardStats, StatsError> {
    validate(transactions, budgets)
        .inspect_err(|e| warn!(error = %e, "compute_dashboard: snapshot rejected"))?;
    debug!(
        transactions = transactions.len(),
        budgets = budgets.len(),
        %reference,
        "compute_dashboard: snapshot validated"
    );

    let current = MonthKey::of(reference);
    let total_income = sum_kind(transactions, TransactionKind::Income);
    let total_expenses = sum_kind(transactions, TransactionKind::Expense);

    let this_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| current.contains(t.occurred_on))
        .collect();
    let monthly_income = sum_kind(this_month.iter().copied(), TransactionKind::Income);
    let monthly_expenses = sum_kind(this_month.iter().copied(), TransactionKind::Expense);

    let month_expenses: Vec<&Transaction> = this_month
        .iter()
        .copied()
        .filter(|t| t.kind == TransactionKind::Expense)
        .collect();
    let by_category = group_sum(&month_expenses, |t| t.category.clone(), |t| t.amount);
    let category_stats: Vec<CategoryStat> = by_category
        .iter()
        .map(|(category, amount)| CategoryStat {
            category: category.clone(),
            amount: *amount,
        })
        .collect();

    let monthly_evolution = monthly_series(
        transactions,
        &MonthKey::trailing(reference, EVOLUTION_MONTHS),
    );

    let budget_usage: Vec<BudgetUsage> = budgets
        .iter()
        .filter(|b| MonthKey::new(b.year, b.month) == current)
        .map(|b| {
            let spent = by_category
                .iter()
                .find(|(c, _)| *c == b.category)
                .map(|(_, v)| *v)
                .unwrap_or(Decimal::ZERO);
            BudgetUsage {
                category: b.category.clone(),
                limit: b.limit,
                spent,
                remaining: b.limit - spent,
                over_budget: spent > b.limit,
            }
        })
        .collect();

    if this_month.is_empty() {
        warn!(month = %current, "compute_dashboard: no transactions in reference month");
    }

    let stats = DashboardStats {
        reference_month: current.label(),
        balance: total_income - total_expenses,
        total_income,
        total_expenses,
        monthly_income,
        monthly_expenses,
        category_stats,
        monthly_evolution,
        savings_rate: savings_rate(total_income, total_expenses),
        health_status: classify(total_income, total_expenses),
        budget_usage,
    };
    debug!(
        categories = stats.category_stats.len(),
        health = %stats.health_status,
        "compute_dashboard: done"
    );
    Ok(stats)
}
