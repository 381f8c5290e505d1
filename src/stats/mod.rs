// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over one owner's transactions and budgets.
//!
//! Nothing in here touches the database or the clock: callers load a snapshot,
//! pick a reference date, and get back freshly built result structs.

pub mod dashboard;
pub mod grouping;
pub mod health;
pub mod yearly;

pub use dashboard::{BudgetUsage, CategoryStat, DashboardStats, MonthlyPoint, compute_dashboard};
pub use grouping::{MonthKey, group_sum};
pub use health::{HealthStatus, classify, savings_rate};
pub use yearly::{YearlyStats, compute_yearly};

use crate::models::{Budget, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Rejects the whole snapshot if any record is malformed.
pub(crate) fn validate(transactions: &[Transaction], budgets: &[Budget]) -> Result<(), StatsError> {
    for t in transactions {
        if t.amount <= Decimal::ZERO {
            return Err(StatsError::InvalidInput(format!(
                "transaction {} has non-positive amount {}",
                t.id, t.amount
            )));
        }
    }
    // Every sum taken later is a partial sum of positive amounts.
    if transactions
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
        .is_none()
    {
        return Err(StatsError::InvalidInput(
            "transaction amounts add up to more than can be represented".to_string(),
        ));
    }
    for b in budgets {
        if b.limit < Decimal::ZERO {
            return Err(StatsError::InvalidInput(format!(
                "budget {} has negative limit {}",
                b.id, b.limit
            )));
        }
        if !(1..=12).contains(&b.month) {
            return Err(StatsError::InvalidInput(format!(
                "budget {} has invalid month {}",
                b.id, b.month
            )));
        }
    }
    Ok(())
}
