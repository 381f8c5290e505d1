// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Critical,
    Moderate,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "critical",
            HealthStatus::Moderate => "moderate",
            HealthStatus::Good => "good",
            HealthStatus::Excellent => "excellent",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Savings as a percentage of income.
///
/// `None` when there is no income or the rate does not fit in a `Decimal`.
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Option<Decimal> {
    if income <= Decimal::ZERO {
        return None;
    }
    income
        .checked_sub(expenses)?
        .checked_div(income)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// `saved * factor >= income`, where a product too large to represent
/// takes the sign of `saved`.
fn covers(saved: Decimal, factor: Decimal, income: Decimal) -> bool {
    match saved.checked_mul(factor) {
        Some(scaled) => scaled >= income,
        None => saved > Decimal::ZERO,
    }
}

/// Bands are inclusive on their lower bound: <0, [0,10), [10,20), >=20.
///
/// Without income, any spending is critical and no activity at all is moderate.
pub fn classify(income: Decimal, expenses: Decimal) -> HealthStatus {
    if income <= Decimal::ZERO {
        return if expenses > Decimal::ZERO {
            HealthStatus::Critical
        } else {
            HealthStatus::Moderate
        };
    }
    // income > 0, so the difference only overflows upwards
    let Some(saved) = income.checked_sub(expenses) else {
        return HealthStatus::Excellent;
    };
    // Compare savings against fractions of income so band edges stay exact.
    if covers(saved, Decimal::from(5), income) {
        HealthStatus::Excellent
    } else if covers(saved, Decimal::TEN, income) {
        HealthStatus::Good
    } else if saved >= Decimal::ZERO {
        HealthStatus::Moderate
    } else {
        HealthStatus::Critical
    }
}
