// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::stats::StatsError;

pub const INCOME_CATEGORIES: &[&str] = &["Salaire", "Business", "Autres"];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Logement",
    "Nourriture",
    "Transport",
    "Loisirs",
    "Santé",
    "Éducation",
    "Shopping",
    "Autres",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Categories a new record of this kind may use.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(StatsError::InvalidInput(format!(
                "unknown transaction kind '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub owner_id: i64,
    pub category: String,
    pub limit: Decimal,
    pub month: u32, // 1-12
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Percentage of the target reached; may exceed 100.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount * Decimal::ONE_HUNDRED
    }

    pub fn progress_clamped(&self) -> Decimal {
        self.progress().clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}
