// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row loaders. Record queries are always scoped to one owner.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Budget, Owner, SavingsGoal, Transaction, TransactionKind};

fn decimal_col(raw: &str, what: &str, id: i64) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' on row {}", what, raw, id))
}

fn date_col(raw: &str, id: i64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' on row {}", raw, id))
}

pub fn load_owners(conn: &Connection) -> Result<Vec<Owner>> {
    let mut stmt =
        conn.prepare("SELECT id, email, full_name, created_at FROM owners ORDER BY email")?;
    let rows = stmt.query_map([], |r| {
        Ok(Owner {
            id: r.get(0)?,
            email: r.get(1)?,
            full_name: r.get(2)?,
            created_at: r.get(3)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// All transactions of `owner_id`, optionally restricted to `[from, to]` (inclusive).
pub fn load_transactions(
    conn: &Connection,
    owner_id: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, amount, category, date, note FROM transactions
         WHERE owner_id=?1
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY date, id",
    )?;
    let rows = stmt.query_map(
        params![
            owner_id,
            from.map(|d| d.to_string()),
            to.map(|d| d.to_string())
        ],
        |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        },
    )?;

    let mut out = Vec::new();
    for row in rows {
        let (id, kind, amount, category, date, note) = row?;
        let kind: TransactionKind = kind
            .parse()
            .with_context(|| format!("Transaction {} has an unreadable kind", id))?;
        out.push(Transaction {
            id,
            owner_id,
            kind,
            amount: decimal_col(&amount, "amount", id)?,
            category,
            occurred_on: date_col(&date, id)?,
            note: note.filter(|n| !n.is_empty()),
        });
    }
    debug!(owner_id, count = out.len(), "loaded transactions");
    Ok(out)
}

pub fn load_budgets(conn: &Connection, owner_id: i64) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, amount, month, year FROM budgets
         WHERE owner_id=?1 ORDER BY year, month, category",
    )?;
    let rows = stmt.query_map(params![owner_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, u32>(3)?,
            r.get::<_, i32>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, category, amount, month, year) = row?;
        out.push(Budget {
            id,
            owner_id,
            category,
            limit: decimal_col(&amount, "budget amount", id)?,
            month,
            year,
        });
    }
    debug!(owner_id, count = out.len(), "loaded budgets");
    Ok(out)
}

pub fn load_goals(conn: &Connection, owner_id: i64) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, target_date FROM savings_goals
         WHERE owner_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![owner_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target, current, target_date) = row?;
        out.push(SavingsGoal {
            id,
            owner_id,
            name,
            target_amount: decimal_col(&target, "target amount", id)?,
            current_amount: decimal_col(&current, "current amount", id)?,
            target_date: target_date.as_deref().map(|d| date_col(d, id)).transpose()?,
        });
    }
    Ok(out)
}
