// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Every `(issue, detail)` pair found in the store.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Transactions the dashboard would refuse, plus categories outside the known sets
    let mut stmt = conn.prepare(
        "SELECT t.id, o.email, t.kind, t.amount, t.category, t.date
         FROM transactions t LEFT JOIN owners o ON t.owner_id=o.id ORDER BY t.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let owner: Option<String> = r.get(1)?;
        let kind_raw: String = r.get(2)?;
        let amount_raw: String = r.get(3)?;
        let category: String = r.get(4)?;
        let date_raw: String = r.get(5)?;
        let who = owner.unwrap_or_else(|| "(no owner)".into());

        match kind_raw.parse::<TransactionKind>() {
            Ok(kind) => {
                if !kind.categories().contains(&category.as_str()) {
                    rows.push(vec![
                        "unknown_category".into(),
                        format!("tx {} ({}): {} '{}'", id, who, kind, category),
                    ]);
                }
            }
            Err(_) => rows.push(vec![
                "invalid_kind".into(),
                format!("tx {} ({}): '{}'", id, who, kind_raw),
            ]),
        }
        match amount_raw.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            _ => rows.push(vec![
                "non_positive_amount".into(),
                format!("tx {} ({}): '{}'", id, who, amount_raw),
            ]),
        }
        if NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").is_err() {
            rows.push(vec![
                "invalid_date".into(),
                format!("tx {} ({}): '{}'", id, who, date_raw),
            ]);
        }
    }

    // 2) Budgets with a negative limit or a month outside 1-12
    let mut stmt2 = conn.prepare("SELECT id, category, amount, month FROM budgets ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let category: String = r.get(1)?;
        let amount_raw: String = r.get(2)?;
        let month: i64 = r.get(3)?;
        match amount_raw.parse::<Decimal>() {
            Ok(a) if a >= Decimal::ZERO => {}
            _ => rows.push(vec![
                "invalid_budget".into(),
                format!("budget {} ({}): '{}'", id, category, amount_raw),
            ]),
        }
        if !(1..=12).contains(&month) {
            rows.push(vec![
                "invalid_budget".into(),
                format!("budget {} ({}): month {}", id, category, month),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found problems");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
