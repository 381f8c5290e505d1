// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::reference_date;
use crate::models::TransactionKind;
use crate::stats::{BudgetUsage, MonthKey, compute_dashboard};
use crate::store::{load_budgets, load_transactions};
use crate::utils::{
    maybe_print_json, parse_month_number, parse_non_negative_decimal, pretty_table,
    resolve_owner, validate_category,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let cat = validate_category(
        TransactionKind::Expense,
        sub.get_one::<String>("category").unwrap(),
    )?;
    let amount = parse_non_negative_decimal(sub.get_one::<String>("amount").unwrap())?;
    let month = parse_month_number(sub.get_one::<String>("month").unwrap())?;
    let year = *sub.get_one::<i32>("year").unwrap();
    conn.execute(
        "INSERT INTO budgets(owner_id, category, amount, month, year) VALUES (?1,?2,?3,?4,?5)
         ON CONFLICT(owner_id, category, month, year) DO UPDATE SET amount=excluded.amount",
        params![owner_id, cat, amount.to_string(), month, year],
    )?;
    println!(
        "Budget set for {} / {} = {}",
        MonthKey::new(year, month),
        cat,
        amount
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month_number(m))
        .transpose()?;
    let year = sub.get_one::<i32>("year").copied();
    let data: Vec<Vec<String>> = load_budgets(conn, owner_id)?
        .into_iter()
        .filter(|b| month.is_none_or(|m| b.month == m))
        .filter(|b| year.is_none_or(|y| b.year == y))
        .map(|b| {
            vec![
                b.id.to_string(),
                MonthKey::new(b.year, b.month).label(),
                b.category,
                format!("{:.2}", b.limit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Month", "Category", "Budget"], data)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM budgets WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if n == 0 {
        return Err(anyhow!("Budget {} not found", id));
    }
    println!("Removed budget {}", id);
    Ok(())
}

/// Budgets of the reference month next to what was actually spent.
pub fn usage(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<BudgetUsage>> {
    let owner_id = resolve_owner(conn, sub)?;
    let reference = reference_date(sub)?;
    let (first, last) = MonthKey::of(reference)
        .bounds()
        .context("Reference month is out of range")?;
    let month_tx = load_transactions(conn, owner_id, Some(first), Some(last))?;
    let budgets = load_budgets(conn, owner_id)?;
    Ok(compute_dashboard(&month_tx, &budgets, reference)?.budget_usage)
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = usage(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|u| {
                vec![
                    u.category.clone(),
                    format!("{:.2}", u.limit),
                    format!("{:.2}", u.spent),
                    format!("{:.2}", u.remaining),
                    if u.over_budget { "over" } else { "ok" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Remaining", "Status"], rows)
        );
    }
    Ok(())
}
