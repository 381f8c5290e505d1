// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::load_goals;
use crate::utils::{
    get_currency, maybe_print_json, parse_date, parse_non_negative_decimal,
    parse_positive_decimal, pretty_table, resolve_owner,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        return Err(anyhow!("Goal name must not be empty"));
    }
    let target = parse_positive_decimal(sub.get_one::<String>("target").unwrap())?;
    let current = sub
        .get_one::<String>("current")
        .map(|s| parse_non_negative_decimal(s))
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let target_date = sub
        .get_one::<String>("target-date")
        .map(|s| parse_date(s))
        .transpose()?;
    conn.execute(
        "INSERT INTO savings_goals(owner_id, name, target_amount, current_amount, target_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            owner_id,
            name,
            target.to_string(),
            current.to_string(),
            target_date.map(|d| d.to_string())
        ],
    )?;
    println!("Added goal '{}' ({} / {})", name, current, target);
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress: Decimal,
    pub target_date: Option<String>,
}

pub fn goal_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<GoalRow>> {
    let owner_id = resolve_owner(conn, sub)?;
    Ok(load_goals(conn, owner_id)?
        .into_iter()
        .map(|g| GoalRow {
            id: g.id,
            progress: g.progress_clamped().round_dp(1),
            name: g.name,
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            target_date: g.target_date.map(|d| d.to_string()),
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = goal_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|g| {
            let filled = (g.progress / Decimal::TEN)
                .floor()
                .to_usize()
                .unwrap_or(0);
            vec![
                g.id.to_string(),
                g.name.clone(),
                format!("{:.2} / {:.2} {}", g.current_amount, g.target_amount, ccy),
                format!("{}{} {:.1}%", "#".repeat(filled), ".".repeat(10 - filled), g.progress),
                g.target_date.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Goal", "Saved", "Progress", "Target date"], rows)
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM savings_goals WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
        |r| r.get(0),
    )?;
    if exists == 0 {
        return Err(anyhow!("Savings goal {} not found", id));
    }
    let name = sub
        .get_one::<String>("name")
        .map(|n| {
            let n = n.trim();
            if n.is_empty() {
                Err(anyhow!("Goal name must not be empty"))
            } else {
                Ok(n.to_string())
            }
        })
        .transpose()?;
    let target = sub
        .get_one::<String>("target")
        .map(|t| parse_positive_decimal(t))
        .transpose()?;
    let current = sub
        .get_one::<String>("current")
        .map(|c| parse_non_negative_decimal(c))
        .transpose()?;
    let target_date = sub
        .get_one::<String>("target-date")
        .map(|d| parse_date(d))
        .transpose()?;

    let tx = conn.unchecked_transaction()?;
    if let Some(name) = name {
        tx.execute(
            "UPDATE savings_goals SET name=?1 WHERE id=?2 AND owner_id=?3",
            params![name, id, owner_id],
        )?;
    }
    if let Some(target) = target {
        tx.execute(
            "UPDATE savings_goals SET target_amount=?1 WHERE id=?2 AND owner_id=?3",
            params![target.to_string(), id, owner_id],
        )?;
    }
    if let Some(current) = current {
        tx.execute(
            "UPDATE savings_goals SET current_amount=?1 WHERE id=?2 AND owner_id=?3",
            params![current.to_string(), id, owner_id],
        )?;
    }
    if let Some(date) = target_date {
        tx.execute(
            "UPDATE savings_goals SET target_date=?1 WHERE id=?2 AND owner_id=?3",
            params![date.to_string(), id, owner_id],
        )?;
    }
    tx.commit()?;
    println!("Updated savings goal {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM savings_goals WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if n == 0 {
        return Err(anyhow!("Savings goal {} not found", id));
    }
    println!("Removed savings goal {}", id);
    Ok(())
}
