// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::utils::{
    get_currency, maybe_print_json, parse_date, parse_month, parse_positive_decimal,
    pretty_table, resolve_owner, validate_category,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let kind: TransactionKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = validate_category(kind, sub.get_one::<String>("category").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    conn.execute(
        "INSERT INTO transactions(owner_id, kind, amount, category, date, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            kind.as_str(),
            amount.to_string(),
            category,
            date.to_string(),
            note
        ],
    )?;
    println!(
        "Recorded {} {} {} on {} ({})",
        kind,
        amount,
        get_currency(conn)?,
        date,
        category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Kind", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let owner_id = resolve_owner(conn, sub)?;
    let mut sql = String::from(
        "SELECT id, date, kind, category, amount, note FROM transactions WHERE owner_id=?",
    );
    let mut params_vec: Vec<Value> = vec![Value::Integer(owner_id)];

    if let Some(kind) = sub.get_one::<String>("kind") {
        sql.push_str(" AND kind=?");
        params_vec.push(Value::Text(
            kind.parse::<TransactionKind>()?.as_str().to_string(),
        ));
    }
    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(Value::Text(parse_month(month)?.label()));
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(Value::Text(cat.trim().to_string()));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(Value::Integer(*limit as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let note: Option<String> = r.get(5)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            kind: r.get(2)?,
            category: r.get(3)?,
            amount: r.get(4)?,
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let kind_raw: String = conn
        .query_row(
            "SELECT kind FROM transactions WHERE id=?1 AND owner_id=?2",
            params![id, owner_id],
            |r| r.get(0),
        )
        .optional()?
        .ok_or_else(|| anyhow!("Transaction {} not found", id))?;
    let kind: TransactionKind = kind_raw
        .parse()
        .with_context(|| format!("Transaction {} has an unreadable kind", id))?;

    let amount = sub
        .get_one::<String>("amount")
        .map(|a| parse_positive_decimal(a))
        .transpose()?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| validate_category(kind, c))
        .transpose()?;
    let date = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;
    let note = sub
        .get_one::<String>("note")
        .map(|n| Some(n.trim()).filter(|s| !s.is_empty()));

    // every field is parsed; write them in one go
    let tx = conn.unchecked_transaction()?;
    let mut changed = 0;
    if let Some(amount) = amount {
        changed += tx.execute(
            "UPDATE transactions SET amount=?1 WHERE id=?2 AND owner_id=?3",
            params![amount.to_string(), id, owner_id],
        )?;
    }
    if let Some(category) = category {
        changed += tx.execute(
            "UPDATE transactions SET category=?1 WHERE id=?2 AND owner_id=?3",
            params![category, id, owner_id],
        )?;
    }
    if let Some(date) = date {
        changed += tx.execute(
            "UPDATE transactions SET date=?1 WHERE id=?2 AND owner_id=?3",
            params![date.to_string(), id, owner_id],
        )?;
    }
    if let Some(note) = note {
        changed += tx.execute(
            "UPDATE transactions SET note=?1 WHERE id=?2 AND owner_id=?3",
            params![note, id, owner_id],
        )?;
    }
    tx.commit()?;
    if changed == 0 {
        println!("Nothing to update for transaction {}", id);
    } else {
        println!("Updated transaction {}", id);
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}
