// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::store::load_transactions;
use crate::utils::resolve_owner;
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub const HEADERS: [&str; 5] = ["kind", "date", "category", "amount", "note"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let owner_id = resolve_owner(conn, sub)?;
    let all = load_transactions(conn, owner_id, None, None)?;
    // incomes first, then expenses, each by date
    let ordered: Vec<_> = [TransactionKind::Income, TransactionKind::Expense]
        .iter()
        .flat_map(|k| all.iter().filter(move |t| t.kind == *k))
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(HEADERS)?;
            for t in &ordered {
                wtr.write_record([
                    t.kind.as_str().to_string(),
                    t.occurred_on.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = ordered
                .iter()
                .map(|t| {
                    json!({
                        "kind": t.kind, "date": t.occurred_on, "category": t.category,
                        "amount": t.amount.to_string(), "note": t.note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    tracing::info!(count = ordered.len(), %fmt, "exported transactions");
    println!("Exported {} transactions to {}", ordered.len(), out);
    Ok(())
}
