// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::utils::{parse_date, parse_positive_decimal, resolve_owner, validate_category};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Reads the `kind,date,category,amount,note` layout written by `export`.
/// Any bad row aborts the whole import.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let owner_id = resolve_owner(conn, sub)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;
        let kind_raw = rec.get(0).context("kind missing")?.trim();
        let date_raw = rec.get(1).context("date missing")?.trim();
        let category_raw = rec.get(2).context("category missing")?.trim();
        let amount_raw = rec.get(3).context("amount missing")?.trim();
        let note = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let kind: TransactionKind = kind_raw
            .parse()
            .with_context(|| format!("Line {}: invalid kind", line))?;
        let date = parse_date(date_raw).with_context(|| format!("Line {}", line))?;
        let amount = parse_positive_decimal(amount_raw).with_context(|| format!("Line {}", line))?;
        let category =
            validate_category(kind, category_raw).with_context(|| format!("Line {}", line))?;

        tx.execute(
            "INSERT INTO transactions(owner_id, kind, amount, category, date, note)
             VALUES (?1,?2,?3,?4,?5,?6)",
            params![
                owner_id,
                kind.as_str(),
                amount.to_string(),
                category,
                date.to_string(),
                note
            ],
        )?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(count, path, "imported transactions");
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
