// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::TransactionKind;
use crate::stats::MonthKey;

pub const DEFAULT_CURRENCY: &str = "EUR";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<MonthKey> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(MonthKey::of(d))
}

pub fn parse_month_number(s: &str) -> Result<u32> {
    let m: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid month '{}', expected 1-12", s))?;
    if !(1..=12).contains(&m) {
        return Err(anyhow!("Invalid month {}, expected 1-12", m));
    }
    Ok(m)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_positive_decimal(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than zero, got {}", d));
    }
    Ok(d)
}

pub fn parse_non_negative_decimal(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        return Err(anyhow!("Amount must not be negative, got {}", d));
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d.round_dp(2), ccy)
}

pub fn validate_email(email: &str) -> Result<String> {
    let e = email.trim().to_lowercase();
    let re = Regex::new(EMAIL_PATTERN)?;
    if !re.is_match(&e) {
        return Err(anyhow!("Invalid email address '{}'", email.trim()));
    }
    Ok(e)
}

/// Returns the canonical spelling of `category` for `kind`.
pub fn validate_category(kind: TransactionKind, category: &str) -> Result<String> {
    let wanted = category.trim();
    kind.categories()
        .iter()
        .find(|c| c.to_lowercase() == wanted.to_lowercase())
        .map(|c| c.to_string())
        .ok_or_else(|| {
            anyhow!(
                "Unknown {} category '{}' (use one of: {})",
                kind,
                wanted,
                kind.categories().join(", ")
            )
        })
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_owner(conn: &Connection, email: &str) -> Result<i64> {
    let email = email.trim().to_lowercase();
    let mut stmt = conn.prepare("SELECT id FROM owners WHERE email=?1")?;
    let id: i64 = stmt
        .query_row(params![email], |r| r.get(0))
        .with_context(|| format!("Owner '{}' not found", email))?;
    Ok(id)
}

/// The owner named on the command line, else the `default_owner` setting.
pub fn resolve_owner(conn: &Connection, m: &clap::ArgMatches) -> Result<i64> {
    if let Some(email) = m.get_one::<String>("owner") {
        return id_for_owner(conn, email);
    }
    let default = get_setting(conn, "default_owner")?.context(
        "No owner selected; pass --owner <email> or run `finboard owner use --email <email>`",
    )?;
    id_for_owner(conn, &default)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
