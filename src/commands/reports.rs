// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::stats::{DashboardStats, YearlyStats, compute_dashboard, compute_yearly};
use crate::store::{load_budgets, load_transactions};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, pretty_table, resolve_owner};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(conn, sub)?,
        Some(("yearly", sub)) => yearly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// `--as-of` if given, otherwise today's local date.
pub fn reference_date(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn dashboard_stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<DashboardStats> {
    let owner_id = resolve_owner(conn, sub)?;
    let reference = reference_date(sub)?;
    let transactions = load_transactions(conn, owner_id, None, None)?;
    let budgets = load_budgets(conn, owner_id)?;
    let stats = compute_dashboard(&transactions, &budgets, reference)
        .with_context(|| format!("Cannot build dashboard for {}", reference))?;
    Ok(stats)
}

fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let stats = dashboard_stats(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    let ccy = get_currency(conn)?;
    let rate = stats
        .savings_rate
        .map(|r| format!("{:.1}%", r))
        .unwrap_or_else(|| "n/a".to_string());
    let summary = vec![
        vec!["Balance".into(), fmt_money(&stats.balance, &ccy)],
        vec!["Total income".into(), fmt_money(&stats.total_income, &ccy)],
        vec!["Total expenses".into(), fmt_money(&stats.total_expenses, &ccy)],
        vec![
            format!("Income ({})", stats.reference_month),
            fmt_money(&stats.monthly_income, &ccy),
        ],
        vec![
            format!("Expenses ({})", stats.reference_month),
            fmt_money(&stats.monthly_expenses, &ccy),
        ],
        vec!["Savings rate".into(), rate],
        vec!["Health".into(), stats.health_status.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], summary));

    let cats = stats
        .category_stats
        .iter()
        .map(|c| vec![c.category.clone(), format!("{:.2}", c.amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], cats));

    let evo = stats
        .monthly_evolution
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                format!("{:.2}", p.income),
                format!("{:.2}", p.expenses),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], evo));
    Ok(())
}

pub fn yearly_stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<YearlyStats> {
    let owner_id = resolve_owner(conn, sub)?;
    let year = *sub.get_one::<i32>("year").unwrap();
    let from = NaiveDate::from_ymd_opt(year, 1, 1).context("Year out of range")?;
    let to = NaiveDate::from_ymd_opt(year, 12, 31).context("Year out of range")?;
    let transactions = load_transactions(conn, owner_id, Some(from), Some(to))?;
    let stats = compute_yearly(&transactions, year)
        .with_context(|| format!("Cannot build statistics for {}", year))?;
    Ok(stats)
}

fn yearly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let stats = yearly_stats(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    let months = stats
        .months
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                format!("{:.2}", p.income),
                format!("{:.2}", p.expenses),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], months));

    let mut cats = Vec::new();
    for c in &stats.income_categories {
        cats.push(vec!["income".into(), c.category.clone(), format!("{:.2}", c.amount)]);
    }
    for c in &stats.expense_categories {
        cats.push(vec!["expense".into(), c.category.clone(), format!("{:.2}", c.amount)]);
    }
    println!("{}", pretty_table(&["Kind", "Category", "Amount"], cats));

    let ccy = get_currency(conn)?;
    println!(
        "Savings {}: {} ({}) - {}",
        stats.year,
        fmt_money(&stats.savings, &ccy),
        stats
            .savings_rate
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "n/a".to_string()),
        stats.health_status
    );
    Ok(())
}
