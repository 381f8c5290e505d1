// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;
use finboard::commands::{doctor, reports};
use finboard::stats::{HealthStatus, StatsError};
use finboard::{cli, db};
use rust_decimal::Decimal;
use rusqlite::{Connection, params};

const OWNER: &str = "ana@example.com";

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO owners(email) VALUES (?1)", params![OWNER])
        .unwrap();
    let rows = [
        ("income", "3000", "Salaire", "2025-03-01"),
        ("expense", "1200", "Logement", "2025-03-05"),
        ("expense", "300", "Nourriture", "2025-03-10"),
        ("expense", "100", "Loisirs", "2025-01-20"),
        ("income", "50", "Autres", "2024-12-24"),
    ];
    for (kind, amount, category, date) in rows {
        conn.execute(
            "INSERT INTO transactions(owner_id, kind, amount, category, date)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![kind, amount, category, date],
        )
        .unwrap();
    }
    conn
}

fn report_matches(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["finboard", "report"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["--owner", OWNER]);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, leaf) = report_m.subcommand().unwrap();
    leaf.clone()
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn dashboard_from_the_store() {
    let conn = setup();
    let stats =
        reports::dashboard_stats(&conn, &report_matches(&["dashboard", "--as-of", "2025-03-15"]))
            .unwrap();
    assert_eq!(stats.total_income, d("3050"));
    assert_eq!(stats.total_expenses, d("1600"));
    assert_eq!(stats.balance, d("1450"));
    assert_eq!(stats.monthly_income, d("3000"));
    assert_eq!(stats.monthly_expenses, d("1500"));
    assert_eq!(stats.category_stats.len(), 2);
    assert_eq!(stats.monthly_evolution[0].month, "2024-10");
    assert_eq!(stats.monthly_evolution[2].income, d("50"));
    assert_eq!(stats.monthly_evolution[3].expenses, d("100"));
    assert_eq!(stats.health_status, HealthStatus::Excellent);
}

#[test]
fn reference_date_defaults_to_today() {
    let m = report_matches(&["dashboard"]);
    assert_eq!(
        reports::reference_date(&m).unwrap(),
        chrono::Local::now().date_naive()
    );
    let m = report_matches(&["dashboard", "--as-of", "not-a-date"]);
    assert!(reports::reference_date(&m).is_err());
}

#[test]
fn a_corrupt_row_fails_the_whole_dashboard() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(owner_id, kind, amount, category, date)
         VALUES (1, 'expense', '-20', 'Autres', '2025-03-02')",
        [],
    )
    .unwrap();
    let err =
        reports::dashboard_stats(&conn, &report_matches(&["dashboard", "--as-of", "2025-03-15"]))
            .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StatsError>(),
        Some(StatsError::InvalidInput(_))
    ));

    let issues = doctor::find_issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "non_positive_amount");
}

#[test]
fn doctor_reports_each_kind_of_problem() {
    let conn = setup();
    assert!(doctor::find_issues(&conn).unwrap().is_empty());
    conn.execute_batch(
        "INSERT INTO transactions(owner_id, kind, amount, category, date)
             VALUES (1, 'refund', '5', 'Autres', '2025-03-02');
         INSERT INTO transactions(owner_id, kind, amount, category, date)
             VALUES (1, 'expense', '5', 'Vacances', '2025-03-02');
         INSERT INTO transactions(owner_id, kind, amount, category, date)
             VALUES (1, 'income', '5', 'Salaire', '2025/03/02');
         INSERT INTO budgets(owner_id, category, amount, month, year)
             VALUES (1, 'Loisirs', '-1', 3, 2025);",
    )
    .unwrap();
    let kinds: Vec<String> = doctor::find_issues(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(
        kinds,
        vec!["invalid_kind", "unknown_category", "invalid_date", "invalid_budget"]
    );
}

#[test]
fn yearly_from_the_store() {
    let conn = setup();
    let y = reports::yearly_stats(&conn, &report_matches(&["yearly", "--year", "2025"])).unwrap();
    assert_eq!(y.year, 2025);
    assert_eq!(y.total_income, d("3000"));
    assert_eq!(y.total_expenses, d("1600"));
    assert_eq!(y.months[0].expenses, d("100"));
    assert_eq!(y.months[2].income, d("3000"));
    assert_eq!(y.savings_rate.map(|r| r.round_dp(2)), Some(d("46.67")));

    let empty = reports::yearly_stats(&conn, &report_matches(&["yearly", "--year", "2023"])).unwrap();
    assert_eq!(empty.health_status, HealthStatus::Moderate);
    assert!(empty.months.iter().all(|m| m.income.is_zero()));
}

#[test]
fn doctor_flags_budget_months_in_unchecked_tables() {
    // a budgets table created without the month CHECK
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE owners(id INTEGER PRIMARY KEY, email TEXT NOT NULL);
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY, owner_id INTEGER, kind TEXT, amount TEXT,
            category TEXT, date TEXT
        );
        CREATE TABLE budgets(
            id INTEGER PRIMARY KEY, owner_id INTEGER, category TEXT, amount TEXT,
            month INTEGER, year INTEGER
        );
        INSERT INTO owners(id, email) VALUES (1, 'ana@example.com');
        INSERT INTO budgets(owner_id, category, amount, month, year)
            VALUES (1, 'Loisirs', '50', 13, 2025), (1, 'Transport', '20', 4, 2025);
        "#,
    )
    .unwrap();
    let issues = doctor::find_issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "invalid_budget");
    assert!(issues[0][1].contains("month 13"));
}
