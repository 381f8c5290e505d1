// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::models::{Budget, Transaction, TransactionKind};
use finboard::stats::{HealthStatus, MonthKey, StatsError, compute_dashboard, compute_yearly};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: i64, kind: TransactionKind, amount: &str, category: &str, on: &str) -> Transaction {
    Transaction {
        id,
        owner_id: 1,
        kind,
        amount: d(amount),
        category: category.to_string(),
        occurred_on: date(on),
        note: None,
    }
}

fn budget(id: i64, category: &str, limit: &str, month: u32, year: i32) -> Budget {
    Budget {
        id,
        owner_id: 1,
        category: category.to_string(),
        limit: d(limit),
        month,
        year,
    }
}

use TransactionKind::{Expense, Income};

#[test]
fn dashboard_for_a_simple_month() {
    let txs = vec![
        tx(1, Income, "3000", "Salaire", "2024-03-01"),
        tx(2, Expense, "1200", "Logement", "2024-03-05"),
        tx(3, Expense, "300", "Nourriture", "2024-03-10"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap();

    assert_eq!(stats.monthly_income, d("3000.00"));
    assert_eq!(stats.monthly_expenses, d("1500.00"));
    assert_eq!(stats.balance, d("1500.00"));
    let cats: Vec<(&str, Decimal)> = stats
        .category_stats
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    assert_eq!(cats, vec![("Logement", d("1200")), ("Nourriture", d("300"))]);
    assert_eq!(stats.savings_rate, Some(d("50")));
    assert_eq!(stats.health_status, HealthStatus::Excellent);
    assert_eq!(stats.reference_month, "2024-03");
}

#[test]
fn empty_snapshot_is_all_zero_and_moderate() {
    let stats = compute_dashboard(&[], &[], date("2024-03-15")).unwrap();
    assert_eq!(stats.total_income, Decimal::ZERO);
    assert_eq!(stats.total_expenses, Decimal::ZERO);
    assert_eq!(stats.balance, Decimal::ZERO);
    assert_eq!(stats.monthly_income, Decimal::ZERO);
    assert_eq!(stats.monthly_expenses, Decimal::ZERO);
    assert!(stats.category_stats.is_empty());
    assert_eq!(stats.monthly_evolution.len(), 6);
    assert!(
        stats
            .monthly_evolution
            .iter()
            .all(|p| p.income.is_zero() && p.expenses.is_zero())
    );
    assert_eq!(stats.savings_rate, None);
    assert_eq!(stats.health_status, HealthStatus::Moderate);
}

#[test]
fn non_positive_amount_is_rejected() {
    let txs = vec![
        tx(1, Income, "3000", "Salaire", "2024-03-01"),
        tx(7, Expense, "0", "Logement", "2024-03-05"),
    ];
    let err = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap_err();
    assert!(matches!(err, StatsError::InvalidInput(ref m) if m.contains("transaction 7")));

    let txs = vec![tx(2, Expense, "-12.50", "Logement", "2024-03-05")];
    assert!(matches!(
        compute_dashboard(&txs, &[], date("2024-03-15")),
        Err(StatsError::InvalidInput(_))
    ));
}

#[test]
fn unknown_kind_string_is_invalid_input() {
    let err = "refund".parse::<TransactionKind>().unwrap_err();
    assert!(matches!(err, StatsError::InvalidInput(_)));
    assert_eq!(" Income ".parse::<TransactionKind>().unwrap(), Income);
}

#[test]
fn invalid_budget_is_rejected() {
    let err = compute_dashboard(&[], &[budget(1, "Loisirs", "-1", 3, 2024)], date("2024-03-15"))
        .unwrap_err();
    assert!(matches!(err, StatsError::InvalidInput(_)));
    assert!(
        compute_dashboard(&[], &[budget(2, "Loisirs", "10", 13, 2024)], date("2024-03-15"))
            .is_err()
    );
}

#[test]
fn category_stats_keep_first_seen_order_and_only_current_month() {
    let txs = vec![
        tx(1, Expense, "5", "Transport", "2024-02-28"),
        tx(2, Expense, "20", "Shopping", "2024-03-02"),
        tx(3, Expense, "10", "Loisirs", "2024-03-03"),
        tx(4, Expense, "30", "Shopping", "2024-03-20"),
        tx(5, Income, "99", "Autres", "2024-03-04"),
        tx(6, Expense, "7", "Transport", "2024-03-31"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-03-01")).unwrap();
    let names: Vec<&str> = stats
        .category_stats
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["Shopping", "Loisirs", "Transport"]);
    assert_eq!(stats.category_stats[0].amount, d("50"));
    assert_eq!(stats.monthly_expenses, d("67"));
}

#[test]
fn unknown_categories_are_kept_verbatim() {
    let txs = vec![tx(1, Expense, "12", "Vacances", "2024-03-02")];
    let stats = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap();
    assert_eq!(stats.category_stats.len(), 1);
    assert_eq!(stats.category_stats[0].category, "Vacances");
}

#[test]
fn evolution_is_chronological_and_wraps_the_year() {
    // inserted newest first to make sure the series does not follow input order
    let txs = vec![
        tx(1, Income, "100", "Salaire", "2024-02-10"),
        tx(2, Expense, "40", "Logement", "2024-01-05"),
        tx(3, Income, "80", "Salaire", "2023-09-01"),
        tx(4, Expense, "15", "Loisirs", "2023-08-31"),
        tx(5, Income, "1", "Autres", "2024-03-01"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-02-29")).unwrap();
    let labels: Vec<&str> = stats
        .monthly_evolution
        .iter()
        .map(|p| p.month.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
    );
    assert_eq!(stats.monthly_evolution[0].income, d("80"));
    assert_eq!(stats.monthly_evolution[4].expenses, d("40"));
    assert_eq!(stats.monthly_evolution[5].income, d("100"));
    // outside the window but still part of the totals
    assert_eq!(stats.total_income, d("181"));
    assert_eq!(stats.total_expenses, d("55"));
}

#[test]
fn health_uses_totals_not_the_month() {
    let txs = vec![
        tx(1, Income, "1000", "Salaire", "2024-01-01"),
        tx(2, Expense, "950", "Logement", "2024-03-01"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap();
    assert_eq!(stats.monthly_income, Decimal::ZERO);
    assert_eq!(stats.health_status, HealthStatus::Moderate);
}

#[test]
fn budget_usage_for_reference_month() {
    let txs = vec![
        tx(1, Expense, "80", "Nourriture", "2024-03-02"),
        tx(2, Expense, "45.50", "Nourriture", "2024-03-09"),
        tx(3, Expense, "500", "Nourriture", "2024-02-09"),
    ];
    let budgets = vec![
        budget(1, "Nourriture", "100", 3, 2024),
        budget(2, "Loisirs", "50", 3, 2024),
        budget(3, "Nourriture", "600", 2, 2024),
    ];
    let stats = compute_dashboard(&txs, &budgets, date("2024-03-15")).unwrap();
    assert_eq!(stats.budget_usage.len(), 2);
    let food = &stats.budget_usage[0];
    assert_eq!(food.spent, d("125.50"));
    assert_eq!(food.remaining, d("-25.50"));
    assert!(food.over_budget);
    let fun = &stats.budget_usage[1];
    assert_eq!(fun.spent, Decimal::ZERO);
    assert_eq!(fun.remaining, d("50"));
    assert!(!fun.over_budget);
}

#[test]
fn same_input_same_output() {
    let txs = vec![
        tx(1, Income, "2500.10", "Salaire", "2024-03-01"),
        tx(2, Expense, "99.99", "Santé", "2024-03-05"),
        tx(3, Expense, "10", "Éducation", "2023-12-05"),
    ];
    let budgets = vec![budget(1, "Santé", "150", 3, 2024)];
    let snapshot = txs.clone();
    let a = compute_dashboard(&txs, &budgets, date("2024-03-15")).unwrap();
    let b = compute_dashboard(&txs, &budgets, date("2024-03-15")).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(txs, snapshot);
}

#[test]
fn dashboard_serializes_for_the_wire() {
    let txs = vec![
        tx(1, Income, "3000", "Salaire", "2024-03-01"),
        tx(2, Expense, "1200", "Logement", "2024-03-05"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap();
    let v = serde_json::to_value(&stats).unwrap();
    assert_eq!(v["health_status"], "excellent");
    assert_eq!(v["monthly_evolution"].as_array().unwrap().len(), 6);
    assert_eq!(v["monthly_evolution"][5]["month"], "2024-03");
    assert_eq!(v["category_stats"][0]["category"], "Logement");
}

#[test]
fn month_keys() {
    let m = MonthKey::new(2024, 1);
    assert_eq!(m.prev(), MonthKey::new(2023, 12));
    assert_eq!(m.label(), "2024-01");
    let (first, last) = MonthKey::new(2024, 2).bounds().unwrap();
    assert_eq!(first, date("2024-02-01"));
    assert_eq!(last, date("2024-02-29"));
    let (_, dec_last) = MonthKey::new(2023, 12).bounds().unwrap();
    assert_eq!(dec_last, date("2023-12-31"));
}

#[test]
fn yearly_overview() {
    let txs = vec![
        tx(1, Income, "2000", "Salaire", "2024-01-31"),
        tx(2, Income, "500", "Business", "2024-06-15"),
        tx(3, Expense, "700", "Logement", "2024-01-02"),
        tx(4, Expense, "300", "Transport", "2024-06-20"),
        tx(5, Expense, "200", "Logement", "2024-12-01"),
        tx(6, Expense, "999", "Logement", "2023-12-31"),
    ];
    let y = compute_yearly(&txs, 2024).unwrap();
    assert_eq!(y.months.len(), 12);
    assert_eq!(y.months[0].month, "2024-01");
    assert_eq!(y.months[0].income, d("2000"));
    assert_eq!(y.months[5].expenses, d("300"));
    assert_eq!(y.months[11].expenses, d("200"));
    assert_eq!(y.total_income, d("2500"));
    assert_eq!(y.total_expenses, d("1200"));
    assert_eq!(y.savings, d("1300"));
    assert_eq!(y.health_status, HealthStatus::Excellent);
    let exp: Vec<(&str, Decimal)> = y
        .expense_categories
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    assert_eq!(exp, vec![("Logement", d("900")), ("Transport", d("300"))]);
    assert_eq!(y.income_categories.len(), 2);
}

#[test]
fn tiny_income_and_large_expense_do_not_overflow() {
    let txs = vec![
        tx(1, Income, "0.00000000000000000001", "Autres", "2024-03-01"),
        tx(2, Expense, "1000000000", "Logement", "2024-03-02"),
    ];
    let stats = compute_dashboard(&txs, &[], date("2024-03-15")).unwrap();
    assert_eq!(stats.health_status, HealthStatus::Critical);
    assert_eq!(stats.savings_rate, None);
}

#[test]
fn totals_beyond_decimal_range_are_invalid_input() {
    let max = Decimal::MAX.to_string();
    let txs = vec![
        tx(1, Income, &max, "Salaire", "2024-03-01"),
        tx(2, Income, &max, "Business", "2024-03-02"),
    ];
    assert!(matches!(
        compute_dashboard(&txs, &[], date("2024-03-15")),
        Err(StatsError::InvalidInput(_))
    ));
    assert!(compute_yearly(&txs, 2024).is_err());
}
