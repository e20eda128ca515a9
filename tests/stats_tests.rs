// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tally::engine::stats;
use tally::models::{Transaction, TransactionKind};

fn tx(kind: TransactionKind, category: &str, amount: &str, date: &str) -> Transaction {
    Transaction::new(
        1,
        category,
        kind,
        amount.parse::<Decimal>().unwrap(),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        None,
    )
    .unwrap()
}

#[test]
fn summarize_filters_to_period_first() {
    let txs = vec![
        tx(TransactionKind::Income, "Salary", "1000", "2024-03-01"),
        tx(TransactionKind::Expense, "Food", "90", "2024-03-15"),
        tx(TransactionKind::Expense, "Food", "500", "2024-04-01"),
    ];
    let s = stats::summarize(&txs, Some("2024-03".parse().unwrap()));
    assert_eq!(s.total_income, Decimal::from(1000));
    assert_eq!(s.total_expense, Decimal::from(90));
    assert_eq!(s.net_balance(), Decimal::from(910));
}

#[test]
fn summarize_without_period_takes_everything() {
    let txs = vec![
        tx(TransactionKind::Income, "Salary", "1000", "2024-03-01"),
        tx(TransactionKind::Expense, "Food", "90", "2024-04-15"),
    ];
    let s = stats::summarize(&txs, None);
    assert_eq!(s.total_income, Decimal::from(1000));
    assert_eq!(s.total_expense, Decimal::from(90));
}

#[test]
fn net_balance_is_always_income_minus_expense() {
    let cases = vec![
        ("1000", "90"),
        ("0.01", "99999.99"),
        ("500", "500"),
    ];
    for (income, expense) in cases {
        let txs = vec![
            tx(TransactionKind::Income, "Salary", income, "2024-03-01"),
            tx(TransactionKind::Expense, "Stuff", expense, "2024-03-02"),
        ];
        let s = stats::summarize(&txs, None);
        assert_eq!(s.net_balance(), s.total_income - s.total_expense);
    }
}

#[test]
fn summarize_range_is_inclusive_on_both_ends() {
    let txs = vec![
        tx(TransactionKind::Expense, "Food", "10", "2024-03-01"),
        tx(TransactionKind::Expense, "Food", "20", "2024-03-31"),
        tx(TransactionKind::Expense, "Food", "40", "2024-04-01"),
    ];
    let s = stats::summarize_range(
        &txs,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    );
    assert_eq!(s.total_expense, Decimal::from(30));
}

#[test]
fn breakdown_is_expenses_only() {
    let txs = vec![
        tx(TransactionKind::Expense, "Food", "90", "2024-03-15"),
        tx(TransactionKind::Expense, "Rent", "700", "2024-03-01"),
        tx(TransactionKind::Income, "Salary", "1000", "2024-03-01"),
    ];
    let breakdown = stats::category_expense_breakdown(&txs, Some("2024-03".parse().unwrap()));
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown["Food"], Decimal::from(90));
    assert_eq!(breakdown["Rent"], Decimal::from(700));
}

#[test]
fn percentages_sum_out_of_total_expenses() {
    let txs = vec![
        tx(TransactionKind::Expense, "Food", "25", "2024-03-15"),
        tx(TransactionKind::Expense, "Rent", "75", "2024-03-01"),
    ];
    let breakdown = stats::category_expense_breakdown(&txs, None);
    let pct = stats::breakdown_percentages(&breakdown);
    assert_eq!(pct["Food"], Decimal::from(25));
    assert_eq!(pct["Rent"], Decimal::from(75));
}

#[test]
fn zero_total_short_circuits_percentages_to_zero() {
    // Never a divide-by-zero, even for a hand-built all-zero breakdown
    let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    breakdown.insert("Food".into(), Decimal::ZERO);
    breakdown.insert("Rent".into(), Decimal::ZERO);
    let pct = stats::breakdown_percentages(&breakdown);
    assert_eq!(pct["Food"], Decimal::ZERO);
    assert_eq!(pct["Rent"], Decimal::ZERO);
}

#[test]
fn no_expenses_yields_empty_breakdown() {
    let txs = vec![tx(TransactionKind::Income, "Salary", "1000", "2024-03-01")];
    let breakdown = stats::category_expense_breakdown(&txs, None);
    assert!(breakdown.is_empty());
    assert!(stats::breakdown_percentages(&breakdown).is_empty());
}
