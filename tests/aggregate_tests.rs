// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally::engine::aggregate;
use tally::models::{Transaction, TransactionKind};

fn tx(id: i64, kind: TransactionKind, category: &str, amount: &str, date: &str) -> Transaction {
    let mut t = Transaction::new(
        1,
        category,
        kind,
        amount.parse::<Decimal>().unwrap(),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        None,
    )
    .unwrap();
    t.id = id;
    t
}

#[test]
fn by_category_respects_kind_filter() {
    let txs = vec![
        tx(1, TransactionKind::Expense, "Food", "50", "2024-03-01"),
        tx(2, TransactionKind::Expense, "Food", "40", "2024-03-15"),
        tx(3, TransactionKind::Income, "Salary", "1000", "2024-03-01"),
        tx(4, TransactionKind::Expense, "Rent", "700", "2024-03-02"),
    ];
    let expenses = aggregate::by_category(&txs, Some(TransactionKind::Expense));
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses["Food"], Decimal::from(90));
    assert_eq!(expenses["Rent"], Decimal::from(700));
    // Income categories are absent, not present at zero
    assert!(!expenses.contains_key("Salary"));

    let all = aggregate::by_category(&txs, None);
    assert_eq!(all.len(), 3);
    assert_eq!(all["Salary"], Decimal::from(1000));
}

#[test]
fn by_category_is_case_sensitive() {
    let txs = vec![
        tx(1, TransactionKind::Expense, "Food", "10", "2024-03-01"),
        tx(2, TransactionKind::Expense, "food", "20", "2024-03-01"),
    ];
    let map = aggregate::by_category(&txs, None);
    assert_eq!(map.len(), 2);
    assert_eq!(map["Food"], Decimal::from(10));
    assert_eq!(map["food"], Decimal::from(20));
}

#[test]
fn by_category_empty_input_is_empty_map() {
    let map = aggregate::by_category(&[], Some(TransactionKind::Expense));
    assert!(map.is_empty());
}

#[test]
fn by_period_routes_kinds_and_truncates_dates() {
    let txs = vec![
        tx(1, TransactionKind::Expense, "Food", "50", "2024-03-01"),
        tx(2, TransactionKind::Income, "Salary", "1000", "2024-03-31"),
        tx(3, TransactionKind::Expense, "Food", "25", "2024-04-01"),
    ];
    let map = aggregate::by_period(&txs);
    assert_eq!(map.len(), 2);

    let march_key: tally::models::Period = "2024-03".parse().unwrap();
    let march = &map[&march_key];
    assert_eq!(march.total_income, Decimal::from(1000));
    assert_eq!(march.total_expense, Decimal::from(50));
    assert_eq!(march.net_balance(), Decimal::from(950));

    let april_key: tally::models::Period = "2024-04".parse().unwrap();
    let april = &map[&april_key];
    assert_eq!(april.total_income, Decimal::ZERO);
    assert_eq!(april.total_expense, Decimal::from(25));
    assert_eq!(april.net_balance(), Decimal::from(-25));
}

#[test]
fn by_period_is_idempotent() {
    let txs = vec![
        tx(1, TransactionKind::Expense, "Food", "12.34", "2024-03-01"),
        tx(2, TransactionKind::Income, "Salary", "99.99", "2024-05-20"),
    ];
    assert_eq!(aggregate::by_period(&txs), aggregate::by_period(&txs));
}
