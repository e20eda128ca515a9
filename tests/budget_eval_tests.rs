// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally::engine::budget::{evaluate, find_active};
use tally::models::{Budget, LedgerError, Period, Transaction, TransactionKind};

fn period(s: &str) -> Period {
    s.parse().unwrap()
}

fn budget(id: i64, category: &str, p: &str, limit: &str) -> Budget {
    let mut b = Budget::new(1, category, period(p), limit.parse::<Decimal>().unwrap()).unwrap();
    b.id = id;
    b
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn exactly_at_limit_is_not_a_breach() {
    // Policy is strictly greater-than, not at-or-over
    let b = budget(1, "Food", "2024-03", "100");
    let result = evaluate(Some(&b), dec("80"), dec("20")).unwrap();
    assert!(result.is_none());
}

#[test]
fn one_cent_over_is_a_breach() {
    let b = budget(1, "Food", "2024-03", "100");
    let eval = evaluate(Some(&b), dec("80"), dec("20.01")).unwrap().unwrap();
    assert!(eval.exceeded);
    assert_eq!(eval.projected_total, dec("100.01"));
    assert_eq!(eval.excess_amount, dec("0.01"));
    assert_eq!(format!("{:.2}", eval.percentage_of_limit), "100.01");
    assert_eq!(eval.available(), dec("20"));
}

#[test]
fn no_budget_means_no_evaluation() {
    assert!(evaluate(None, dec("1000000"), dec("1000000")).unwrap().is_none());
}

#[test]
fn already_over_limit_before_candidate() {
    // Food: 50 + 40 spent, limit 80, new expense of 10
    let txs = vec![
        Transaction::new(
            1,
            "Food",
            TransactionKind::Expense,
            dec("50"),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            None,
        )
        .unwrap(),
        Transaction::new(
            1,
            "Food",
            TransactionKind::Expense,
            dec("40"),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            None,
        )
        .unwrap(),
        Transaction::new(
            1,
            "Salary",
            TransactionKind::Income,
            dec("1000"),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            None,
        )
        .unwrap(),
    ];
    let spent = tally::engine::aggregate::by_category(&txs, Some(TransactionKind::Expense))["Food"];
    assert_eq!(spent, dec("90"));

    let b = budget(1, "Food", "2024-03", "80");
    let eval = evaluate(Some(&b), spent, dec("10")).unwrap().unwrap();
    assert!(eval.exceeded);
    assert_eq!(eval.current_spent, dec("90"));
    assert_eq!(eval.projected_total, dec("100"));
    assert_eq!(eval.excess_amount, dec("20"));
}

#[test]
fn find_active_skips_inactive_and_other_periods() {
    let mut off = budget(1, "Food", "2024-03", "80");
    off.active = false;
    let budgets = vec![
        off,
        budget(2, "Food", "2024-04", "80"),
        budget(3, "Rent", "2024-03", "900"),
    ];
    assert!(find_active(&budgets, "Food", period("2024-03"))
        .unwrap()
        .is_none());
    let found = find_active(&budgets, "Rent", period("2024-03"))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, 3);
}

#[test]
fn duplicate_active_budgets_are_ambiguous() {
    let budgets = vec![
        budget(1, "Food", "2024-03", "80"),
        budget(2, "Food", "2024-03", "120"),
    ];
    let err = find_active(&budgets, "Food", period("2024-03")).unwrap_err();
    match err {
        LedgerError::AmbiguousBudgetState {
            category, count, ..
        } => {
            assert_eq!(category, "Food");
            assert_eq!(count, 2);
        }
        other => panic!("expected AmbiguousBudgetState, got {:?}", other),
    }
}

#[test]
fn non_positive_limit_is_rejected_not_divided_by() {
    assert!(matches!(
        Budget::new(1, "Food", period("2024-03"), Decimal::ZERO),
        Err(LedgerError::InvalidBudget(_))
    ));

    // A budget that arrives with a bad limit anyway gets a typed error
    let mut b = budget(1, "Food", "2024-03", "80");
    b.limit_amount = Decimal::ZERO;
    assert!(matches!(
        evaluate(Some(&b), dec("10"), dec("10")),
        Err(LedgerError::InvalidBudget(_))
    ));
}

#[test]
fn transaction_construction_enforces_invariants() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert!(matches!(
        Transaction::new(1, "Food", TransactionKind::Expense, Decimal::ZERO, date, None),
        Err(LedgerError::InvalidTransaction(_))
    ));
    assert!(matches!(
        Transaction::new(1, "Food", TransactionKind::Expense, dec("-5"), date, None),
        Err(LedgerError::InvalidTransaction(_))
    ));
    assert!(matches!(
        Transaction::new(1, "  ", TransactionKind::Expense, dec("5"), date, None),
        Err(LedgerError::InvalidTransaction(_))
    ));
    assert!(Transaction::new(1, "Food", TransactionKind::Expense, dec("0.01"), date, None).is_ok());
}

#[test]
fn warning_text_carries_every_figure() {
    let b = budget(7, "Food", "2024-03", "100");
    let eval = evaluate(Some(&b), dec("80"), dec("30")).unwrap().unwrap();
    let text = eval.warning_text();
    assert!(text.contains("'Food'"));
    assert!(text.contains("2024-03"));
    assert!(text.contains("100.00"));
    assert!(text.contains("80.00"));
    assert!(text.contains("110.00"));
    assert!(text.contains("10.00"));
}
