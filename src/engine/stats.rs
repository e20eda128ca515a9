// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Period, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Income and expense totals for one period, or for an arbitrary slice of
/// transactions when `period` is `None`. The net balance is always derived,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: Option<Period>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl PeriodSummary {
    pub fn empty(period: Option<Period>) -> Self {
        PeriodSummary {
            period,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
        }
    }

    pub fn net_balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    pub(crate) fn absorb(&mut self, kind: TransactionKind, amount: Decimal) {
        match kind {
            TransactionKind::Income => self.total_income += amount,
            TransactionKind::Expense => self.total_expense += amount,
        }
    }
}

/// Totals for the given month, or for all provided transactions when
/// `period` is `None`.
pub fn summarize(transactions: &[Transaction], period: Option<Period>) -> PeriodSummary {
    let mut summary = PeriodSummary::empty(period);
    for t in transactions {
        if period.is_some_and(|p| !p.contains(t.date)) {
            continue;
        }
        summary.absorb(t.kind, t.amount);
    }
    summary
}

/// Totals over an inclusive date range. Reports span arbitrary ranges, so
/// the resulting summary carries no single period.
pub fn summarize_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodSummary {
    let mut summary = PeriodSummary::empty(None);
    for t in transactions {
        if t.date < start || t.date > end {
            continue;
        }
        summary.absorb(t.kind, t.amount);
    }
    summary
}

/// Expense totals per category for the given month (or everything when
/// `period` is `None`), for proportional breakdowns.
pub fn category_expense_breakdown(
    transactions: &[Transaction],
    period: Option<Period>,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.kind != TransactionKind::Expense {
            continue;
        }
        if period.is_some_and(|p| !p.contains(t.date)) {
            continue;
        }
        *totals.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    totals
}

/// Each category's share of total expenses, in percent. A zero expense total
/// short-circuits every share to 0 instead of dividing by zero.
pub fn breakdown_percentages(breakdown: &BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
    let total: Decimal = breakdown.values().copied().sum();
    breakdown
        .iter()
        .map(|(category, amount)| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                amount / total * Decimal::ONE_HUNDRED
            };
            (category.clone(), share)
        })
        .collect()
}
