// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::stats::{self, PeriodSummary};
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// An immutable snapshot bundling summary figures and transaction detail
/// for an external renderer. A fresh Report is compiled per export request;
/// nothing in it is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub user: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: PeriodSummary,
    pub category_breakdown: BTreeMap<String, Decimal>,
    pub transactions: Vec<Transaction>,
}

/// Assemble a report over the inclusive date range. Transactions outside the
/// range are dropped; the rest are ordered date-descending with the row id
/// (descending) breaking ties, so two compilations of the same inputs come
/// out identical.
pub fn compile(
    user: &str,
    start: NaiveDate,
    end: NaiveDate,
    transactions: &[Transaction],
) -> Report {
    let mut in_range: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect();

    let summary = stats::summarize_range(&in_range, start, end);
    let category_breakdown = stats::category_expense_breakdown(&in_range, None);

    in_range.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Report {
        user: user.to_string(),
        start,
        end,
        summary,
        category_breakdown,
        transactions: in_range,
    }
}
