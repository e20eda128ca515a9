// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::stats::PeriodSummary;
use crate::models::{Period, Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum amounts per category. Only transactions matching `kind` contribute
/// (pass `None` to take everything); categories with no matching rows are
/// absent from the map rather than present at zero. Empty input yields an
/// empty map.
pub fn by_category(
    transactions: &[Transaction],
    kind: Option<TransactionKind>,
) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if let Some(k) = kind {
            if t.kind != k {
                continue;
            }
        }
        *totals.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    totals
}

/// Group transactions into per-month summaries. The period key is the
/// transaction date truncated to year-month; `kind` routes each amount to
/// the income or expense column.
pub fn by_period(transactions: &[Transaction]) -> BTreeMap<Period, PeriodSummary> {
    let mut map: BTreeMap<Period, PeriodSummary> = BTreeMap::new();
    for t in transactions {
        let period = t.period();
        let entry = map
            .entry(period)
            .or_insert_with(|| PeriodSummary::empty(Some(period)));
        entry.absorb(t.kind, t.amount);
    }
    map
}
