// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation failures produced by the ledger engine. All variants are pure
/// results of the inputs; the engine performs no I/O and never retries.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("invalid budget: {0}")]
    InvalidBudget(String),
    #[error("{count} active budgets for '{category}' in {period}; expected at most one")]
    AmbiguousBudgetState {
        category: String,
        period: Period,
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidTransaction(format!(
                "unknown kind '{}', expected INCOME or EXPENSE",
                other
            ))),
        }
    }
}

/// Calendar year+month, the budgeting granularity. Renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::InvalidBudget(format!(
                "invalid period {}-{}",
                year, month
            )));
        }
        Ok(Period { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // construction guarantees a real month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    pub fn last_day(&self) -> NaiveDate {
        let last = match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        };
        NaiveDate::from_ymd_opt(self.year, self.month, last).unwrap()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Period::from_date(date) == *self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").map_err(|_| {
            LedgerError::InvalidBudget(format!("invalid period '{}', expected YYYY-MM", s))
        })?;
        Ok(Period::from_date(date))
    }
}

impl From<Period> for String {
    fn from(p: Period) -> String {
        p.to_string()
    }
}

impl TryFrom<String> for Period {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single income or expense event. The sign is carried by `kind`; `amount`
/// is always strictly positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl Transaction {
    /// Build a not-yet-persisted record (`id = 0`). Rejects non-positive
    /// amounts and blank categories.
    pub fn new(
        user_id: i64,
        category: &str,
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidTransaction(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        if category.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "category must not be empty".into(),
            ));
        }
        Ok(Transaction {
            id: 0,
            user_id,
            category: category.to_string(),
            kind,
            amount,
            date,
            note,
        })
    }

    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}

/// A monthly spending limit for one category. Deactivation flips `active`;
/// rows are kept so past evaluations stay reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub period: Period,
    pub limit_amount: Decimal,
    pub active: bool,
}

impl Budget {
    pub fn new(
        user_id: i64,
        category: &str,
        period: Period,
        limit_amount: Decimal,
    ) -> Result<Self, LedgerError> {
        if limit_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidBudget(format!(
                "limit must be positive, got {}",
                limit_amount
            )));
        }
        if category.trim().is_empty() {
            return Err(LedgerError::InvalidBudget(
                "category must not be empty".into(),
            ));
        }
        Ok(Budget {
            id: 0,
            user_id,
            category: category.to_string(),
            period,
            limit_amount,
            active: true,
        })
    }
}

/// A persisted note that a budget was knowingly breached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub user_id: i64,
    pub budget_id: i64,
    pub message: String,
    pub date: NaiveDate,
    pub read: bool,
}
