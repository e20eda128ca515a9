// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, LedgerError, Period};
use rust_decimal::Decimal;
use serde::Serialize;

/// Snapshot of a would-be budget breach, carrying every figure a renderer
/// needs so nothing has to be recomputed downstream.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetEvaluation {
    pub budget_id: i64,
    pub category: String,
    pub period: Period,
    pub exceeded: bool,
    pub limit: Decimal,
    pub current_spent: Decimal,
    pub candidate_amount: Decimal,
    pub projected_total: Decimal,
    pub excess_amount: Decimal,
    pub percentage_of_limit: Decimal,
}

impl BudgetEvaluation {
    pub fn available(&self) -> Decimal {
        self.limit - self.current_spent
    }

    /// Human-actionable breach description shown before the caller decides
    /// whether to record the expense anyway.
    pub fn warning_text(&self) -> String {
        format!(
            "Recording this expense exceeds the '{}' budget for {}:\n\
             \x20 monthly limit:   {:.2}\n\
             \x20 spent so far:    {:.2}\n\
             \x20 available:       {:.2}\n\
             \x20 this expense:    {:.2}\n\
             \x20 projected total: {:.2} ({:.1}% of limit)\n\
             \x20 over by:         {:.2}",
            self.category,
            self.period,
            self.limit,
            self.current_spent,
            self.available(),
            self.candidate_amount,
            self.projected_total,
            self.percentage_of_limit,
            self.excess_amount,
        )
    }
}

/// Pick the single active budget for (category, period) out of a loaded
/// collection. Zero matches is `None` (budgets are opt-in); two or more is a
/// data-integrity error the evaluator refuses to resolve by guessing.
pub fn find_active<'a>(
    budgets: &'a [Budget],
    category: &str,
    period: Period,
) -> Result<Option<&'a Budget>, LedgerError> {
    let mut matches = budgets
        .iter()
        .filter(|b| b.active && b.period == period && b.category == category);
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        return Err(LedgerError::AmbiguousBudgetState {
            category: category.to_string(),
            period,
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Decide whether recording a prospective expense of `candidate_amount`
/// would push the category past its limit.
///
/// `current_spent` must cover the category's expenses for the budget period
/// *excluding* the candidate, which has not been persisted yet; evaluating
/// after persistence would double-count it.
///
/// Returns `Ok(None)` both when no budget applies and when the projected
/// total stays within the limit (strictly-greater breach policy), so callers
/// only ever see a value when there is something to warn about.
pub fn evaluate(
    budget: Option<&Budget>,
    current_spent: Decimal,
    candidate_amount: Decimal,
) -> Result<Option<BudgetEvaluation>, LedgerError> {
    let Some(budget) = budget else {
        return Ok(None);
    };
    if budget.limit_amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidBudget(format!(
            "limit must be positive, got {}",
            budget.limit_amount
        )));
    }

    let projected_total = current_spent + candidate_amount;
    if projected_total <= budget.limit_amount {
        return Ok(None);
    }

    Ok(Some(BudgetEvaluation {
        budget_id: budget.id,
        category: budget.category.clone(),
        period: budget.period,
        exceeded: true,
        limit: budget.limit_amount,
        current_spent,
        candidate_amount,
        projected_total,
        excess_amount: projected_total - budget.limit_amount,
        percentage_of_limit: projected_total / budget.limit_amount * Decimal::ONE_HUNDRED,
    }))
}
