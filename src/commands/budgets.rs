// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::stats;
use crate::models::{Budget, LedgerError, TransactionKind};
use crate::utils::{
    current_user, fetch_budgets, fetch_transactions, maybe_print_json, parse_decimal,
    parse_period, pretty_table, today,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("off", sub)) => off(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (user_id, _) = current_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap();
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;

    let budget = Budget::new(user_id, category, period, limit)?;

    let mut stmt = conn.prepare(
        "SELECT id FROM budgets WHERE user_id=?1 AND category=?2 AND period=?3 AND active=1",
    )?;
    let ids: Vec<i64> = stmt
        .query_map(
            params![user_id, budget.category, budget.period.to_string()],
            |r| r.get(0),
        )?
        .collect::<Result<_, _>>()?;

    match ids.as_slice() {
        [] => {
            conn.execute(
                "INSERT INTO budgets(user_id, category, period, limit_amount, active)
                 VALUES (?1, ?2, ?3, ?4, 1)",
                params![
                    user_id,
                    budget.category,
                    budget.period.to_string(),
                    budget.limit_amount.to_string()
                ],
            )?;
        }
        [id] => {
            conn.execute(
                "UPDATE budgets SET limit_amount=?1 WHERE id=?2",
                params![budget.limit_amount.to_string(), id],
            )?;
        }
        many => {
            return Err(LedgerError::AmbiguousBudgetState {
                category: budget.category,
                period: budget.period,
                count: many.len(),
            }
            .into());
        }
    }
    println!(
        "Budget set for {} / {} = {:.2}",
        period, category, budget.limit_amount
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;
    let period = match sub.get_one::<String>("period") {
        Some(s) => Some(parse_period(s)?),
        None => None,
    };
    let budgets = fetch_budgets(conn, user_id, period, sub.get_flag("all"))?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.period.to_string(),
                    b.category.clone(),
                    format!("{:.2}", b.limit_amount),
                    if b.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Period", "Category", "Limit", "Active"], rows)
        );
    }
    Ok(())
}

fn off(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (user_id, _) = current_user(conn)?;
    let category = sub.get_one::<String>("category").unwrap();
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;
    let n = conn.execute(
        "UPDATE budgets SET active=0 WHERE user_id=?1 AND category=?2 AND period=?3 AND active=1",
        params![user_id, category, period.to_string()],
    )?;
    if n == 0 {
        println!("No active budget for {} / {}", period, category);
    } else {
        println!("Deactivated budget for {} / {}", period, category);
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (user_id, _) = current_user(conn)?;
    let n = conn.execute(
        "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        println!("No budget #{}", id);
    } else {
        println!("Removed budget #{}", id);
    }
    Ok(())
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;
    let period = match sub.get_one::<String>("period") {
        Some(s) => parse_period(s)?,
        None => crate::models::Period::from_date(today()),
    };

    let budgets = fetch_budgets(conn, user_id, Some(period), false)?;
    let txs = fetch_transactions(
        conn,
        user_id,
        Some(period),
        None,
        Some(TransactionKind::Expense),
        None,
    )?;
    let spent_by_category = stats::category_expense_breakdown(&txs, Some(period));

    let mut data = Vec::new();
    for b in &budgets {
        let spent = spent_by_category
            .get(&b.category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let remaining = b.limit_amount - spent;
        let status = if spent > b.limit_amount { "OVER" } else { "ok" };
        data.push(vec![
            b.category.clone(),
            format!("{:.2}", b.limit_amount),
            format!("{:.2}", spent),
            format!("{:.2}", remaining),
            status.to_string(),
        ]);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Status"],
                data
            )
        );
    }
    Ok(())
}
