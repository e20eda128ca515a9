// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{aggregate, budget as budget_eval};
use crate::models::{Transaction, TransactionKind};
use crate::utils::{
    current_user, fetch_budgets, fetch_transaction, fetch_transactions, maybe_print_json,
    parse_date, parse_decimal, pretty_table, today,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (user_id, _) = current_user(conn)?;
    let kind: TransactionKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let tx = Transaction::new(user_id, category, kind, amount, date, note)?;

    // Evaluate against the budget before the row exists, so the spend total
    // never double-counts the candidate.
    if tx.kind == TransactionKind::Expense {
        let period = tx.period();
        let budgets = fetch_budgets(conn, user_id, Some(period), false)?;
        let active = budget_eval::find_active(&budgets, &tx.category, period)?;
        let existing = fetch_transactions(
            conn,
            user_id,
            Some(period),
            Some(&tx.category),
            Some(TransactionKind::Expense),
            None,
        )?;
        let current_spent = aggregate::by_category(&existing, Some(TransactionKind::Expense))
            .remove(&tx.category)
            .unwrap_or(Decimal::ZERO);

        if let Some(eval) = budget_eval::evaluate(active, current_spent, tx.amount)? {
            println!("{}", eval.warning_text());
            if !sub.get_flag("yes") {
                println!("Not recorded. Pass --yes to record anyway.");
                return Ok(());
            }
            let id = insert(conn, &tx)?;
            record_alert(conn, user_id, &eval)?;
            println!(
                "Recorded #{}: {} {:.2} in '{}' on {} (over budget)",
                id, tx.kind, tx.amount, tx.category, tx.date
            );
            return Ok(());
        }
    }

    let id = insert(conn, &tx)?;
    println!(
        "Recorded #{}: {} {:.2} in '{}' on {}",
        id, tx.kind, tx.amount, tx.category, tx.date
    );
    Ok(())
}

fn insert(conn: &Connection, t: &Transaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, date, category, kind, amount, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.user_id,
            t.date.to_string(),
            t.category,
            t.kind.as_str(),
            t.amount.to_string(),
            t.note
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn record_alert(
    conn: &Connection,
    user_id: i64,
    eval: &budget_eval::BudgetEvaluation,
) -> Result<()> {
    let message = format!(
        "Budget '{}' for {} exceeded: {:.2} of {:.2} ({:.1}% of limit)",
        eval.category, eval.period, eval.projected_total, eval.limit, eval.percentage_of_limit
    );
    conn.execute(
        "INSERT INTO alerts(user_id, budget_id, message, date) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, eval.budget_id, message, today().to_string()],
    )?;
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;
    let period = match sub.get_one::<String>("month") {
        Some(s) => Some(crate::utils::parse_period(s)?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let kind = match sub.get_one::<String>("kind") {
        Some(s) => Some(s.parse::<TransactionKind>()?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied();

    let txs = fetch_transactions(conn, user_id, period, category, kind, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &txs)? {
        let rows: Vec<Vec<String>> = txs
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    format!("{:.2}", t.amount),
                    t.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Kind", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

// Edits are deliberately not re-checked against the budget; only new
// expenses go through the evaluator.
fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (user_id, _) = current_user(conn)?;
    let existing = fetch_transaction(conn, user_id, id)?;

    let kind = match sub.get_one::<String>("kind") {
        Some(s) => s.parse::<TransactionKind>()?,
        None => existing.kind,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.as_str())
        .unwrap_or(&existing.category);
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => existing.amount,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => existing.date,
    };
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.to_string())
        .or(existing.note.clone());

    // Revalidate the merged record the same way `add` does.
    let updated = Transaction::new(user_id, category, kind, amount, date, note)?;

    conn.execute(
        "UPDATE transactions SET date=?1, category=?2, kind=?3, amount=?4, note=?5
         WHERE id=?6 AND user_id=?7",
        params![
            updated.date.to_string(),
            updated.category,
            updated.kind.as_str(),
            updated.amount.to_string(),
            updated.note,
            id,
            user_id
        ],
    )?;
    println!("Updated #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (user_id, _) = current_user(conn)?;
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        println!("No transaction #{}", id);
    } else {
        println!("Removed #{}", id);
    }
    Ok(())
}
