// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{aggregate, report as report_engine, stats};
use crate::models::Period;
use crate::utils::{
    current_user, fetch_transactions, fetch_transactions_in_range, maybe_print_json, parse_date,
    parse_period, pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("export", sub)) => export(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn period_arg(sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(s) => parse_period(s),
        None => Ok(Period::from_date(today())),
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;
    let period = period_arg(sub)?;

    let txs = fetch_transactions(conn, user_id, Some(period), None, None, None)?;
    let s = stats::summarize(&txs, Some(period));

    let doc = json!({
        "period": period.to_string(),
        "total_income": s.total_income,
        "total_expense": s.total_expense,
        "net_balance": s.net_balance(),
    });
    if !maybe_print_json(json_flag, jsonl_flag, &doc)? {
        let rows = vec![vec![
            period.to_string(),
            format!("{:.2}", s.total_income),
            format!("{:.2}", s.total_expense),
            format!("{:.2}", s.net_balance()),
        ]];
        println!(
            "{}",
            pretty_table(&["Period", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let (user_id, _) = current_user(conn)?;

    let txs = fetch_transactions(conn, user_id, None, None, None, None)?;
    let by_period = aggregate::by_period(&txs);

    let mut data = Vec::new();
    for (period, s) in by_period.iter().rev().take(months) {
        data.push(vec![
            period.to_string(),
            format!("{:.2}", s.total_income),
            format!("{:.2}", s.total_expense),
            format!("{:.2}", s.net_balance()),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;
    let period = period_arg(sub)?;

    let txs = fetch_transactions(conn, user_id, Some(period), None, None, None)?;
    let breakdown = stats::category_expense_breakdown(&txs, Some(period));
    let percentages = stats::breakdown_percentages(&breakdown);

    let mut items: Vec<_> = breakdown.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));

    let mut data = Vec::new();
    for (category, amount) in items {
        let pct = percentages[&category];
        data.push(vec![
            category,
            format!("{:.2}", amount),
            format!("{:.1}%", pct),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share"], data)
        );
    }
    Ok(())
}

/// Compile a report over a date range and hand it to a file renderer. The
/// engine's job ends at the Report value; csv/json writing is the renderer.
pub fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let (user_id, user_name) = current_user(conn)?;
    let txs = fetch_transactions_in_range(conn, user_id, from, to)?;
    let report = report_engine::compile(&user_name, from, to, &txs);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "category", "kind", "amount", "note"])?;
            for t in &report.transactions {
                wtr.write_record([
                    t.date.to_string(),
                    t.category.clone(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let doc = json!({
                "user": report.user,
                "start": report.start,
                "end": report.end,
                "summary": {
                    "total_income": report.summary.total_income,
                    "total_expense": report.summary.total_expense,
                    "net_balance": report.summary.net_balance(),
                },
                "category_breakdown": report.category_breakdown,
                "transactions": report.transactions,
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported report to {}", out);
    Ok(())
}
