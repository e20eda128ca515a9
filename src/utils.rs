// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Budget, Period, Transaction, TransactionKind};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_period(s: &str) -> Result<Period> {
    s.parse::<Period>()
        .with_context(|| format!("Invalid period '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_user(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("User '{}' not found", name))?;
    Ok(id)
}

/// The user every command operates on, tracked in settings so the engine
/// itself never reaches for ambient session state.
pub fn current_user(conn: &Connection) -> Result<(i64, String)> {
    let name: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='current_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let name = name.context("No current user; run 'tally user switch <name>'")?;
    let id = id_for_user(conn, &name)?;
    Ok((id, name))
}

pub fn set_current_user(conn: &Connection, name: &str) -> Result<()> {
    id_for_user(conn, name)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('current_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![name],
    )?;
    Ok(())
}

fn tx_from_row(row: &rusqlite::Row<'_>) -> Result<Transaction> {
    let id: i64 = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let date_s: String = row.get(2)?;
    let category: String = row.get(3)?;
    let kind_s: String = row.get(4)?;
    let amount_s: String = row.get(5)?;
    let note: Option<String> = row.get(6)?;

    let date = parse_date(&date_s).with_context(|| format!("transaction {}", id))?;
    let kind: TransactionKind = kind_s
        .parse()
        .with_context(|| format!("transaction {}", id))?;
    let amount = amount_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' on transaction {}", amount_s, id))?;

    Ok(Transaction {
        id,
        user_id,
        category,
        kind,
        amount,
        date,
        note,
    })
}

/// Load a user's transactions, newest first (date desc, id desc). Filters
/// are optional; the engine gets whatever slice the caller asked for.
pub fn fetch_transactions(
    conn: &Connection,
    user_id: i64,
    period: Option<Period>,
    category: Option<&str>,
    kind: Option<TransactionKind>,
    limit: Option<usize>,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, user_id, date, category, kind, amount, note FROM transactions WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];

    if let Some(p) = period {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(p.to_string());
    }
    if let Some(cat) = category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    if let Some(k) = kind {
        sql.push_str(" AND kind=?");
        params_vec.push(k.as_str().into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(tx_from_row(r)?);
    }
    Ok(data)
}

pub fn fetch_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, category, kind, amount, note FROM transactions
         WHERE id=?1 AND user_id=?2",
    )?;
    let mut rows = stmt.query(params![id, user_id])?;
    let row = rows
        .next()?
        .with_context(|| format!("Transaction {} not found", id))?;
    tx_from_row(row)
}

pub fn fetch_transactions_in_range(
    conn: &Connection,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, date, category, kind, amount, note FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id, start.to_string(), end.to_string()])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(tx_from_row(r)?);
    }
    Ok(data)
}

pub fn fetch_budgets(
    conn: &Connection,
    user_id: i64,
    period: Option<Period>,
    include_inactive: bool,
) -> Result<Vec<Budget>> {
    let mut sql = String::from(
        "SELECT id, user_id, category, period, limit_amount, active FROM budgets WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user_id.to_string()];
    if let Some(p) = period {
        sql.push_str(" AND period=?");
        params_vec.push(p.to_string());
    }
    if !include_inactive {
        sql.push_str(" AND active=1");
    }
    sql.push_str(" ORDER BY period DESC, category, id");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let period_s: String = r.get(3)?;
        let limit_s: String = r.get(4)?;
        data.push(Budget {
            id,
            user_id: r.get(1)?,
            category: r.get(2)?,
            period: parse_period(&period_s).with_context(|| format!("budget {}", id))?,
            limit_amount: limit_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid limit '{}' on budget {}", limit_s, id))?,
            active: r.get::<_, i64>(5)? != 0,
        });
    }
    Ok(data)
}
