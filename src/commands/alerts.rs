// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Alert;
use crate::utils::{current_user, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("read", sub)) => mark_read(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (user_id, _) = current_user(conn)?;

    let mut sql = String::from(
        "SELECT id, user_id, budget_id, message, date, read FROM alerts WHERE user_id=?1",
    );
    if sub.get_flag("unread") {
        sql.push_str(" AND read=0");
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![user_id])?;
    let mut alerts = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(4)?;
        alerts.push(Alert {
            id: r.get(0)?,
            user_id: r.get(1)?,
            budget_id: r.get(2)?,
            message: r.get(3)?,
            date: parse_date(&date_s)?,
            read: r.get::<_, i64>(5)? != 0,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &alerts)? {
        let data: Vec<Vec<String>> = alerts
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.date.to_string(),
                    if a.read { "yes" } else { "no" }.to_string(),
                    a.message.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Date", "Read", "Message"], data));
    }
    Ok(())
}

fn mark_read(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let (user_id, _) = current_user(conn)?;
    let n = conn.execute(
        "UPDATE alerts SET read=1 WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        println!("No alert #{}", id);
    } else {
        println!("Marked alert #{} as read", id);
    }
    Ok(())
}
