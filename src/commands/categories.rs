// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{current_user, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

// Categories are an open vocabulary carried on transactions and budgets;
// there is no table of their own, so listing means listing what's in use.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let (user_id, _) = current_user(conn)?;
            let mut stmt = conn.prepare(
                "SELECT category, SUM(n) FROM (
                    SELECT category, COUNT(*) AS n FROM transactions WHERE user_id=?1 GROUP BY category
                    UNION ALL
                    SELECT DISTINCT category, 0 FROM budgets WHERE user_id=?1
                 ) GROUP BY category ORDER BY category",
            )?;
            let rows = stmt.query_map(params![user_id], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (cat, n) = row?;
                data.push(vec![cat, n.to_string()]);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!("{}", pretty_table(&["Category", "Transactions"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
