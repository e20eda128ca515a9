// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Duplicate active budgets: evaluation refuses these, so surface them
    let mut stmt = conn.prepare(
        "SELECT user_id, category, period, COUNT(*) FROM budgets
         WHERE active=1 GROUP BY user_id, category, period HAVING COUNT(*) > 1",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let user_id: i64 = r.get(0)?;
        let category: String = r.get(1)?;
        let period: String = r.get(2)?;
        let n: i64 = r.get(3)?;
        rows.push(vec![
            "ambiguous_budget".into(),
            format!("user {} '{}' {} ({} active rows)", user_id, category, period, n),
        ]);
    }

    // 2) Stored amounts that should have been rejected at construction
    let mut stmt2 =
        conn.prepare("SELECT id, amount FROM transactions WHERE CAST(amount AS REAL) <= 0")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount: String = r.get(1)?;
        rows.push(vec![
            "non_positive_amount".into(),
            format!("transaction {} amount '{}'", id, amount),
        ]);
    }

    // 3) Same for budget limits
    let mut stmt3 =
        conn.prepare("SELECT id, limit_amount FROM budgets WHERE CAST(limit_amount AS REAL) <= 0")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let limit: String = r.get(1)?;
        rows.push(vec![
            "non_positive_limit".into(),
            format!("budget {} limit '{}'", id, limit),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
