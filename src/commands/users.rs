// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{pretty_table, set_current_user};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
            println!("Added user '{}'", name);
            // First user becomes the current one so commands work right away.
            let current: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key='current_user'",
                    [],
                    |r| r.get(0),
                )
                .optional()?;
            if current.is_none() {
                set_current_user(conn, name)?;
                println!("Switched to '{}'", name);
            }
        }
        Some(("list", _)) => {
            let current: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key='current_user'",
                    [],
                    |r| r.get(0),
                )
                .optional()?;
            let mut stmt = conn.prepare("SELECT name, created_at FROM users ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (name, created) = row?;
                let marker = if current.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    ""
                };
                data.push(vec![marker.to_string(), name, created]);
            }
            println!("{}", pretty_table(&["", "Name", "Created"], data));
        }
        Some(("switch", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            set_current_user(conn, name)?;
            println!("Switched to '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
