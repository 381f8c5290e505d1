// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::load_owners;
use crate::utils::{id_for_owner, pretty_table, set_setting, validate_email};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let email = validate_email(sub.get_one::<String>("email").unwrap())?;
            let name = sub
                .get_one::<String>("name")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            if id_for_owner(conn, &email).is_ok() {
                return Err(anyhow!("Email already registered: {}", email));
            }
            conn.execute(
                "INSERT INTO owners(email, full_name) VALUES (?1, ?2)",
                params![email, name],
            )?;
            tracing::info!(%email, "owner added");
            println!("Added owner '{}'", email);
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = load_owners(conn)?
                .into_iter()
                .map(|o| vec![o.email, o.full_name.unwrap_or_default(), o.created_at])
                .collect();
            println!("{}", pretty_table(&["Email", "Name", "Created"], data));
        }
        Some(("use", sub)) => {
            let email = validate_email(sub.get_one::<String>("email").unwrap())?;
            id_for_owner(conn, &email)?;
            set_setting(conn, "default_owner", &email)?;
            println!("Default owner is now '{}'", email);
        }
        _ => {}
    }
    Ok(())
}
