// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kinds = match sub.get_one::<String>("kind") {
            Some(k) => vec![k.parse::<TransactionKind>()?],
            None => vec![TransactionKind::Income, TransactionKind::Expense],
        };
        println!("{}", pretty_table(&["Kind", "Category"], rows(&kinds)));
    }
    Ok(())
}

pub fn rows(kinds: &[TransactionKind]) -> Vec<Vec<String>> {
    kinds
        .iter()
        .flat_map(|k| {
            k.categories()
                .iter()
                .map(move |c| vec![k.to_string(), c.to_string()])
        })
        .collect()
}
