// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, save_to};
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, settings: &mut Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            settings.set(key, value)?;
            save_to(path, settings)?;
            println!("Set {} = {}", key, value);
        }
        _ => {
            let rows = vec![
                vec!["currency".into(), settings.currency.clone()],
                vec!["locale".into(), settings.locale.clone()],
                vec!["recent_limit".into(), settings.recent_limit.to_string()],
                vec![
                    "data_path".into(),
                    settings
                        .data_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                ],
                vec!["file".into(), path.display().to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
    }
    Ok(())
}
