// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::config::Settings;
use crate::ingest;
use crate::models::{RecordKind, RecordSet};

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `--today` if given, otherwise the local calendar date.
pub fn reference_date(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.get_one::<String>("today") {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn kind_arg(m: &clap::ArgMatches) -> Result<RecordKind> {
    match m.get_one::<String>("kind") {
        Some(s) => Ok(s.parse()?),
        None => Ok(RecordKind::Expense),
    }
}

pub fn snapshot_path(m: &clap::ArgMatches, settings: &Settings) -> Result<PathBuf> {
    m.get_one::<String>("data")
        .map(PathBuf::from)
        .or_else(|| settings.data_path.clone())
        .context("No snapshot given: pass --data <PATH> or run `fintrack config set data_path <PATH>`")
}

pub fn load_snapshot(m: &clap::ArgMatches, settings: &Settings) -> Result<RecordSet> {
    let path = snapshot_path(m, settings)?;
    ingest::load_path(&path).with_context(|| format!("Load snapshot {}", path.display()))
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
        // Arrays stream one element per line
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
