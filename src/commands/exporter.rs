// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::models::RecordSet;
use crate::utils::kind_arg;
use anyhow::{Context, Result, anyhow};
use serde::Serialize;

pub fn handle(set: &RecordSet, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(set, sub),
        _ => Ok(()),
    }
}

// Column order matches the CSV snapshot reader so exports load back in.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    kind: String,
    id: &'a str,
    date: String,
    amount: String,
    category: &'a str,
    note: &'a str,
}

fn export_records(set: &RecordSet, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let kind = kind_arg(sub)?;

    let mut records = aggregate::list(set, kind, None, None);
    records.reverse();
    let rows: Vec<ExportRow> = records
        .iter()
        .map(|r| ExportRow {
            kind: r.kind.to_string(),
            id: &r.id,
            date: r.date.to_string(),
            amount: r.amount.to_string(),
            category: &r.category,
            note: r.note.as_deref().unwrap_or_default(),
        })
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} {} record(s) to {}", rows.len(), kind, out);
    Ok(())
}
