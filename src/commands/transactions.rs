// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::config::Settings;
use crate::format::format_currency;
use crate::models::{RecordKind, RecordSet};
use crate::utils::{kind_arg, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(set: &RecordSet, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(set, settings, sub)?;
    }
    Ok(())
}

fn list(set: &RecordSet, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_arg(sub)?;
    let data = query_rows(set, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    let style = settings.currency_style();
    let sign = match kind {
        RecordKind::Expense => "-",
        RecordKind::Income => "+",
    };
    let total: Decimal = data.iter().map(|r| r.amount).sum();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.category.clone(),
                format!("{}{}", sign, format_currency(&r.amount, &style)),
                r.note.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Note"], rows)
    );
    println!("Total: {}", format_currency(&total, &style));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

pub fn query_rows(set: &RecordSet, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let kind = kind_arg(sub)?;
    let category = sub.get_one::<String>("category").map(String::as_str);
    let limit = sub.get_one::<usize>("limit").copied();
    Ok(aggregate::list(set, kind, category, limit)
        .into_iter()
        .map(|r| TransactionRow {
            id: r.id.clone(),
            date: r.date.to_string(),
            category: r.category.clone(),
            amount: r.amount,
            note: r.note.clone().unwrap_or_default(),
        })
        .collect())
}
