// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::format::{CurrencyStyle, format_currency, format_percentage};
use crate::models::RecordSet;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(set: &RecordSet, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(set, settings, sub)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EmiRow {
    pub id: String,
    pub title: String,
    pub monthly_amount: Decimal,
    pub paid_months: u32,
    pub total_months: u32,
    pub progress: String,
    pub remaining_amount: Decimal,
    pub active: bool,
}

/// Plans ordered by start date, newest first.
pub fn rows(set: &RecordSet, active_only: bool) -> Vec<EmiRow> {
    let mut emis: Vec<_> = set
        .emis
        .iter()
        .filter(|e| !active_only || e.is_active())
        .collect();
    emis.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| a.id.cmp(&b.id)));
    emis.into_iter()
        .map(|e| EmiRow {
            id: e.id.clone(),
            title: e.title.clone(),
            monthly_amount: e.monthly_amount,
            paid_months: e.paid_months,
            total_months: e.total_months,
            progress: format_percentage(&(e.progress() * Decimal::ONE_HUNDRED)),
            remaining_amount: e.remaining_amount(),
            active: e.is_active(),
        })
        .collect()
}

pub fn empty_message(active_only: bool) -> &'static str {
    if active_only { "No active EMIs." } else { "No EMIs." }
}

fn list(set: &RecordSet, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let active_only = sub.get_flag("active");
    let data = rows(set, active_only);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("{}", empty_message(active_only));
        return Ok(());
    }
    let style: CurrencyStyle = settings.currency_style();
    let table = data
        .iter()
        .map(|e| {
            vec![
                e.title.clone(),
                format!("{}/mo", format_currency(&e.monthly_amount, &style)),
                format!("{} / {} Paid", e.paid_months, e.total_months),
                e.progress.clone(),
                format_currency(&e.remaining_amount, &style),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["EMI", "Installment", "Paid", "Progress", "Remaining"], table)
    );
    Ok(())
}
