// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, MonthlyTotal, PeriodSummary};
use crate::config::Settings;
use crate::format::{format_currency, format_percentage};
use crate::models::RecordSet;
use crate::period::PeriodTag;
use crate::utils::{kind_arg, maybe_print_json, pretty_table, reference_date};
use anyhow::Result;

pub fn handle(set: &RecordSet, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(set, settings, sub)?,
        Some(("monthly", sub)) => monthly(set, settings, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn build_summary(set: &RecordSet, sub: &clap::ArgMatches) -> Result<PeriodSummary> {
    let today = reference_date(sub)?;
    let kind = kind_arg(sub)?;
    let period = PeriodTag::resolve_or_default(sub.get_one::<String>("period").map(String::as_str));
    let category = sub.get_one::<String>("category").map(String::as_str);
    Ok(aggregate::summarize_period(set, kind, period, today, category))
}

fn summary(set: &RecordSet, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let s = build_summary(set, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let style = settings.currency_style();
    let stats = vec![
        vec!["Period".into(), format!("{} .. {}", s.range.start, s.range.end)],
        vec!["Kind".into(), s.kind.to_string()],
        vec!["Total".into(), format_currency(&s.total_amount, &style)],
        vec!["Transactions".into(), s.transaction_count.to_string()],
        vec!["Average / day".into(), format_currency(&s.average_daily, &style)],
        vec![
            "Top category".into(),
            s.top_category.clone().unwrap_or_else(|| "-".into()),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], stats));

    let rows: Vec<Vec<String>> = s
        .category_breakdown
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                format_currency(&c.amount, &style),
                format_percentage(&c.percentage),
            ]
        })
        .collect();
    if rows.is_empty() {
        println!("No data");
    } else {
        println!("{}", pretty_table(&["Category", "Amount", "Share"], rows));
    }
    if s.skipped > 0 {
        println!("{} document(s) skipped; run `fintrack doctor` for details", s.skipped);
    }
    Ok(())
}

pub fn build_monthly(set: &RecordSet, sub: &clap::ArgMatches) -> Result<Vec<MonthlyTotal>> {
    let kind = kind_arg(sub)?;
    let category = sub.get_one::<String>("category").map(String::as_str);
    Ok(aggregate::monthly_series(set, kind, category))
}

fn monthly(set: &RecordSet, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let series = build_monthly(set, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let style = settings.currency_style();
    let rows = series
        .iter()
        .map(|m| {
            vec![
                m.label(),
                m.count.to_string(),
                format_currency(&m.total, &style),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Count", "Total"], rows));
    Ok(())
}
