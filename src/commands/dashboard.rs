// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, DashboardTotals, Overview};
use crate::config::Settings;
use crate::format::format_currency;
use crate::models::{Record, RecordKind, RecordSet};
use crate::utils::{maybe_print_json, pretty_table, reference_date};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub overview: Overview,
    pub spending: DashboardTotals,
    pub recent: Vec<Record>,
    pub skipped: usize,
}

pub fn build(set: &RecordSet, settings: &Settings, today: NaiveDate) -> Dashboard {
    Dashboard {
        today,
        overview: aggregate::overview(set),
        spending: aggregate::dashboard_totals(set, RecordKind::Expense, today),
        recent: aggregate::recent(set, RecordKind::Expense, settings.recent_limit)
            .into_iter()
            .cloned()
            .collect(),
        skipped: set.skipped(),
    }
}

pub fn handle(set: &RecordSet, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let dash = build(set, settings, reference_date(sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let style = settings.currency_style();
    let money = |d| format_currency(&d, &style);
    let o = &dash.overview;
    let summary = vec![
        vec!["Income".into(), money(o.total_income)],
        vec!["Expenses".into(), money(o.total_expense)],
        vec!["Balance".into(), money(o.balance)],
        vec![
            "EMI / month".into(),
            format!("{} ({} active)", money(o.monthly_emi_cost), o.active_emis),
        ],
        vec!["Spent today".into(), money(dash.spending.today_total)],
        vec!["Spent last 7 days".into(), money(dash.spending.week_total)],
        vec!["Spent this month".into(), money(dash.spending.month_total)],
    ];
    println!("{}", pretty_table(&["Dashboard", &dash.today.to_string()], summary));

    if dash.recent.is_empty() {
        println!("No recent transactions");
    } else {
        let rows = dash
            .recent
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.category.clone(),
                    format!("-{}", money(r.amount)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Category", "Amount"], rows));
    }
    Ok(())
}
