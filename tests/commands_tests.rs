// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::cli;
use fintrack::commands::{dashboard, doctor, emis, exporter, reports, transactions};
use fintrack::config::Settings;
use fintrack::ingest;
use fintrack::models::RecordSet;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn snapshot() -> RecordSet {
    ingest::from_value(json!({
        "expenses": [
            {"id": "e1", "amount": 100, "category": "Food", "date": "2024-02-01", "note": "Groceries"},
            {"id": "e2", "amount": 50, "category": "Food", "date": "2024-02-02"},
            {"id": "e3", "amount": 25, "category": "Transport", "date": "2024-02-03"},
            {"id": "e4", "amount": 80, "category": "Bills", "date": "2024-01-10"},
            {"id": "bad", "amount": 1, "category": "Food", "date": "2024-02-31"}
        ],
        "income": [
            {"id": "i1", "amount": 3000, "category": "Salary", "date": "2024-02-01"}
        ],
        "emis": [
            {"id": "m1", "title": "Car", "monthlyAmount": 400, "totalMonths": 10, "paidMonths": 5, "startDate": "2023-09-01"},
            {"id": "m2", "title": "Laptop", "monthlyAmount": 90, "totalMonths": 3, "paidMonths": 3, "startDate": "2023-10-01"}
        ]
    }))
    .unwrap()
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args.iter().copied());
    while let Some((_, next)) = m.subcommand() {
        m = next.clone();
    }
    m
}

#[test]
fn report_summary_uses_period_and_today() {
    let set = snapshot();
    let m = sub_matches(&["fintrack", "report", "summary", "--today", "2024-02-15"]);
    let s = reports::build_summary(&set, &m).unwrap();
    assert_eq!(s.total_amount, Decimal::from(175));
    assert_eq!(s.skipped, 1);

    let m = sub_matches(&[
        "fintrack", "report", "summary", "--period", "last-month", "--today", "2024-02-15",
    ]);
    let s = reports::build_summary(&set, &m).unwrap();
    assert_eq!(s.total_amount, Decimal::from(80));
    assert_eq!(s.top_category.as_deref(), Some("Bills"));
}

#[test]
fn report_summary_unknown_period_falls_back() {
    let set = snapshot();
    let m = sub_matches(&[
        "fintrack", "report", "summary", "--period", "quarter", "--today", "2024-02-15",
    ]);
    let s = reports::build_summary(&set, &m).unwrap();
    assert_eq!(s.range.start.to_string(), "2024-02-01");
    assert_eq!(s.range.end.to_string(), "2024-02-29");
}

#[test]
fn report_summary_for_income() {
    let set = snapshot();
    let m = sub_matches(&[
        "fintrack", "report", "summary", "--kind", "income", "--today", "2024-02-15",
    ]);
    let s = reports::build_summary(&set, &m).unwrap();
    assert_eq!(s.total_amount, Decimal::from(3000));
    assert_eq!(s.skipped, 0);
}

#[test]
fn report_monthly_orders_months() {
    let set = snapshot();
    let m = sub_matches(&["fintrack", "report", "monthly"]);
    let series = reports::build_monthly(&set, &m).unwrap();
    let labels: Vec<_> = series.iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["2024-01", "2024-02"]);
}

#[test]
fn tx_list_limit_and_category() {
    let set = snapshot();
    let m = sub_matches(&["fintrack", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&set, &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-02-03");

    let m = sub_matches(&["fintrack", "tx", "list", "--category", "Food"]);
    let rows = transactions::query_rows(&set, &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].note, "Groceries");
}

#[test]
fn dashboard_combines_overview_and_recent() {
    let set = snapshot();
    let settings = Settings::default();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
    let dash = dashboard::build(&set, &settings, today);
    assert_eq!(dash.overview.balance, Decimal::from(3000 - 255));
    assert_eq!(dash.overview.monthly_emi_cost, Decimal::from(400));
    assert_eq!(dash.spending.today_total, Decimal::from(25));
    assert_eq!(dash.spending.month_total, Decimal::from(175));
    let recent: Vec<_> = dash.recent.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(recent, ["e3", "e2", "e1"]);
}

#[test]
fn emi_rows_filter_active() {
    let set = snapshot();
    let all = emis::rows(&set, false);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Laptop");
    let active = emis::rows(&set, true);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].progress, "50.0%");
    assert_eq!(active[0].remaining_amount, Decimal::from(2000));
}

#[test]
fn emi_empty_message_depends_on_filter() {
    let set = ingest::from_value(json!({
        "emis": [
            {"id": "m2", "title": "Laptop", "monthlyAmount": 90, "totalMonths": 3, "paidMonths": 3, "startDate": "2023-10-01"}
        ]
    }))
    .unwrap();
    assert!(emis::rows(&set, true).is_empty());
    assert_eq!(emis::empty_message(true), "No active EMIs.");
    assert!(emis::rows(&RecordSet::default(), false).is_empty());
    assert_eq!(emis::empty_message(false), "No EMIs.");
}

#[test]
fn doctor_lists_rejected_documents() {
    let set = snapshot();
    let rows = doctor::issue_rows(&set);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "expenses");
    assert_eq!(rows[0][1], "bad");
    assert!(rows[0][2].contains("2024-02-31"));
}

#[test]
fn export_csv_loads_back() {
    let set = snapshot();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "fintrack", "export", "records", "--format", "csv", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&set, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let back = ingest::load_path(&out_path).unwrap();
    assert_eq!(back.records.len(), 4);
    assert!(back.rejected.is_empty());
    assert_eq!(back.records[0].id, "e4");
    assert_eq!(back.records[3].note.as_deref(), None);
    assert_eq!(back.records[1].note.as_deref(), Some("Groceries"));
}

#[test]
fn export_rejects_unknown_format() {
    let set = snapshot();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "fintrack", "export", "records", "--format", "xml", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&set, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
