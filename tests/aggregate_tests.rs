// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::aggregate::{
    dashboard_totals, list, monthly_series, overview, summarize, summarize_period,
};
use fintrack::ingest;
use fintrack::models::{RecordKind, RecordSet};
use fintrack::period::{DateRange, PeriodTag};
use rust_decimal::Decimal;
use serde_json::json;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn february() -> RecordSet {
    ingest::from_value(json!({
        "expenses": [
            {"id": "a", "amount": 100, "category": "Food", "date": "2024-02-01"},
            {"id": "b", "amount": 50, "category": "Food", "date": "2024-02-02"},
            {"id": "c", "amount": 25, "category": "Transport", "date": "2024-02-03"}
        ]
    }))
    .unwrap()
}

#[test]
fn summary_matches_worked_example() {
    let set = february();
    let s = summarize_period(
        &set,
        RecordKind::Expense,
        PeriodTag::CurrentMonth,
        d("2024-02-15"),
        None,
    );
    assert_eq!(s.total_amount, dec("175"));
    assert_eq!(s.transaction_count, 3);
    assert_eq!(s.top_category.as_deref(), Some("Food"));
    assert_eq!(s.category_breakdown.len(), 2);

    let food = s.share("Food").unwrap();
    assert_eq!(food.amount, dec("150"));
    assert_eq!(food.percentage.round_dp(1), dec("85.7"));
    let transport = s.share("Transport").unwrap();
    assert_eq!(transport.amount, dec("25"));
    assert_eq!(transport.percentage.round_dp(1), dec("14.3"));
    assert_eq!(food.rounded_percentage, dec("85.7"));
    assert_eq!(transport.rounded_percentage, dec("14.3"));

    // 175 over 29 days of February 2024
    assert_eq!(s.average_daily, dec("175") / dec("29"));
}

#[test]
fn breakdown_sums_to_total_and_hundred_percent() {
    let set = february();
    let year = DateRange::new(d("2024-01-01"), d("2024-12-31"));
    let s = summarize(&set, RecordKind::Expense, year, None);
    let amount_sum: Decimal = s.category_breakdown.iter().map(|c| c.amount).sum();
    assert_eq!(amount_sum, s.total_amount);
    let pct_sum: Decimal = s.category_breakdown.iter().map(|c| c.percentage).sum();
    assert!((pct_sum - Decimal::ONE_HUNDRED).abs() < dec("0.000001"));
}

#[test]
fn empty_input_yields_zero_result() {
    let set = RecordSet::default();
    for period in PeriodTag::ALL {
        let s = summarize_period(&set, RecordKind::Expense, period, d("2024-02-15"), None);
        assert_eq!(s.total_amount, Decimal::ZERO);
        assert_eq!(s.transaction_count, 0);
        assert!(s.category_breakdown.is_empty());
        assert_eq!(s.average_daily, Decimal::ZERO);
        assert_eq!(s.top_category, None);
    }
}

#[test]
fn zero_amounts_give_zero_percentages() {
    let set = ingest::from_value(json!({
        "expenses": [
            {"amount": 0, "category": "Food", "date": "2024-02-01"},
            {"amount": "0.00", "category": "Bills", "date": "2024-02-02"}
        ]
    }))
    .unwrap();
    let s = summarize_period(
        &set,
        RecordKind::Expense,
        PeriodTag::CurrentMonth,
        d("2024-02-15"),
        None,
    );
    assert_eq!(s.transaction_count, 2);
    assert!(s.category_breakdown.iter().all(|c| c.percentage.is_zero()));
}

#[test]
fn inverted_period_averages_to_zero() {
    let set = february();
    let inverted = DateRange::new(d("2024-02-28"), d("2024-02-01"));
    let s = summarize(&set, RecordKind::Expense, inverted, None);
    assert_eq!(s.transaction_count, 0);
    assert_eq!(s.average_daily, Decimal::ZERO);
}

#[test]
fn unparseable_date_is_skipped_and_counted() {
    let set = ingest::from_value(json!({
        "expenses": [
            {"amount": 100, "category": "Food", "date": "2024-02-01"},
            {"amount": 999, "category": "Food", "date": "not-a-date"}
        ]
    }))
    .unwrap();
    let s = summarize_period(
        &set,
        RecordKind::Expense,
        PeriodTag::CurrentMonth,
        d("2024-02-15"),
        None,
    );
    assert_eq!(s.total_amount, dec("100"));
    assert_eq!(s.transaction_count, 1);
    assert_eq!(s.skipped, 1);
}

#[test]
fn category_filter_and_tie_break() {
    let set = ingest::from_value(json!({
        "expenses": [
            {"amount": 40, "category": "Transport", "date": "2024-03-02"},
            {"amount": 40, "category": "Bills", "date": "2024-03-03"},
            {"amount": 10, "category": "Food", "date": "2024-03-04"}
        ]
    }))
    .unwrap();
    let s = summarize_period(
        &set,
        RecordKind::Expense,
        PeriodTag::CurrentMonth,
        d("2024-03-20"),
        None,
    );
    let names: Vec<_> = s.category_breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, ["Bills", "Transport", "Food"]);
    assert_eq!(s.top_category.as_deref(), Some("Bills"));

    let only = summarize_period(
        &set,
        RecordKind::Expense,
        PeriodTag::CurrentMonth,
        d("2024-03-20"),
        Some("Food"),
    );
    assert_eq!(only.total_amount, dec("10"));
    assert_eq!(only.transaction_count, 1);
    assert_eq!(only.share("Food").unwrap().percentage, Decimal::ONE_HUNDRED);
}

#[test]
fn dashboard_totals_are_open_ended() {
    let set = ingest::from_value(json!({
        "expenses": [
            {"amount": 10, "category": "Food", "date": "2024-03-20"},
            {"amount": 20, "category": "Food", "date": "2024-03-14"},
            {"amount": 30, "category": "Food", "date": "2024-03-13"},
            {"amount": 40, "category": "Food", "date": "2024-02-28"},
            {"amount": 5, "category": "Food", "date": "2024-04-02"}
        ],
        "income": [
            {"amount": 1000, "category": "Salary", "date": "2024-03-20"}
        ]
    }))
    .unwrap();
    let t = dashboard_totals(&set, RecordKind::Expense, d("2024-03-20"));
    assert_eq!(t.today_total, dec("10"));
    // 2024-03-14 is the oldest day in the trailing week; future record included
    assert_eq!(t.week_total, dec("35"));
    assert_eq!(t.month_total, dec("65"));
}

#[test]
fn monthly_series_is_chronological_across_years() {
    let set = ingest::from_value(json!({
        "expenses": [
            {"amount": 7, "category": "Food", "date": "2024-01-05"},
            {"amount": 3, "category": "Food", "date": "2023-11-20"},
            {"amount": 4, "category": "Bills", "date": "2023-11-02"}
        ]
    }))
    .unwrap();
    let series = monthly_series(&set, RecordKind::Expense, None);
    let labels: Vec<_> = series.iter().map(|m| m.label()).collect();
    assert_eq!(labels, ["2023-11", "2024-01"]);
    assert_eq!(series[0].total, dec("7"));
    assert_eq!(series[0].count, 2);

    let food = monthly_series(&set, RecordKind::Expense, Some("Food"));
    assert_eq!(food[0].total, dec("3"));
}

#[test]
fn overview_counts_only_active_emis() {
    let set = ingest::from_value(json!({
        "expenses": [{"amount": "250.50", "category": "Food", "date": "2024-01-01"}],
        "income": [{"amount": 1000, "category": "Salary", "date": "2024-01-01"}],
        "emis": [
            {"title": "Car", "monthlyAmount": 300, "totalMonths": 12, "paidMonths": 4, "startDate": "2023-09-01"},
            {"title": "Phone", "monthlyAmount": 50, "totalMonths": 6, "paidMonths": 6, "startDate": "2023-01-01"}
        ]
    }))
    .unwrap();
    let o = overview(&set);
    assert_eq!(o.total_income, dec("1000"));
    assert_eq!(o.total_expense, dec("250.50"));
    assert_eq!(o.balance, dec("749.50"));
    assert_eq!(o.monthly_emi_cost, dec("300"));
    assert_eq!(o.active_emis, 1);
}

#[test]
fn listing_is_newest_first_with_limit() {
    let set = february();
    let rows = list(&set, RecordKind::Expense, None, Some(2));
    let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["c", "b"]);
    assert!(list(&set, RecordKind::Income, None, None).is_empty());
}
