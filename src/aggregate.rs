// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over an already-loaded [`RecordSet`].
//!
//! Nothing here reads the clock or touches I/O; "today" is always passed in.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Record, RecordKind, RecordSet};
use crate::period::{DateRange, PeriodTag, first_of_month};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Exact share of the total.
    pub percentage: Decimal,
    /// `percentage` rounded half away from zero to one decimal.
    pub rounded_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub kind: RecordKind,
    pub range: DateRange,
    pub category_filter: Option<String>,
    pub total_amount: Decimal,
    pub transaction_count: usize,
    pub average_daily: Decimal,
    /// Largest amount first, ties by category name.
    pub category_breakdown: Vec<CategoryShare>,
    pub top_category: Option<String>,
    pub skipped: usize,
}

impl PeriodSummary {
    pub fn share(&self, category: &str) -> Option<&CategoryShare> {
        self.category_breakdown
            .iter()
            .find(|s| s.category == category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub today_total: Decimal,
    pub week_total: Decimal,
    pub month_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
    pub count: usize,
}

impl MonthlyTotal {
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overview {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub monthly_emi_cost: Decimal,
    pub active_emis: usize,
}

fn matches_category(r: &Record, category: Option<&str>) -> bool {
    category.is_none_or(|c| r.category == c)
}

pub fn summarize(
    set: &RecordSet,
    kind: RecordKind,
    range: DateRange,
    category: Option<&str>,
) -> PeriodSummary {
    let mut total = Decimal::ZERO;
    let mut count = 0usize;
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();

    for r in set
        .of_kind(kind)
        .filter(|r| range.contains(r.date) && matches_category(r, category))
    {
        total += r.amount;
        count += 1;
        *by_category.entry(r.category.as_str()).or_insert(Decimal::ZERO) += r.amount;
    }

    let breakdown = breakdown(by_category, total);
    let days = range.days();
    let average_daily = if days > 0 {
        total / Decimal::from(days)
    } else {
        Decimal::ZERO
    };

    PeriodSummary {
        kind,
        range,
        category_filter: category.map(str::to_string),
        total_amount: total,
        transaction_count: count,
        average_daily,
        top_category: breakdown.first().map(|s| s.category.clone()),
        category_breakdown: breakdown,
        skipped: set.skipped_in(kind),
    }
}

pub fn summarize_period(
    set: &RecordSet,
    kind: RecordKind,
    period: PeriodTag,
    now: NaiveDate,
    category: Option<&str>,
) -> PeriodSummary {
    summarize(set, kind, period.range(now), category)
}

fn breakdown(by_category: HashMap<&str, Decimal>, total: Decimal) -> Vec<CategoryShare> {
    let mut items: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, amount)| {
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                amount * Decimal::ONE_HUNDRED / total
            };
            CategoryShare {
                category: category.to_string(),
                amount,
                percentage,
                rounded_percentage: percentage
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            }
        })
        .collect();
    items.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    items
}

/// Today / trailing-week / month-to-date totals. These are "since" filters
/// with no upper bound, so future-dated records count too.
pub fn dashboard_totals(set: &RecordSet, kind: RecordKind, today: NaiveDate) -> DashboardTotals {
    let week_start = today - Duration::days(6);
    let month_start = first_of_month(today);
    let mut totals = DashboardTotals {
        today_total: Decimal::ZERO,
        week_total: Decimal::ZERO,
        month_total: Decimal::ZERO,
    };
    for r in set.of_kind(kind) {
        if r.date == today {
            totals.today_total += r.amount;
        }
        if r.date >= week_start {
            totals.week_total += r.amount;
        }
        if r.date >= month_start {
            totals.month_total += r.amount;
        }
    }
    totals
}

/// Per-month totals in chronological order.
pub fn monthly_series(
    set: &RecordSet,
    kind: RecordKind,
    category: Option<&str>,
) -> Vec<MonthlyTotal> {
    let mut map: BTreeMap<(i32, u32), (Decimal, usize)> = BTreeMap::new();
    for r in set.of_kind(kind).filter(|r| matches_category(r, category)) {
        let entry = map
            .entry((r.date.year(), r.date.month()))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += r.amount;
        entry.1 += 1;
    }
    map.into_iter()
        .map(|((year, month), (total, count))| MonthlyTotal {
            year,
            month,
            total,
            count,
        })
        .collect()
}

pub fn overview(set: &RecordSet) -> Overview {
    let sum = |kind| set.of_kind(kind).map(|r| r.amount).sum::<Decimal>();
    let total_income = sum(RecordKind::Income);
    let total_expense = sum(RecordKind::Expense);
    let active: Vec<_> = set.emis.iter().filter(|e| e.is_active()).collect();
    Overview {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        monthly_emi_cost: active.iter().map(|e| e.monthly_amount).sum(),
        active_emis: active.len(),
    }
}

/// Records of one kind, newest first, optionally filtered and truncated.
pub fn list<'a>(
    set: &'a RecordSet,
    kind: RecordKind,
    category: Option<&str>,
    limit: Option<usize>,
) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = set
        .of_kind(kind)
        .filter(|r| matches_category(r, category))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}

pub fn recent(set: &RecordSet, kind: RecordKind, limit: usize) -> Vec<&Record> {
    list(set, kind, None, Some(limit))
}
