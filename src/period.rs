// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FintrackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodTag {
    #[default]
    CurrentMonth,
    LastMonth,
    Last3Months,
    Last6Months,
    CurrentYear,
}

impl PeriodTag {
    pub const ALL: [PeriodTag; 5] = [
        PeriodTag::CurrentMonth,
        PeriodTag::LastMonth,
        PeriodTag::Last3Months,
        PeriodTag::Last6Months,
        PeriodTag::CurrentYear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodTag::CurrentMonth => "current-month",
            PeriodTag::LastMonth => "last-month",
            PeriodTag::Last3Months => "last-3-months",
            PeriodTag::Last6Months => "last-6-months",
            PeriodTag::CurrentYear => "current-year",
        }
    }

    /// Lenient lookup: a missing or unknown tag means the current month.
    pub fn resolve_or_default(tag: Option<&str>) -> PeriodTag {
        match tag.map(str::parse::<PeriodTag>) {
            Some(Ok(p)) => p,
            Some(Err(err)) => {
                tracing::warn!(%err, "falling back to current-month");
                PeriodTag::CurrentMonth
            }
            None => PeriodTag::CurrentMonth,
        }
    }

    pub fn range(self, now: NaiveDate) -> DateRange {
        let this_month = first_of_month(now);
        match self {
            PeriodTag::CurrentMonth => DateRange::new(this_month, last_of_month(now)),
            PeriodTag::LastMonth => {
                let prev = months_back(this_month, 1);
                DateRange::new(prev, last_of_month(prev))
            }
            PeriodTag::Last3Months => DateRange::new(months_back(this_month, 3), last_of_month(now)),
            PeriodTag::Last6Months => DateRange::new(months_back(this_month, 6), last_of_month(now)),
            PeriodTag::CurrentYear => DateRange::new(
                now.with_ordinal(1).unwrap_or(this_month),
                NaiveDate::from_ymd_opt(now.year(), 12, 31).unwrap_or(now),
            ),
        }
    }
}

impl fmt::Display for PeriodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodTag {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PeriodTag::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FintrackError::UnknownPeriod(s.to_string()))
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    /// Number of days covered, `0` when the range is inverted.
    pub fn days(&self) -> i64 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// Day before the first of the following month.
pub fn last_of_month(d: NaiveDate) -> NaiveDate {
    let first = first_of_month(d);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

fn months_back(first: NaiveDate, n: u32) -> NaiveDate {
    first.checked_sub_months(Months::new(n)).unwrap_or(first)
}
