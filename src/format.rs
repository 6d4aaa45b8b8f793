// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency and locale used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    pub code: String,
    pub locale: String,
}

impl CurrencyStyle {
    pub fn new(code: &str, locale: &str) -> Self {
        Self {
            code: code.trim().to_uppercase(),
            locale: locale.trim().to_string(),
        }
    }

    fn symbol(&self) -> Option<&'static str> {
        match self.code.as_str() {
            "INR" => Some("₹"),
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            _ => None,
        }
    }

    fn minor_digits(&self) -> u32 {
        match self.code.as_str() {
            "JPY" | "KRW" => 0,
            _ => 2,
        }
    }

    // en-IN groups thousands, then lakhs and crores in pairs
    fn lakh_grouping(&self) -> bool {
        self.locale.eq_ignore_ascii_case("en-IN") || self.locale.eq_ignore_ascii_case("hi-IN")
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::new("INR", "en-IN")
    }
}

pub fn format_currency(amount: &Decimal, style: &CurrencyStyle) -> String {
    let dp = style.minor_digits();
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    match style.symbol() {
        Some(sym) => out.push_str(sym),
        None => {
            out.push_str(&style.code);
            out.push(' ');
        }
    }
    out.push_str(&group_digits(int_part, style.lakh_grouping()));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Percentage rounded half away from zero to one decimal, e.g. `85.7%`.
pub fn format_percentage(pct: &Decimal) -> String {
    let r = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", r)
}

fn group_digits(int_part: &str, lakh: bool) -> String {
    let n = int_part.len();
    if n <= 3 {
        return int_part.to_string();
    }
    let (head, tail) = int_part.split_at(n - 3);
    let size = if lakh { 2 } else { 3 };
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
