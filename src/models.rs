// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, RejectReason};

pub const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    /// Name of the document-store collection holding this kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Expense => "expenses",
            RecordKind::Income => "income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Expense => f.write_str("expense"),
            RecordKind::Income => f.write_str("income"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(RecordKind::Expense),
            "income" => Ok(RecordKind::Income),
            other => Err(FintrackError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emi {
    pub id: String,
    pub title: String,
    pub monthly_amount: Decimal,
    pub total_months: u32,
    pub paid_months: u32,
    pub start_date: NaiveDate,
}

impl Emi {
    pub fn is_active(&self) -> bool {
        self.paid_months < self.total_months
    }

    /// Fraction of installments paid, in `[0, 1]`.
    pub fn progress(&self) -> Decimal {
        if self.total_months == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.paid_months) / Decimal::from(self.total_months)
    }

    pub fn remaining_months(&self) -> u32 {
        self.total_months.saturating_sub(self.paid_months)
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.monthly_amount * Decimal::from(self.remaining_months())
    }

    pub fn record_payment(&mut self) -> Result<(), FintrackError> {
        if !self.is_active() {
            return Err(FintrackError::EmiFullyPaid(self.title.clone()));
        }
        self.paid_months += 1;
        Ok(())
    }
}

/// A stored document that did not pass validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub collection: String,
    pub id: String,
    #[serde(serialize_with = "reason_as_string")]
    pub reason: RejectReason,
}

fn reason_as_string<S: serde::Serializer>(r: &RejectReason, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(r)
}

/// One user's validated documents. Replaced wholesale when new data arrives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub emis: Vec<Emi>,
    pub rejected: Vec<Rejection>,
}

impl RecordSet {
    pub fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }

    /// Skipped documents that belonged to the given collection.
    pub fn skipped_in(&self, kind: RecordKind) -> usize {
        self.rejected
            .iter()
            .filter(|r| r.collection == kind.collection())
            .count()
    }
}
