// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Boundary between raw documents from the store and typed records.
//!
//! Everything malformed is dropped here and kept as a [`Rejection`], so the
//! aggregation code only ever sees valid records.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FintrackError, RejectReason};
use crate::models::{Emi, Record, RecordKind, RecordSet, Rejection, UNCATEGORIZED};

const EMI_COLLECTION: &str = "emis";
const CSV_COLLECTION: &str = "csv";

/// Largest accepted amount (10^15). Sums over any realistic record count stay
/// far below `Decimal::MAX`, so aggregation cannot overflow.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

/// Load a snapshot file. `.csv` files hold records only, anything else is JSON.
pub fn load_path(path: &Path) -> Result<RecordSet, FintrackError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let set = if is_csv {
        from_csv_reader(fs::File::open(path)?)?
    } else {
        from_json_str(&fs::read_to_string(path)?)?
    };
    tracing::info!(
        path = %path.display(),
        records = set.records.len(),
        emis = set.emis.len(),
        skipped = set.skipped(),
        "snapshot loaded"
    );
    Ok(set)
}

pub fn from_json_str(s: &str) -> Result<RecordSet, FintrackError> {
    from_value(serde_json::from_str(s)?)
}

pub fn from_value(v: Value) -> Result<RecordSet, FintrackError> {
    let Value::Object(root) = v else {
        return Err(FintrackError::MalformedSnapshot);
    };
    let mut set = RecordSet::default();
    for kind in [RecordKind::Expense, RecordKind::Income] {
        for (i, doc) in collection(&root, kind.collection())?.iter().enumerate() {
            match parse_record(kind, i, doc) {
                Ok(r) => set.records.push(r),
                Err(rej) => reject(&mut set, rej),
            }
        }
    }
    for (i, doc) in collection(&root, EMI_COLLECTION)?.iter().enumerate() {
        match parse_emi(i, doc) {
            Ok(e) => set.emis.push(e),
            Err(rej) => reject(&mut set, rej),
        }
    }
    Ok(set)
}

fn collection<'a>(
    root: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a [Value], FintrackError> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(docs)) => Ok(docs),
        Some(_) => Err(FintrackError::MalformedCollection(name.to_string())),
    }
}

fn reject(set: &mut RecordSet, rej: Rejection) {
    tracing::debug!(
        collection = %rej.collection,
        id = %rej.id,
        reason = %rej.reason,
        "document rejected"
    );
    set.rejected.push(rej);
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    #[serde(default)]
    id: Option<String>,
    date: String,
    amount: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

/// Read records from a CSV export with header `kind,id,date,amount,category,note`.
///
/// Rows that cannot be read become rejections keyed by line number; only
/// I/O failures and a header without the required columns abort the load.
pub fn from_csv_reader<R: Read>(rdr: R) -> Result<RecordSet, FintrackError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let headers = rdr.headers()?.clone();
    if ["kind", "date", "amount"]
        .iter()
        .any(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(FintrackError::MalformedCsvHeader);
    }

    let mut set = RecordSet::default();
    let mut counters = [0usize; 2];
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                let reason = RejectReason::MalformedRow(err.to_string());
                reject(&mut set, csv_rejection(line, reason));
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());
        let row: CsvRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                let reason = RejectReason::MalformedRow(err.to_string());
                reject(&mut set, csv_rejection(line, reason));
                continue;
            }
        };
        let Ok(kind) = row.kind.parse::<RecordKind>() else {
            reject(&mut set, csv_rejection(line, RejectReason::UnknownKind(row.kind)));
            continue;
        };
        let slot = match kind {
            RecordKind::Expense => &mut counters[0],
            RecordKind::Income => &mut counters[1],
        };
        let index = *slot;
        *slot += 1;

        let mut doc = Map::new();
        if let Some(id) = row.id.filter(|s| !s.is_empty()) {
            doc.insert("id".into(), Value::String(id));
        }
        doc.insert("date".into(), Value::String(row.date));
        doc.insert("amount".into(), Value::String(row.amount));
        if let Some(c) = row.category {
            doc.insert("category".into(), Value::String(c));
        }
        if let Some(n) = row.note {
            doc.insert("note".into(), Value::String(n));
        }
        match parse_record(kind, index, &Value::Object(doc)) {
            Ok(r) => set.records.push(r),
            Err(rej) => reject(&mut set, rej),
        }
    }
    Ok(set)
}

fn csv_rejection(line: u64, reason: RejectReason) -> Rejection {
    Rejection {
        collection: CSV_COLLECTION.to_string(),
        id: format!("line {}", line),
        reason,
    }
}

/// Validate one expense/income document. `index` is its position in the
/// collection, used as the id when the document carries none.
pub fn parse_record(kind: RecordKind, index: usize, doc: &Value) -> Result<Record, Rejection> {
    let collection = kind.collection();
    let id = doc_id(collection, index, doc);
    let fail = |reason: RejectReason| Rejection {
        collection: collection.to_string(),
        id: id.clone(),
        reason,
    };
    let Value::Object(obj) = doc else {
        return Err(fail(RejectReason::NotAnObject));
    };

    let amount = obj
        .get("amount")
        .ok_or(RejectReason::MissingField("amount"))
        .and_then(parse_amount)
        .map_err(&fail)?;
    let date = obj
        .get("date")
        .ok_or(RejectReason::MissingField("date"))
        .and_then(parse_doc_date)
        .map_err(&fail)?;
    let category = text(obj, "category").unwrap_or_else(|| UNCATEGORIZED.to_string());
    let note = text(obj, "note");
    let created_at = obj.get("createdAt").and_then(parse_timestamp);

    Ok(Record {
        id,
        kind,
        amount,
        category,
        date,
        note,
        created_at,
    })
}

pub fn parse_emi(index: usize, doc: &Value) -> Result<Emi, Rejection> {
    let id = doc_id(EMI_COLLECTION, index, doc);
    let fail = |reason: RejectReason| Rejection {
        collection: EMI_COLLECTION.to_string(),
        id: id.clone(),
        reason,
    };
    let Value::Object(obj) = doc else {
        return Err(fail(RejectReason::NotAnObject));
    };

    let monthly_amount = obj
        .get("monthlyAmount")
        .ok_or(RejectReason::MissingField("monthlyAmount"))
        .and_then(parse_amount)
        .map_err(&fail)?;
    let start_date = obj
        .get("startDate")
        .ok_or(RejectReason::MissingField("startDate"))
        .and_then(parse_doc_date)
        .map_err(&fail)?;
    let total = obj.get("totalMonths").and_then(parse_count);
    let paid = obj.get("paidMonths").and_then(parse_count);
    let (total_months, paid_months) = match (total, paid) {
        (Some(t), Some(p)) if t > 0 && p <= t => (t, p),
        _ => {
            return Err(fail(RejectReason::InvalidInstallments {
                paid: raw(obj.get("paidMonths")),
                total: raw(obj.get("totalMonths")),
            }));
        }
    };
    let title = text(obj, "title").unwrap_or_else(|| id.clone());

    Ok(Emi {
        id,
        title,
        monthly_amount,
        total_months,
        paid_months,
        start_date,
    })
}

fn doc_id(collection: &str, index: usize, doc: &Value) -> String {
    match doc.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("{}#{}", collection, index),
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn raw(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "none".to_string(),
    }
}

fn parse_amount(v: &Value) -> Result<Decimal, RejectReason> {
    let s = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(RejectReason::NonNumericAmount(other.to_string())),
    };
    let d = s
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&s))
        .map_err(|_| RejectReason::NonNumericAmount(s.clone()))?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(RejectReason::NegativeAmount(d.to_string()));
    }
    if d > max_amount() {
        return Err(RejectReason::AmountOutOfRange(d.to_string()));
    }
    Ok(d)
}

fn parse_doc_date(v: &Value) -> Result<NaiveDate, RejectReason> {
    let s = match v {
        Value::String(s) => s.trim(),
        other => return Err(RejectReason::InvalidDate(other.to_string())),
    };
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RejectReason::InvalidDate(s.to_string()))
}

fn parse_count(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `createdAt` is audit-only, so an unreadable value is dropped rather than
/// rejecting the record.
fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Object(o) => {
            let secs = o.get("seconds").or_else(|| o.get("_seconds"))?.as_i64()?;
            let nanos = o
                .get("nanoseconds")
                .or_else(|| o.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}
