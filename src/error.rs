// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FintrackError {
    #[error("Unknown period '{0}' (use current-month|last-month|last-3-months|last-6-months|current-year)")]
    UnknownPeriod(String),

    #[error("Unknown record kind '{0}' (use expense|income)")]
    UnknownKind(String),

    #[error("Snapshot must be a JSON object with expenses/income/emis arrays")]
    MalformedSnapshot,

    #[error("Collection '{0}' must be an array of documents")]
    MalformedCollection(String),

    #[error("EMI '{0}' is already fully paid")]
    EmiFullyPaid(String),

    #[error("CSV header must include kind, date and amount columns")]
    MalformedCsvHeader,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a stored document was excluded at the ingest boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("non-numeric amount '{0}'")]
    NonNumericAmount(String),

    #[error("negative amount {0}")]
    NegativeAmount(String),

    #[error("amount {0} exceeds the supported maximum")]
    AmountOutOfRange(String),

    #[error("unknown record kind '{0}'")]
    UnknownKind(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),

    #[error("invalid installment counts: {paid} paid of {total}")]
    InvalidInstallments { paid: String, total: String },

    #[error("document is not an object")]
    NotAnObject,
}
