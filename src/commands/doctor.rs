// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RecordSet;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn issue_rows(set: &RecordSet) -> Vec<Vec<String>> {
    set.rejected
        .iter()
        .map(|r| vec![r.collection.clone(), r.id.clone(), r.reason.to_string()])
        .collect()
}

pub fn handle(set: &RecordSet) -> Result<()> {
    let rows = issue_rows(set);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Collection", "ID", "Issue"], rows));
    }
    Ok(())
}
