// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .value_parser(["expense", "income"])
        .help("Record kind (default: expense)")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .help("Only records in this category")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(clap::crate_version!())
        .about("Expense, income and EMI tracking over a document-store snapshot")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("Snapshot file (.json or .csv); defaults to data_path in settings"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Reference date YYYY-MM-DD (default: local date)"),
        )
        .subcommand(json_args(
            Command::new("dashboard").about("Balance overview, spending totals and recent expenses"),
        ))
        .subcommand(
            Command::new("report")
                .about("Period and monthly reports")
                .subcommand(json_args(
                    Command::new("summary")
                        .about("Totals and category breakdown for a period")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .help("current-month|last-month|last-3-months|last-6-months|current-year"),
                        )
                        .arg(category_arg())
                        .arg(kind_arg()),
                ))
                .subcommand(json_args(
                    Command::new("monthly")
                        .about("Per-month totals in chronological order")
                        .arg(category_arg())
                        .arg(kind_arg()),
                )),
        )
        .subcommand(
            Command::new("tx").about("Transactions").subcommand(json_args(
                Command::new("list")
                    .about("List records, newest first")
                    .arg(kind_arg())
                    .arg(category_arg())
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
            )),
        )
        .subcommand(
            Command::new("emi").about("Installment plans").subcommand(json_args(
                Command::new("list").about("List EMIs with progress").arg(
                    Arg::new("active")
                        .long("active")
                        .action(ArgAction::SetTrue)
                        .help("Only plans with months left to pay"),
                ),
            )),
        )
        .subcommand(
            Command::new("export").about("Export normalized records").subcommand(
                Command::new("records")
                    .arg(kind_arg())
                    .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Report documents rejected while loading"))
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
