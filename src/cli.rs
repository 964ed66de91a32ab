// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn required(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn transaction_fields(cmd: Command, creating: bool) -> Command {
    cmd.arg(opt("date", "Date, YYYY-MM-DD (defaults to today)"))
        .arg(opt("description", "What the money was for").required(creating))
        .arg(opt("type", "income | expense").required(creating))
        .arg(opt("category", "Category id").required(creating))
        .arg(opt("amount", "Positive amount").required(creating))
        .arg(opt(
            "payment",
            "cash | debit-card | credit-card | transfer | digital",
        ))
        .arg(opt("notes", "Free-text notes"))
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .about("Track income and expenses by category, with reports and exports")
        .version(crate_version!())
        .arg(
            Arg::new("data-file")
                .long("data-file")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Local envelope path (overrides SPENDLOG_DATA_FILE)"),
        )
        .subcommand(Command::new("init").about("Create the local envelope if missing"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Category name"))
                        .arg(opt("icon", "Short glyph or emoji").default_value("📦")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(required("id", "Category id"))
                        .arg(opt("name", "New name"))
                        .arg(opt("icon", "New icon"))
                        .arg(
                            opt("active", "Enable or disable the category")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(required("id", "Category id"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(transaction_fields(Command::new("add"), true))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("type", "income | expense"))
                        .arg(opt("category", "Category id"))
                        .arg(opt("payment", "Payment method"))
                        .arg(opt("from", "Start date (inclusive)"))
                        .arg(opt("to", "End date (inclusive)"))
                        .arg(opt("search", "Case-insensitive text in description"))
                        .arg(opt("month", "YYYY-MM"))
                        .arg(opt("limit", "Max rows").value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    transaction_fields(
                        Command::new("edit").arg(required("id", "Transaction id")),
                        false,
                    )
                    .arg(
                        Arg::new("clear-payment")
                            .long("clear-payment")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("payment"),
                    )
                    .arg(
                        Arg::new("clear-notes")
                            .long("clear-notes")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("notes"),
                    ),
                )
                .subcommand(Command::new("rm").arg(required("id", "Transaction id"))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, category breakdowns and trends")
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(
                            opt("range", "this-month | last-month | this-year | custom")
                                .default_value("this-month"),
                        )
                        .arg(opt("from", "Custom range start"))
                        .arg(opt("to", "Custom range end")),
                ))
                .subcommand(json_flags(
                    Command::new("overview")
                        .about("This month's totals and the latest transactions")
                        .arg(
                            opt("recent", "How many recent transactions to show")
                                .value_parser(value_parser!(usize))
                                .default_value("5"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        opt("months", "Number of months including the current one")
                            .value_parser(value_parser!(usize))
                            .default_value("6"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions as CSV or a full JSON backup")
                .subcommand(Command::new("csv").arg(required("out", "Output file")))
                .subcommand(Command::new("json").arg(required("out", "Output file"))),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a JSON backup into the local envelope")
                .subcommand(Command::new("json").arg(required("path", "Backup file"))),
        )
}
