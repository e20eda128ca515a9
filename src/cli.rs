// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .version(clap::crate_version!())
        .about("Personal ledger, monthly category budgets, and financial reports")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Add a user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List users"))
                .subcommand(
                    Command::new("switch")
                        .about("Set the current user")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category").about("Category vocabulary").subcommand(
                with_json_flags(
                    Command::new("list").about("List categories in use, with usage counts"),
                ),
            ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction (expenses are checked against the budget first)")
                        .arg(Arg::new("kind").long("kind").required(true).help("income|expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).allow_hyphen_values(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .help("Record even if it exceeds the budget")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    with_json_flags(Command::new("list").about("List transactions"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind").help("income|expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction in place")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64)))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or update the active budget for a category and month")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("period").long("period").required(true).help("YYYY-MM"))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(
                    with_json_flags(Command::new("list").about("List budgets"))
                        .arg(Arg::new("period").long("period").help("YYYY-MM"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .help("Include deactivated budgets")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("off")
                        .about("Deactivate a budget (the row is kept)")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("period").long("period").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget row outright")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                )
                .subcommand(
                    with_json_flags(
                        Command::new("report").about("Limit vs spent per category for a month"),
                    )
                    .arg(Arg::new("period").long("period").help("YYYY-MM, default current month")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and exports")
                .subcommand(
                    with_json_flags(Command::new("summary").about("Income, expense and net for a month"))
                        .arg(Arg::new("period").long("period").help("YYYY-MM, default current month")),
                )
                .subcommand(
                    with_json_flags(Command::new("cashflow").about("Per-month income and expense"))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )
                .subcommand(
                    with_json_flags(
                        Command::new("spend-by-category")
                            .about("Expense breakdown with percentage of total"),
                    )
                    .arg(Arg::new("period").long("period").help("YYYY-MM, default current month")),
                )
                .subcommand(
                    Command::new("export")
                        .about("Compile a report over a date range and write it to a file")
                        .arg(Arg::new("from").long("from").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("format").long("format").default_value("json").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("alerts")
                .about("Budget breach log")
                .subcommand(
                    with_json_flags(Command::new("list").about("List alerts")).arg(
                        Arg::new("unread")
                            .long("unread")
                            .help("Only alerts not yet marked read")
                            .action(ArgAction::SetTrue),
                    ),
                )
                .subcommand(
                    Command::new("read")
                        .about("Mark an alert as read")
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan the database for integrity problems"))
}
