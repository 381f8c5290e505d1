// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
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

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Reference date for the current month (defaults to today)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal finance tracker: incomes, expenses, budgets, savings goals, dashboards")
        .version(clap::crate_version!())
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .env("FINBOARD_OWNER")
                .value_name("EMAIL")
                .help("Owner to act as (defaults to the owner chosen with `owner use`)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("owner")
                .about("Manage owners")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("name").long("name")),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("use").arg(Arg::new("email").long("email").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Show the allowed categories")
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("kind")
                            .long("kind")
                            .value_parser(["income", "expense"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse incomes and expenses")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("year").long("year").value_parser(value_parser!(i32))),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(Command::new("report").arg(as_of_arg()))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("target-date").long("target-date")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("target-date").long("target-date")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard and statistics")
                .subcommand(json_flags(Command::new("dashboard").arg(as_of_arg())))
                .subcommand(json_flags(
                    Command::new("yearly").arg(
                        Arg::new("year")
                            .long("year")
                            .required(true)
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for records reports would reject"))
}
