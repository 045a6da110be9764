// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

use crate::config::{DEFAULT_API_KEY, DEFAULT_API_URL};

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
            .help("Print as JSON lines"),
    )
}

fn paging(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("skip")
            .long("skip")
            .value_parser(value_parser!(u32))
            .default_value("0"),
    )
    .arg(
        Arg::new("limit")
            .long("limit")
            .value_parser(value_parser!(u32))
            .default_value("100"),
    )
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .env("FINASSIST_PASSWORD")
        .hide_env_values(true)
        .default_value("")
        .help("Account password; prefer FINASSIST_PASSWORD to keep it out of the process list")
}

pub fn build_cli() -> Command {
    Command::new("finassist")
        .about("Terminal client for the finance assistant API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .env("FINASSIST_API_URL")
                .default_value(DEFAULT_API_URL)
                .help("Base URL of the backend API"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .global(true)
                .env("FINASSIST_API_KEY")
                .default_value(DEFAULT_API_KEY)
                .hide_env_values(true)
                .help("Client identifier sent as X-API-Key"),
        )
        .arg(
            Arg::new("auth-mode")
                .long("auth-mode")
                .global(true)
                .env("FINASSIST_AUTH_MODE")
                .value_parser(["mock", "remote"])
                .default_value("remote")
                .help("Authentication provider"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("HTTP timeout in seconds"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session token")
                .arg(Arg::new("email").long("email").default_value(""))
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account, then sign in")
                .arg(Arg::new("first-name").long("first-name").default_value(""))
                .arg(Arg::new("last-name").long("last-name").default_value(""))
                .arg(Arg::new("email").long("email").default_value(""))
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the session token"))
        .subcommand(json_flags(
            Command::new("status").about("Show who is signed in"),
        ))
        .subcommand(Command::new("doctor").about("Check local state and API reachability"))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Monthly totals, category ranking, and six-month trend")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month")),
        ))
        .subcommand(
            Command::new("transactions")
                .visible_alias("tx")
                .about("List or record transactions")
                .subcommand(json_flags(paging(Command::new("list"))))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").default_value(""))
                        .arg(Arg::new("description").long("description").default_value(""))
                        .arg(Arg::new("amount").long("amount").default_value(""))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").default_value(""))
                        .arg(Arg::new("source").long("source")),
                ),
        )
        .subcommand(json_flags(
            Command::new("upload")
                .about("Upload a bank statement PDF")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(std::path::PathBuf)),
                ),
        ))
        .subcommand(
            Command::new("chat")
                .about("Talk to the financial assistant")
                .subcommand(Command::new("send").arg(Arg::new("message").required(true).num_args(1..)))
                .subcommand(json_flags(Command::new("history")))
                .subcommand(Command::new("clear")),
        )
        .subcommand(
            Command::new("export").subcommand(paging(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            )),
        )
}
