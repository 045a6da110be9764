// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finassist::app::App;
use finassist::config::Config;
use finassist::{cli, commands, store};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("finassist=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let matches = cli::build_cli().get_matches();

    let config = Config::from_matches(&matches)?;
    let app = App::new(config, store::LocalStore::open_or_init()?)?;

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    match name {
        "login" => commands::auth::login(&app, sub)?,
        "register" => commands::auth::register(&app, sub)?,
        "logout" => commands::auth::logout(&app)?,
        "status" => commands::auth::status(&app, sub)?,
        "doctor" => commands::doctor::handle(&app)?,
        protected => {
            commands::ensure_allowed(&app, protected)?;
            match protected {
                "dashboard" => commands::dashboard::handle(&app, sub)?,
                "transactions" => commands::transactions::handle(&app, sub)?,
                "upload" => commands::upload::handle(&app, sub)?,
                "chat" => commands::chat::handle(&app, sub)?,
                "export" => commands::exporter::handle(&app, sub)?,
                _ => {
                    cli::build_cli().print_help()?;
                    println!();
                }
            }
        }
    }
    Ok(())
}
