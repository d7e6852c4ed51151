mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use deadmanssnitch::Client;
use std::io;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if let Command::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "snitchctl", &mut io::stdout());
        return Ok(());
    }

    let Some(api_key) = cli.api_key else {
        anyhow::bail!("an API key is required; pass --api-key or set DMS_API_KEY");
    };

    let ctx = Context {
        quiet: cli.quiet,
        json: cli.json,
    };
    let client = Client::new(api_key);

    let result = match cli.command {
        Command::Apply(args) => commands::snitch::apply(&ctx, &client, args),
        Command::Tags(args) => commands::tags::run(&ctx, &client, args),
        Command::List(args) => commands::info::list(&ctx, &client, &args),
        Command::Pause(args) => commands::snitch::pause(&ctx, &client, &args),
        Command::Unpause(args) => commands::snitch::unpause(&ctx, &client, &args),
        Command::Completions { .. } => unreachable!("handled above"),
    };

    if let Err(err) = result {
        output::failure(&err, ctx.json);
        std::process::exit(1);
    }

    Ok(())
}
