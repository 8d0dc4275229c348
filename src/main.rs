//! `grocery` binary entry point.
use std::sync::Arc;

use clap::Parser;
use grocery_store::cli::{Cli, Command};
use grocery_store::{commands, logging};

fn main() {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return;
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(logging::Logger::new(args.command.name()));

    let result = match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, &log),
        Command::Uninstall(opts) => commands::uninstall::run(&args.global, opts, &log),
        Command::Paste(opts) => commands::paste::run(&args.global, opts, &log),
        Command::Catalog(opts) => commands::catalog::run(&args.global, opts, &log),
        Command::Version => Ok(()),
    };

    if let Err(e) = result {
        log.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
