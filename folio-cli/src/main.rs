use anyhow::Result;
use clap::Command;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod config;

fn make_cli() -> Command {
    Command::new("folio")
        .about("Single-page portfolio site generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::serve::make_subcommand())
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio_cli=info,folio_core=info,folio_dev_server=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let matches = make_cli().get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args)?,
        Some(("serve", args)) => cmd::serve::execute(args).await?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
