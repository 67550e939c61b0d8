use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::Path;
use tracing::info;

use crate::config::{FolioConfig, load_site_config};
use folio_core::build_site;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Site configuration file")
                .default_value("./folio.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for the generated site")
                .default_value("./out"),
        )
        .arg(
            Arg::new("assets")
                .short('a')
                .long("assets")
                .value_name("DIR")
                .help("User asset directory copied into the output")
                .default_value("./assets"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the portfolio page")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let folio_config = FolioConfig::load(args)?;
    let build_config = folio_config.build_config();

    let site_config = load_site_config(&build_config.config)?;
    let output_dir = Path::new(&build_config.output);
    let assets_dir = Path::new(&build_config.assets);

    build_site(site_config, output_dir, Some(assets_dir), None)?;

    info!("Site built successfully in {}", output_dir.display());

    Ok(())
}
