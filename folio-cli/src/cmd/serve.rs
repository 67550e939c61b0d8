use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use std::{path::PathBuf, time::Duration};
use tracing::{error, info};

use crate::config::{FolioConfig, load_site_config};
use folio_core::build_site;
use folio_dev_server::{LiveServer, LiveServerConfig};

pub fn make_subcommand() -> Command {
    crate::cmd::build::add_build_args(Command::new("serve"))
        .about("Start a development server with live reload")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to serve on")
                .default_value("3000"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to bind to")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open browser automatically")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = FolioConfig::load(args)?;
    let build_config = config.build_config();

    let output_dir = PathBuf::from(&build_config.output);
    let host = build_config.host.clone();
    let port = build_config.port;
    let open = build_config.open;

    // Dev mode wires the live-reload snippet into the layout
    rebuild(&config)?;

    // Start the live dev server (handles its own file watching of output dir)
    let server_config = LiveServerConfig {
        host: host.clone(),
        port,
        root: output_dir.clone(),
        open,
        ignore: vec![".git".to_string(), "*.tmp".to_string()],
    };

    let server = LiveServer::new(server_config);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Dev server error: {}", e);
        }
    });

    // Watch the config file and asset directory, rebuild on changes
    let watcher_config = config.clone();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watch_sources(watcher_config).await {
            error!("Source watcher error: {}", e);
        }
    });

    // Wait for both tasks
    let _ = tokio::try_join!(server_handle, watcher_handle)?;

    Ok(())
}

fn rebuild(config: &FolioConfig) -> Result<()> {
    let build_config = config.build_config();
    let site_config = load_site_config(&build_config.config)?;

    build_site(
        site_config,
        &PathBuf::from(&build_config.output),
        Some(&PathBuf::from(&build_config.assets)),
        Some((build_config.host.as_str(), build_config.port)),
    )?;

    Ok(())
}

async fn watch_sources(config: FolioConfig) -> Result<()> {
    let build_config = config.build_config();
    let config_file = PathBuf::from(&build_config.config);
    let assets_dir = PathBuf::from(&build_config.assets);

    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500), // Slightly longer delay for rebuilds
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
        },
    )?;

    // Watch the config file if it exists
    if config_file.exists() {
        debouncer
            .watcher()
            .watch(&config_file, notify::RecursiveMode::NonRecursive)?;
        info!("Watching config file: {}", config_file.display());
    }

    // Watch the asset directory if it exists
    if assets_dir.exists() {
        debouncer
            .watcher()
            .watch(&assets_dir, notify::RecursiveMode::Recursive)?;
        info!("Watching asset directory: {}", assets_dir.display());
    }

    while let Some(path) = rx.recv().await {
        info!("Source changed: {}", path.display());

        match rebuild(&config) {
            Ok(_) => {
                info!("Site rebuilt successfully");
            }
            Err(e) => {
                error!("Build error: {}", e);
            }
        }
    }

    Ok(())
}
