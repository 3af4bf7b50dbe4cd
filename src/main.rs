mod cli;
mod commands;
mod mcp;

use anyhow::Result;
use casemark::anchor_spec;
use casemark::config::LabelConfig;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp { config } => {
            let config = LabelConfig::load_or_default(config.as_deref())?;
            mcp::run_server(config).await?;
        }
        Commands::Labels { source, anchors } => {
            let (store, config) = commands::load_session(&source, &anchors)?;
            commands::labels::run(&store, &config)?;
        }
        Commands::Summary { source, anchors } => {
            let (store, config) = commands::load_session(&source, &anchors)?;
            commands::summary::run(&store, &config)?;
        }
        Commands::Outline { source, anchors } => {
            let (store, config) = commands::load_session(&source, &anchors)?;
            commands::outline::run(&store, &config)?;
        }
        Commands::Apply {
            path,
            output,
            anchors,
        } => {
            let config = LabelConfig::load_or_default(anchors.config.as_deref())?;
            let anchor_map =
                anchor_spec::collect_anchors(anchors.anchors_file.as_deref(), &anchors.anchors)?;
            commands::apply::run(&path, &output, anchor_map, &config)?;
        }
        Commands::Toc { path } => {
            commands::toc::run(&path)?;
        }
    }

    Ok(())
}
