// src/main.rs
use std::path::PathBuf;

use buildinfo::{
    stamp::{write_descriptor, Stamp},
    BuildInfoService, LoaderConfig,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "buildinfo", version, about = "Inspect or write the build descriptor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the descriptor and print its fields
    Show {
        /// JSON loader config; defaults to a local read from the current directory
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a descriptor for the current build
    Stamp {
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        bundle_version: String,
        #[arg(long, default_value = "")]
        tag: String,
        #[arg(long, default_value = "")]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    match Cli::parse().command {
        Command::Show { config } => {
            let config = match config {
                Some(path) => LoaderConfig::load(&path)?,
                None => LoaderConfig::default(),
            };

            let service = BuildInfoService::new(&config);
            info!("Reading build info from {}", service.source_location());

            let available = service.loaded().await;
            println!("id:             {}", service.id());
            println!("date:           {}", service.date());
            println!("bundle version: {}", service.bundle_version());
            println!("tag:            {}", service.tag());
            println!("branch:         {}", service.branch());
            println!("available:      {}", available);

            if !available {
                if let Some(reason) = service.failure_reason() {
                    eprintln!("error: {}", reason);
                }
                std::process::exit(1);
            }
        }
        Command::Stamp {
            output,
            id,
            bundle_version,
            tag,
            branch,
        } => {
            let stamp = Stamp {
                id,
                built_at: Utc::now(),
                bundle_version,
                tag,
                branch,
            };
            write_descriptor(&output, &stamp)?;
        }
    }

    Ok(())
}
