//
//  atlassian-cloud
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;

use atlassian_cloud::cli::{exit_code, Cli, Commands};
use atlassian_cloud::{exit_codes, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = cli.global.load_config().ok();
    if let Err(e) = logging::init(cli.global.log_file(config.as_ref()).as_deref()) {
        eprintln!("Warning: {e:#}");
    }

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Jira(cmd) => cmd.run(&cli.global).await,
        Commands::Confluence(cmd) => cmd.run(&cli.global).await,
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("atl version {}", atlassian_cloud::VERSION);
            Ok(())
        }
    }
}
