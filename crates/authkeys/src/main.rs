//! authkeys - Entry Point
//!
//! Runs the key rotation loop for one process of the fleet.

// Force-link authkeys-providers so linkme registrations are included
extern crate authkeys_providers;

use clap::Parser;

/// Command line interface for authkeys
#[derive(Parser, Debug)]
#[command(name = "authkeys")]
#[command(about = "Distributed RS256 signing-key rotation")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Restore the key window, print its JWKS and exit
    #[arg(long)]
    pub check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    authkeys::run(cli.config.as_deref(), cli.check).await?;
    Ok(())
}
