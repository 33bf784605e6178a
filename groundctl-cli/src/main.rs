//! ## groundctl
//! **Operator console for AWS Ground Station mission profiles**
//!
//! Pick a region, pick a mission profile, then either inspect it with all
//! of its dataflow edge configs or change one licensed parameter.
//!
//! ### Expectations:
//! - Credentials from the ambient AWS profile chain
//! - Menus on stdout, logs on stderr
//! - Audit events for every submitted update

use clap::Parser;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    commands::run_command(cli).await
}
