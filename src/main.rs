use clap::Parser;

use glowplan_notify::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::execute(cli).await
}
