use anyhow::Result;
use clap::Parser;

use banter::cli::{Cli, Command};
use banter::{console, server};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => server::serve(args).await,
        Command::Client(args) => console::run_client(args).await,
        Command::Admin(args) => console::run_admin(args).await,
    }
}
