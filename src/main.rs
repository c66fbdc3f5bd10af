use clap::Parser;
use sonrisas_admin::{cli, commands, config, logging};
use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let config = Config::load()?;

    if let Err(e) = commands::run(cli, config).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }

    Ok(())
}
