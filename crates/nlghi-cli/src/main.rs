use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use nlghi_cli::cli::Cli;
use nlghi_cli::{commands, config};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    let settings_path = match cli.config {
        Some(path) => path,
        None => config::default_settings_path()?,
    };

    let output = commands::run(cli.command, &settings_path)?;
    println!("{}", output.render()?);
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
