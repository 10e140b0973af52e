mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use edufert::{export_to_path, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let config = cli.pipeline_config()?;
    let session = Session::open(&config).with_context(|| {
        format!(
            "loading {} and {}",
            config.enrollment_path.display(),
            config.fertility_path.display()
        )
    })?;
    info!(records = session.dataset().len(), "dataset ready");

    let selection = cli.selection(session.dataset())?;
    let view = session.recompute(&selection)?;

    if let Some(path) = &cli.export {
        export_to_path(view.filtered.records(), path, &config.export_config())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), records = view.filtered.len(), "exported filtered records");
    }

    println!("{}", report::render(&view, cli.chart, cli.format)?);
    Ok(())
}
