#[macro_use]
extern crate tracing;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use spinwheel::replay::{self, Script};
use spinwheel_config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: the built-in configuration).
    ///
    /// This can also be set with the `SPINWHEEL_CONFIG` environment variable. If both are set,
    /// the command line argument takes precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Recorded input session to replay, in JSON.
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "spinwheel=debug,info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let _client = tracy_client::Client::start();

    let config_path = cli
        .config
        .or_else(|| env::var_os("SPINWHEEL_CONFIG").map(PathBuf::from));
    let config = match config_path {
        // miette reports don't implement std::error::Error.
        Some(path) => Config::load(&path).map_err(|err| anyhow!("{err:?}"))?,
        None => Config::default(),
    };

    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("error reading {:?}", cli.script))?;
    let script = Script::parse(&text).with_context(|| format!("error parsing {:?}", cli.script))?;
    debug!("replaying {} steps", script.steps.len());

    let report = replay::run(&script, &config);
    info!(
        "finished at index {} ({:?}) after {} events",
        report.index,
        report.text,
        report.events.len()
    );
    if report.unsettled {
        warn!("the column did not come to rest");
    }

    println!("{}", report.selected);
    Ok(())
}
