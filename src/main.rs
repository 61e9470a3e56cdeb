use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use systop::config::{Config, load_config, load_config_from_path};
use systop::logging::init_tracing;
use systop::report::{ReportSink, TerminalSink};
use systop::system::collector::{Collector, REFRESH_INTERVAL};
use systop::system::procfs::Procfs;
use tokio::time::MissedTickBehavior;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "systop",
    version,
    about = "Once-per-second CPU, memory and top-process report read from /proc"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_tracing(&config.logging)?;

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let procfs = Procfs::new(&config.general.proc_root);
    info!(
        root = %procfs.root().display(),
        page_kb = procfs.page_kb(),
        "starting"
    );

    let mut collector =
        Collector::new(procfs)?.with_name_width(config.display.name_width);
    let mut sink = TerminalSink::stdout(config.display.clear_screen);

    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so the first report
    // covers a full interval after the baseline sample.
    interval.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        // Shutdown is only observed here, between cycles.
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("interrupted, stopping");
                return Ok(());
            }
        }

        let report = collector.refresh()?;
        sink.emit(&report)?;
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}
