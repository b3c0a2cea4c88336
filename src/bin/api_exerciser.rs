//! Smoke test for the RunA and RunB item services.

use clap::Parser;
use tracing::warn;

use item_service::exerciser::{run_all, Target};
use item_service::{metrics, utils, Instance};

/// Exercise both item services and print every response.
#[derive(Parser, Debug)]
#[command(name = "api-exerciser")]
#[command(about = "Sequentially calls GET/POST /items on RunA and RunB")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Base URL of the RunA service.
    #[arg(long, env = "RUNA_URL", default_value = "http://localhost:3001")]
    run_a_url: String,

    /// Base URL of the RunB service.
    #[arg(long, env = "RUNB_URL", default_value = "http://localhost:3002")]
    run_b_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    utils::init_logging(args.verbose);
    metrics::init_metrics();

    let targets = [
        Target {
            instance: Instance::RunA,
            base_url: args.run_a_url,
        },
        Target {
            instance: Instance::RunB,
            base_url: args.run_b_url,
        },
    ];

    let reports = run_all(&targets).await;

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        warn!("{} of {} services reported errors", failed, reports.len());
    }

    Ok(())
}
