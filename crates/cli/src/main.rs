mod config;
mod simulate;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wrr_selector::Selector;

use crate::config::CliConfig;

fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    // Usage: wrr [CONFIG_PATH] [DRAWS]
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .unwrap_or_else(|| "config/wrr.yaml".to_string());

    let mut cli_config = CliConfig::load(&config_path)?;
    if let Some(draws) = args.next() {
        let draws: u64 = draws
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid draw count '{}': {}", draws, e))?;
        cli_config = cli_config.with_draws(draws)?;
    }
    let config = &cli_config.config;

    let selector = Selector::new(&config.selector)?;
    info!(
        config_path = %cli_config.config_path.display(),
        entries = selector.count(),
        total_weight = selector.total_weight(),
        size_threshold = selector.size_threshold(),
        "selector ready"
    );

    let seed = config.simulation.seed;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = simulate::run(&selector, config.simulation.draws, seed, &mut rng)?;
    for entry in &report.entries {
        info!(
            key = %entry.key,
            count = entry.count,
            observed = entry.observed_share,
            expected = entry.expected_share,
            "draw distribution"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
