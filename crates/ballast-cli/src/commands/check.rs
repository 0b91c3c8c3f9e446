//! Check command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use ballast_config::load_targets;
use ballast_core::types::format_pct;
use ballast_core::TargetConfig;

use crate::output::{print_header, print_success, table_string, KeyValue};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Target allocation file (.json or .toml)
    #[arg(short, long, env = "BALLAST_CONFIG")]
    pub config: PathBuf,
}

#[derive(Tabled)]
struct BucketTargetRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Target %")]
    target: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Cap %")]
    cap: String,
    #[tabled(rename = "Positions")]
    positions: usize,
}

fn bucket_rows(targets: &TargetConfig) -> Vec<BucketTargetRow> {
    targets
        .buckets()
        .iter()
        .map(|b| BucketTargetRow {
            bucket: b.name.clone(),
            target: format_pct(b.target_pct),
            range: b.range.to_string(),
            cap: targets
                .bucket_cap(&b.name)
                .map_or_else(|| "—".to_string(), format_pct),
            positions: targets.positions_in(&b.name).len(),
        })
        .collect()
}

/// Execute the check command.
pub fn execute(args: CheckArgs) -> Result<()> {
    let loaded = load_targets(&args.config)?;
    let targets = &loaded.targets;

    print_header(&format!("Targets: {}", targets.strategy_name()));
    let summary = vec![
        KeyValue::new("Buckets", targets.buckets().len().to_string()),
        KeyValue::new("Positions", targets.positions().len().to_string()),
        KeyValue::new("Single-position cap", format_pct(targets.single_position_cap())),
    ];
    println!("{}", table_string(&summary));
    println!("{}", table_string(&bucket_rows(targets)));

    print_success(&format!("{} is valid", args.config.display()));
    Ok(())
}
