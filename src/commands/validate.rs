use std::fs;

use anyhow::{Context, Result};

use floorgen::{validate, FloorPlan, ValidatorThresholds};

use crate::cli::{Cli, ValidateArgs};

pub fn run(_cli: &Cli, args: &ValidateArgs) -> Result<()> {
    let body = fs::read_to_string(&args.plan)
        .with_context(|| format!("reading plan {}", args.plan.display()))?;
    let plan: FloorPlan = serde_json::from_str(&body)
        .with_context(|| format!("parsing plan {}", args.plan.display()))?;

    let thresholds = match &args.thresholds {
        Some(path) => {
            let body = fs::read_to_string(path)
                .with_context(|| format!("reading thresholds {}", path.display()))?;
            serde_json::from_str(&body)
                .with_context(|| format!("parsing thresholds {}", path.display()))?
        }
        None => ValidatorThresholds::default(),
    };

    let report = validate(&plan, &thresholds);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
