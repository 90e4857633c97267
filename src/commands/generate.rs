use std::fs;

use anyhow::{Context, Result};

use floorgen::{generate, Input, Verbosity};

use crate::cli::{Cli, GenerateArgs};

pub fn run(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let body = fs::read_to_string(&args.input)
        .with_context(|| format!("reading input document {}", args.input.display()))?;
    let mut input: Input = serde_json::from_str(&body)
        .with_context(|| format!("parsing input document {}", args.input.display()))?;

    if let Some(variants) = args.variants {
        input.variant_count = variants;
    }
    if let Some(seed) = args.seed {
        input.seed = Some(seed);
    }

    let variants = generate(&input, Verbosity::from_count(cli.verbose))?;
    let rendered = serde_json::to_string_pretty(&variants)?;

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing output to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}
