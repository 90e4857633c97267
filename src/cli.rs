use std::path::PathBuf;

/// Floor plan generation CLI (SPEC_FULL §6A).
#[derive(clap::Parser, Debug)]
#[command(name = "floorgen", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate one or more floor plan variants from a JSON input document
    Generate(GenerateArgs),

    /// Re-run only the architectural validator against an existing plan
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Input JSON document: boundary, obstacles, fixed_elements, program, constraints
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Number of variants to generate (overrides the input document's variant_count)
    #[arg(long)]
    pub variants: Option<u32>,

    /// Base seed (overrides the input document's seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the output JSON array here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// A previously generated FloorPlan, as JSON
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub plan: PathBuf,

    /// Validator thresholds, as JSON (defaults applied if omitted)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub thresholds: Option<PathBuf>,
}
